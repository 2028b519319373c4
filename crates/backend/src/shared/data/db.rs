use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

/// Tables read by the dashboard. Registration screens write them.
const SCHEMA: [&str; 5] = [
    r#"
        CREATE TABLE IF NOT EXISTS stores (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            store_name TEXT NOT NULL
        );
    "#,
    r#"
        CREATE TABLE IF NOT EXISTS workers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_name TEXT NOT NULL
        );
    "#,
    r#"
        CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            store_id INTEGER NOT NULL REFERENCES stores(id),
            worker_id INTEGER NOT NULL REFERENCES workers(id),
            order_number TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT,
            is_completed INTEGER NOT NULL DEFAULT 0,
            work_date TEXT NOT NULL
        );
    "#,
    r#"
        CREATE TABLE IF NOT EXISTS each_picks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            order_id INTEGER NOT NULL REFERENCES orders(id),
            worker_id INTEGER NOT NULL REFERENCES workers(id),
            sku_count INTEGER NOT NULL,
            move_start TEXT,
            arrive_at_shelf TEXT,
            pick_start TEXT,
            pack_start TEXT,
            pack_finished TEXT,
            customer_service_start TEXT,
            customer_service_finish TEXT
        );
    "#,
    r#"
        CREATE INDEX IF NOT EXISTS idx_orders_work_date ON orders (work_date, is_completed);
    "#,
];

fn build_sqlite_url(path: &Path) -> String {
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

/// Open (or create) the database file and bootstrap the schema.
///
/// Called once at startup, the connection is then passed around in the app state.
pub async fn open_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };

    let db_url = build_sqlite_url(&absolute_path);
    tracing::info!("Opening database: {}", absolute_path.display());
    let conn = Database::connect(&db_url).await?;
    ensure_schema(&conn).await?;
    Ok(conn)
}

/// Single-connection in-memory database, every pooled connection would get its own copy otherwise
pub async fn open_in_memory() -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let conn = Database::connect(options).await?;
    ensure_schema(&conn).await?;
    Ok(conn)
}

pub async fn ensure_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for sql in SCHEMA {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await?;
    }
    tracing::debug!("Dashboard schema is in place");
    Ok(())
}
