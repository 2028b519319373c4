pub mod dto;
pub mod request;
pub mod response;

pub use dto::*;
pub use request::*;
pub use response::*;
