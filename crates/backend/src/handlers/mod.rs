// Dashboard handlers (d400)
pub mod d400_picking_result;
