pub mod d400_picking_result;
