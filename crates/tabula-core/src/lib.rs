pub mod area;
pub mod coord;
pub mod error;
pub mod value;

pub use area::PrintableArea;
pub use coord::{col_from_label, col_to_label, CellCoord, Size};
pub use error::CellError;
pub use value::CellValue;
