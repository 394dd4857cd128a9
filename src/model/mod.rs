pub mod element;
pub mod table;
pub mod value;

pub use element::Element;
pub use table::{Row, Table, CCI_COLUMNS, FIXED_COLUMNS};
pub use value::Scalar;
