pub mod table;

pub use table::{classification_row, header_row};
