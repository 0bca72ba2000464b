//! Output: turning assembled records into a CSV file

pub mod table;
pub mod writer;

pub use table::Table;
pub use writer::write_csv;
