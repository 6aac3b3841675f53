pub mod xlsx_reader;

pub use xlsx_reader::*;
