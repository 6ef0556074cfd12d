pub mod csv_sink;
pub mod json;

pub use csv_sink::CsvSink;
pub use json::{create_json, read_export};
