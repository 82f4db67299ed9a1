// Service exports
pub mod api;
pub mod input;
pub mod sink;

pub use api::{ApiClient, ApiError};
pub use input::read_address_list;
pub use sink::{CsvSink, RowSink, SinkError};
