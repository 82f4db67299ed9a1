use std::fs::File;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing the report
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Destination for report rows
///
/// The scheduler writes the header once, then appends one block of rows per
/// batch. Appends are serialized by the scheduler's control path, so
/// implementations need no internal synchronization.
pub trait RowSink {
    fn write_header(&mut self, fields: &[String]) -> Result<(), SinkError>;
    fn append_rows(&mut self, rows: Vec<Vec<String>>) -> Result<(), SinkError>;
}

/// CSV file sink
pub struct CsvSink {
    writer: csv::Writer<File>,
}

impl CsvSink {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, SinkError> {
        let file = File::create(path)?;
        Ok(Self {
            writer: csv::Writer::from_writer(file),
        })
    }
}

impl RowSink for CsvSink {
    fn write_header(&mut self, fields: &[String]) -> Result<(), SinkError> {
        self.writer.write_record(fields)?;
        self.writer.flush()?;
        Ok(())
    }

    fn append_rows(&mut self, rows: Vec<Vec<String>>) -> Result<(), SinkError> {
        for row in rows {
            self.writer.write_record(&row)?;
        }
        // Flush per batch so an interrupted run leaves whole batches on disk
        self.writer.flush()?;
        Ok(())
    }
}
