//! CSV output writer

use crate::error::{OutputError, Result};
use crate::gateway::{BlockEvents, Event};
use crate::output::OutputWriter;
use std::io::Write;

const HEADER: [&str; 8] = [
    "block_height",
    "block_id",
    "block_timestamp",
    "event_type",
    "transaction_id",
    "transaction_index",
    "event_index",
    "payload",
];

/// One row per event; blocks without events produce no rows
pub struct CsvWriter {
    writer: ::csv::Writer<Box<dyn Write + Send>>,
    /// Whether header has been written
    header_written: bool,
}

impl CsvWriter {
    pub fn new(output: Box<dyn Write + Send>) -> Self {
        Self {
            writer: ::csv::Writer::from_writer(output),
            header_written: false,
        }
    }

    fn write_header(&mut self) -> Result<()> {
        self.writer
            .write_record(HEADER)
            .map_err(|e| OutputError::CsvWrite(e.to_string()))?;
        self.header_written = true;
        Ok(())
    }

    fn row(block: &BlockEvents, event: &Event) -> [String; 8] {
        [
            block.height.to_string(),
            block.block_id.clone(),
            block.timestamp.clone().unwrap_or_default(),
            event.event_type.clone(),
            event.transaction_id.clone(),
            event.transaction_index.to_string(),
            event.event_index.to_string(),
            event.payload.clone(),
        ]
    }
}

impl OutputWriter for CsvWriter {
    fn write_events(&mut self, blocks: &[BlockEvents]) -> Result<()> {
        if !self.header_written {
            self.write_header()?;
        }

        for block in blocks {
            for event in &block.events {
                self.writer
                    .write_record(Self::row(block, event))
                    .map_err(|e| OutputError::CsvWrite(e.to_string()))?;
            }
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        if !self.header_written {
            self.write_header()?;
        }

        self.writer
            .flush()
            .map_err(|e| OutputError::CsvWrite(e.to_string()))?;

        Ok(())
    }
}
