//! Output writers for fetched events

mod csv;
mod json;
mod text;

pub use self::csv::CsvWriter;
pub use self::json::JsonWriter;
pub use self::text::TextWriter;

use crate::error::{OutputError, Result};
use crate::gateway::BlockEvents;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(OutputError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Sink for fetched blocks
pub trait OutputWriter {
    /// Write a batch of blocks
    fn write_events(&mut self, blocks: &[BlockEvents]) -> Result<()>;

    /// Flush and close the output
    fn finalize(&mut self) -> Result<()>;
}

/// Open `path`, or stdout when no path is given
pub(crate) fn open_output(path: Option<&Path>) -> Result<Box<dyn Write + Send>> {
    let output: Box<dyn Write + Send> = match path {
        Some(p) => {
            let file = File::create(p)
                .map_err(|e| OutputError::FileCreate(format!("{}: {}", p.display(), e)))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout())),
    };
    Ok(output)
}

/// Create a writer for the given format
pub fn create_writer(format: OutputFormat, path: Option<&Path>) -> Result<Box<dyn OutputWriter>> {
    let output = open_output(path)?;
    Ok(match format {
        OutputFormat::Text => Box::new(TextWriter::new(output)),
        OutputFormat::Json => Box::new(JsonWriter::new(output)),
        OutputFormat::Csv => Box::new(CsvWriter::new(output)),
    })
}
