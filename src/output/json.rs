//! JSON output writer

use crate::error::{OutputError, Result};
use crate::gateway::BlockEvents;
use crate::output::OutputWriter;
use std::io::Write;

/// Writes all blocks as one pretty-printed JSON array
pub struct JsonWriter {
    writer: Box<dyn Write + Send>,
    /// Blocks collected until finalize
    blocks: Vec<BlockEvents>,
}

impl JsonWriter {
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer,
            blocks: Vec::new(),
        }
    }
}

impl OutputWriter for JsonWriter {
    fn write_events(&mut self, blocks: &[BlockEvents]) -> Result<()> {
        self.blocks.extend_from_slice(blocks);
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.blocks)
            .map_err(|e| OutputError::JsonWrite(e.to_string()))?;
        writeln!(self.writer).map_err(|e| OutputError::JsonWrite(e.to_string()))?;
        self.writer
            .flush()
            .map_err(|e| OutputError::JsonWrite(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::Event;

    #[test]
    fn test_writes_all_batches_as_one_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        let output = crate::output::open_output(Some(path.as_path())).unwrap();

        let first = BlockEvents::new("ab", 12).with_event(Event {
            event_type: "A.01.Token.Deposited".into(),
            transaction_id: "tx".into(),
            transaction_index: 1,
            event_index: 2,
            payload: "e30=".into(),
        });
        let second = BlockEvents::new("cd", 13);

        let mut writer = JsonWriter::new(output);
        writer.write_events(&[first.clone()]).unwrap();
        writer.write_events(&[second.clone()]).unwrap();
        writer.finalize().unwrap();
        drop(writer);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"type\": \"A.01.Token.Deposited\""));
        let parsed: Vec<BlockEvents> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, vec![first, second]);
    }

    #[test]
    fn test_empty_output_is_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        let output = crate::output::open_output(Some(path.as_path())).unwrap();

        let mut writer = JsonWriter::new(output);
        writer.finalize().unwrap();
        drop(writer);

        let parsed: Vec<BlockEvents> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(parsed.is_empty());
    }
}
