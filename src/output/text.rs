//! Human-readable output writer

use crate::error::Result;
use crate::gateway::BlockEvents;
use crate::output::OutputWriter;
use std::io::Write;

/// Prints one section per block that has events
pub struct TextWriter {
    writer: Box<dyn Write + Send>,
    /// Events written so far
    count: usize,
}

impl TextWriter {
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self { writer, count: 0 }
    }
}

impl OutputWriter for TextWriter {
    fn write_events(&mut self, blocks: &[BlockEvents]) -> Result<()> {
        for block in blocks.iter().filter(|b| !b.is_empty()) {
            writeln!(self.writer, "Events Block #{} ({}):", block.height, block.block_id)?;
            for event in &block.events {
                writeln!(self.writer, "    Type\t{}", event.event_type)?;
                writeln!(self.writer, "    Tx ID\t{}", event.transaction_id)?;
                writeln!(
                    self.writer,
                    "    Index\t{} (tx {})",
                    event.event_index, event.transaction_index
                )?;
                writeln!(self.writer, "    Payload\t{}", event.payload)?;
                writeln!(self.writer)?;
                self.count += 1;
            }
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        if self.count == 0 {
            writeln!(self.writer, "No events found")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::Event;

    fn event(event_type: &str) -> Event {
        Event {
            event_type: event_type.into(),
            transaction_id: "tx-1".into(),
            transaction_index: 0,
            event_index: 3,
            payload: "e30=".into(),
        }
    }

    #[test]
    fn test_lists_each_block_and_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.txt");
        let output = crate::output::open_output(Some(path.as_path())).unwrap();

        let blocks = [
            BlockEvents::new("ab", 12).with_event(event("A.01.Token.Deposited")),
            BlockEvents::new("cd", 13),
            BlockEvents::new("ef", 14).with_event(event("A.01.Token.Withdrawn")),
        ];

        let mut writer = TextWriter::new(output);
        writer.write_events(&blocks).unwrap();
        writer.finalize().unwrap();
        drop(writer);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Events Block #12 (ab):"));
        assert!(content.contains("Events Block #14 (ef):"));
        assert!(content.contains("A.01.Token.Deposited"));
        assert!(content.contains("A.01.Token.Withdrawn"));
        // blocks without events are skipped
        assert!(!content.contains("#13"));
        assert!(!content.contains("No events found"));
    }

    #[test]
    fn test_reports_no_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        let output = crate::output::open_output(Some(path.as_path())).unwrap();

        let mut writer = TextWriter::new(output);
        writer.write_events(&[BlockEvents::new("ab", 12)]).unwrap();
        writer.finalize().unwrap();
        drop(writer);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "No events found");
    }
}
