//! JSONL Event Log
//!
//! Each `SimEvent` becomes one line: the tick, the snake_case `type` tag and
//! the payload fields side by side, e.g.
//! `{"tick":12,"type":"knight_retreated","position":{"x":3,"y":7}}`.
//! The file is truncated on open, so a log always covers a single run.

use eldoria_events::SimEvent;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Sink for the events of a run. Without a file it only counts.
pub struct EventLogger {
    sink: Option<BufWriter<File>>,
    lines: u64,
}

impl EventLogger {
    /// Start a fresh log at `path`
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        Ok(Self {
            sink: Some(BufWriter::new(file)),
            lines: 0,
        })
    }

    /// Count events without writing them anywhere
    pub fn null() -> Self {
        Self { sink: None, lines: 0 }
    }

    /// Events seen so far, written or not
    pub fn event_count(&self) -> u64 {
        self.lines
    }

    pub fn log(&mut self, event: &SimEvent) -> std::io::Result<()> {
        self.lines += 1;
        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };
        serde_json::to_writer(&mut *sink, event)?;
        sink.write_all(b"\n")
    }

    /// Append one tick's worth of events, in the order they happened
    pub fn log_batch(&mut self, events: &[SimEvent]) -> std::io::Result<()> {
        events.iter().try_for_each(|event| self.log(event))
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        match self.sink.as_mut() {
            Some(sink) => sink.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for EventLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(lines = self.lines, "event log not flushed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eldoria_events::{CatchOutcome, Position, SimEventKind, TreasureType};

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_one_line_per_event_with_flat_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.jsonl");

        {
            let mut logger = EventLogger::new(&path).unwrap();
            logger
                .log_batch(&[
                    SimEvent::new(4, SimEventKind::KnightRetreated { position: Position::new(3, 7) }),
                    SimEvent::new(
                        4,
                        SimEventKind::HunterCaught {
                            knight: Position::new(3, 7),
                            hunter: Position::new(4, 7),
                            outcome: CatchOutcome::Challenge,
                            cargo_lost: true,
                        },
                    ),
                ])
                .unwrap();
            logger
                .log(&SimEvent::new(
                    5,
                    SimEventKind::TreasureDecayed {
                        position: Position::new(0, 1),
                        treasure_type: TreasureType::Silver,
                    },
                ))
                .unwrap();
            assert_eq!(logger.event_count(), 3);
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["type"], "knight_retreated");
        assert_eq!(lines[0]["position"]["y"], 7);
        assert_eq!(lines[1]["outcome"], "challenge");
        assert_eq!(lines[1]["cargo_lost"], true);
        assert_eq!(lines[2]["tick"], 5);
        assert_eq!(lines[2]["treasure_type"], "silver");
    }

    #[test]
    fn test_reopening_truncates_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.jsonl");
        let event = SimEvent::new(1, SimEventKind::KnightRetreated { position: Position::new(0, 0) });

        EventLogger::new(&path).unwrap().log_batch(&[event.clone(), event.clone()]).unwrap();
        EventLogger::new(&path).unwrap().log(&event).unwrap();

        assert_eq!(read_lines(&path).len(), 1);
    }

    #[test]
    fn test_null_logger_counts_only() {
        let mut logger = EventLogger::null();
        logger
            .log(&SimEvent::new(1, SimEventKind::KnightRetreated { position: Position::new(0, 0) }))
            .unwrap();
        assert_eq!(logger.event_count(), 1);
        assert!(logger.flush().is_ok());
    }
}
