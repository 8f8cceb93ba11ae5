// Debug logging module for per-tick game state logging
//
// Each tick's state is written as one JSON line so the replay tool can
// reconstruct the exact decision input later. The engine is synchronous
// by design, so writes are plain buffered appends flushed per tick.

use log::error;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

use crate::types::{Direction, GameSnapshot};

/// Represents a single debug log entry
#[derive(Debug, Serialize)]
struct DebugLogEntry<'a> {
    tick: u64,
    chosen_move: String,
    snapshot: &'a GameSnapshot,
    timestamp: String,
}

/// Per-session JSONL writer; a disabled logger is a no-op
pub struct DebugLogger {
    writer: Option<BufWriter<File>>,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return DebugLogger { writer: None };
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    writer: Some(BufWriter::new(file)),
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                DebugLogger { writer: None }
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger { writer: None }
    }

    /// Logs one decided tick: the state the decision was made against
    /// and the move that came out of it.
    pub fn log_tick(&mut self, tick: u64, snapshot: &GameSnapshot, chosen_move: Direction) {
        let writer = match self.writer.as_mut() {
            Some(w) => w,
            None => return,
        };

        let entry = DebugLogEntry {
            tick,
            chosen_move: chosen_move.as_str().to_string(),
            snapshot,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        match serde_json::to_string(&entry) {
            Ok(json_line) => {
                if let Err(e) = writeln!(writer, "{}", json_line) {
                    error!("Failed to write debug log entry: {}", e);
                } else if let Err(e) = writer.flush() {
                    error!("Failed to flush debug log: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to serialize debug log entry: {}", e);
            }
        }
    }
}
