// Decision logging module for asynchronous game state logging
//
// Fire-and-forget writes keep the move request/response cycle free of file
// I/O. Each tick's map update and the chosen direction land as one JSONL
// line, which the replay tool can feed back through the engine.

use log::error;
use serde::Serialize;
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::types::{Direction, MapUpdateMessage, MapWire};

/// Represents a single decision log entry
#[derive(Debug, Serialize)]
struct DecisionLogEntry {
    game_tick: u32,
    receiving_player_id: String,
    chosen_direction: String,
    map: MapWire,
    timestamp: String,
}

/// Shared decision logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new decision logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return DebugLogger {
                file: Arc::new(Mutex::new(None)),
                enabled: false,
            };
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Decision logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create decision log file '{}': {}", log_file_path, e);
                DebugLogger {
                    file: Arc::new(Mutex::new(None)),
                    enabled: false,
                }
            }
        }
    }

    /// Creates a disabled decision logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    /// Logs a decision asynchronously (fire-and-forget)
    /// This spawns a tokio task that writes to the file without blocking
    pub fn log_decision(&self, message: &MapUpdateMessage, chosen_direction: Direction) {
        if !self.enabled {
            return;
        }

        let file_handle = self.file.clone();
        let entry = DecisionLogEntry {
            game_tick: message.game_tick,
            receiving_player_id: message.receiving_player_id.clone(),
            chosen_direction: chosen_direction.as_str().to_string(),
            map: message.map.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        // Spawn fire-and-forget task
        tokio::spawn(async move {
            Self::write_entry(file_handle, entry).await;
        });
    }

    /// Internal async function that performs the actual file write
    async fn write_entry(file_handle: Arc<Mutex<Option<File>>>, entry: DecisionLogEntry) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write decision log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush decision log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize decision log entry: {}", e);
                }
            }
        }
    }
}
