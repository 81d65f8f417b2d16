// Replay module for analyzing historical game states and debugging
// decision-making
//
// This module provides functionality to:
// 1. Parse JSONL decision logs
// 2. Replay the engine on historical snapshots
// 3. Compare expected vs actual directions
// 4. Generate analysis reports

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::config::Config;
use crate::engine::{self, FoodGoal};
use crate::types::{Direction, MapWire};
use crate::world::World;

/// Represents a single log entry from the decision JSONL file
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogEntry {
    pub game_tick: u32,
    pub receiving_player_id: String,
    pub chosen_direction: String,
    pub map: MapWire,
    pub timestamp: String,
}

/// Result of replaying a single tick
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub game_tick: u32,
    pub original_direction: Direction,
    pub replayed_direction: Direction,
    pub matches: bool,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_ticks: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing decision logs
pub struct ReplayEngine {
    config: Config,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine { config, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays a single log entry and compares the result.
    ///
    /// The food goal is threaded in by the caller so that consecutive ticks
    /// reproduce the engine's multi-tick seeking behavior.
    pub fn replay_entry(
        &self,
        entry: &LogEntry,
        goal: &mut FoodGoal,
    ) -> Result<ReplayResult, String> {
        if self.verbose {
            info!("Replaying tick {}...", entry.game_tick);
        }

        let original_direction = Self::parse_direction(&entry.chosen_direction)?;

        let world = World::from_wire(&entry.map)?;
        let you = world
            .snake_by_id(&entry.receiving_player_id)
            .ok_or_else(|| {
                format!(
                    "Snake with id '{}' not found in logged map",
                    entry.receiving_player_id
                )
            })?;

        let start_time = Instant::now();
        let replayed_direction = engine::next_move(&world, you, goal, &self.config);
        let computation_time = start_time.elapsed().as_micros();

        let matches = original_direction == replayed_direction;

        if self.verbose {
            if matches {
                info!(
                    "Tick {}: MATCH - {} ({}us)",
                    entry.game_tick,
                    replayed_direction.as_str(),
                    computation_time
                );
            } else {
                warn!(
                    "Tick {}: MISMATCH - Original: {}, Replayed: {} ({}us)",
                    entry.game_tick,
                    original_direction.as_str(),
                    replayed_direction.as_str(),
                    computation_time
                );
            }
        }

        Ok(ReplayResult {
            game_tick: entry.game_tick,
            original_direction,
            replayed_direction,
            matches,
            computation_time_us: computation_time,
        })
    }

    /// Replays all entries in a log file, carrying the food goal from one
    /// tick to the next exactly as the live bot does
    pub fn replay_all(&self, entries: &[LogEntry]) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();
        let mut goal = FoodGoal::new();

        for entry in entries {
            match self.replay_entry(entry, &mut goal) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay tick {}: {}", entry.game_tick, e);
                }
            }
        }

        Ok(results)
    }

    /// Replays specific ticks from a log file. Each tick starts from a fresh
    /// goal; mismatches on goal-following moves are expected here.
    pub fn replay_ticks(
        &self,
        entries: &[LogEntry],
        tick_numbers: &[u32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for tick in tick_numbers {
            let entry = entries
                .iter()
                .find(|e| e.game_tick == *tick)
                .ok_or_else(|| format!("Tick {} not found in log file", tick))?;

            let mut goal = FoodGoal::new();
            match self.replay_entry(entry, &mut goal) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay tick {}: {}", tick, e);
                }
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_ticks = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_ticks - matches;
        let match_rate = if total_ticks > 0 {
            (matches as f64 / total_ticks as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_ticks,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Ticks:    {}", stats.total_ticks);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;

            println!("Average Computation Time:   {:.1}us\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Tick {}: {} → {} ({}us)",
                    result.game_tick,
                    result.original_direction.as_str(),
                    result.replayed_direction.as_str(),
                    result.computation_time_us
                );
            }
            println!();
        }
    }

    /// Validates that specific expected directions were chosen
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(u32, Vec<Direction>)], // (tick, acceptable_directions)
    ) -> Result<(), String> {
        for (tick, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.game_tick == *tick)
                .ok_or_else(|| format!("Tick {} not found in log", tick))?;

            let actual = Self::parse_direction(&entry.chosen_direction)?;

            if !acceptable.contains(&actual) {
                return Err(format!(
                    "Tick {}: Expected one of {:?}, but got {}",
                    tick,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual.as_str()
                ));
            }
        }

        Ok(())
    }

    /// Helper to parse a protocol direction string
    fn parse_direction(s: &str) -> Result<Direction, String> {
        match s.to_uppercase().as_str() {
            "UP" => Ok(Direction::Up),
            "DOWN" => Ok(Direction::Down),
            "LEFT" => Ok(Direction::Left),
            "RIGHT" => Ok(Direction::Right),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_direction() {
        assert_eq!(ReplayEngine::parse_direction("UP").unwrap(), Direction::Up);
        assert_eq!(
            ReplayEngine::parse_direction("DOWN").unwrap(),
            Direction::Down
        );
        assert_eq!(
            ReplayEngine::parse_direction("LEFT").unwrap(),
            Direction::Left
        );
        assert_eq!(
            ReplayEngine::parse_direction("RIGHT").unwrap(),
            Direction::Right
        );

        // Case insensitivity
        assert_eq!(ReplayEngine::parse_direction("up").unwrap(), Direction::Up);
        assert_eq!(
            ReplayEngine::parse_direction("Down").unwrap(),
            Direction::Down
        );

        assert!(ReplayEngine::parse_direction("invalid").is_err());
    }
}
