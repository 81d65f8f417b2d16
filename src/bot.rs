// Snakepit bot facade
//
// One method per endpoint, mirroring the transport surface. The bot owns the
// only cross-tick state (the current food goal) behind a mutex; each decision
// itself is synchronous and runs to completion before the next snapshot.

use log::info;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::engine::{self, FoodGoal};
use crate::types::{Coordinate, GameEvent, GameSettings, MapUpdateMessage, REGISTER_MOVE_TYPE};
use crate::world::World;

/// Decision core exposed to the transport layer
pub struct Bot {
    config: Config,
    goal: Mutex<FoodGoal>,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    pub fn new(config: Config) -> Self {
        Self::with_logger(config, DebugLogger::disabled())
    }

    /// Creates a Bot that records every decision through the given logger
    pub fn with_logger(config: Config, debug_logger: DebugLogger) -> Self {
        Bot {
            config,
            goal: Mutex::new(FoodGoal::new()),
            debug_logger,
        }
    }

    /// Returns bot metadata and the training-game settings pass-through
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        json!({
            "name": "slither-rs",
            "author": "slither",
            "trainingGameSettings": self.config.game_settings,
        })
    }

    /// Dispatches a game lifecycle event by kind.
    /// Invoked synchronously by the transport collaborator.
    pub fn on_event(&self, event: &GameEvent) {
        match event {
            GameEvent::GameStarting {
                game_id,
                noof_players,
                width,
                height,
            } => {
                info!(
                    "GAME STARTING {} ({} players, {}x{})",
                    game_id, noof_players, width, height
                );
                // Goal state belongs to the previous game
                self.goal.lock().clear();
            }
            GameEvent::SnakeDead {
                player_id,
                death_reason,
                game_tick,
                ..
            } => {
                info!(
                    "Snake {} died at tick {}: {}",
                    player_id, game_tick, death_reason
                );
            }
            GameEvent::GameEnded {
                player_winner_id,
                game_id,
                game_tick,
            } => {
                info!(
                    "GAME OVER {} at tick {}, winner: {}",
                    game_id, game_tick, player_winner_id
                );
            }
        }
    }

    /// Computes the next move for the addressed player and answers the
    /// RegisterMove message the transport submits to the server.
    /// Corresponds to POST /move endpoint
    ///
    /// Fails only at the boundary: a malformed snapshot or a
    /// receivingPlayerId that resolves to no live snake. Past that point the
    /// engine always produces a direction.
    pub fn get_move(&self, message: &MapUpdateMessage) -> Result<Value, String> {
        let start_time = Instant::now();

        let world = World::from_message(message)?;
        let you = world
            .snake_by_id(&message.receiving_player_id)
            .ok_or_else(|| format!("No snake with id: {}", message.receiving_player_id))?;

        let direction = {
            let mut goal = self.goal.lock();
            engine::next_move(&world, you, &mut goal, &self.config)
        };

        info!(
            "Tick {}: chose {} ({}ms)",
            message.game_tick,
            direction.as_str(),
            start_time.elapsed().as_millis()
        );

        self.debug_logger.log_decision(message, direction);

        Ok(json!({
            "type": REGISTER_MOVE_TYPE,
            "direction": direction.as_str(),
            "gameTick": message.game_tick,
            "receivingPlayerId": message.receiving_player_id,
            "gameId": message.game_id,
        }))
    }

    /// The food tile currently pursued, if any
    pub fn current_goal(&self) -> Option<Coordinate> {
        self.goal.lock().target()
    }

    /// Server tunables forwarded verbatim when starting a training game
    pub fn training_game_settings(&self) -> &GameSettings {
        &self.config.game_settings
    }
}
