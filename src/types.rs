// Snakepit API types
// Wire shapes follow the snakepit server protocol: board tiles travel as
// linear indices (index = y * width + x), directions as uppercase strings,
// events as type-tagged JSON objects.

use serde::{Deserialize, Serialize};

/// 2D tile coordinate. The snakepit board origin is the top-left corner,
/// y grows downward.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    /// Converts a linear tile index back to a coordinate.
    pub fn from_index(index: i32, width: i32) -> Coordinate {
        Coordinate {
            x: index % width,
            y: index / width,
        }
    }

    /// Converts this coordinate to its linear tile index.
    pub fn to_index(&self, width: i32) -> i32 {
        self.y * width + self.x
    }

    /// The coordinate one step away in the given direction.
    pub fn translate(&self, direction: Direction) -> Coordinate {
        match direction {
            Direction::Up => Coordinate { x: self.x, y: self.y - 1 },
            Direction::Down => Coordinate { x: self.x, y: self.y + 1 },
            Direction::Left => Coordinate { x: self.x - 1, y: self.y },
            Direction::Right => Coordinate { x: self.x + 1, y: self.y },
        }
    }

    pub fn manhattan_distance_to(&self, other: Coordinate) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// True iff the coordinate lies within [0,width) x [0,height).
    pub fn is_inside(&self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.x < width && self.y >= 0 && self.y < height
    }
}

/// The four movement directions a snake can be ordered to take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all possible directions
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Protocol spelling used in RegisterMove messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The direction that moves `from` onto `to`, if they are adjacent.
    pub fn between(from: Coordinate, to: Coordinate) -> Option<Direction> {
        match (to.x - from.x, to.y - from.y) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Classification of a single move, one step ahead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Destination is a snake part, an obstacle, or off the board
    Death,
    /// Destination holds food
    Points,
    Nothing,
}

/// A live snake as seen in one world snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    pub id: String,
    pub name: String,
    pub points: i32,
    /// Ordered head-first. Never empty: dead snakes arrive with empty
    /// position lists on the wire and are dropped when the world is built.
    pub positions: Vec<Coordinate>,
    /// Heading derived from the two most recent body segments
    pub direction: Direction,
}

impl Snake {
    pub fn head(&self) -> Coordinate {
        self.positions[0]
    }
}

/// Raw snake entry as it appears in a map update
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SnakeInfoWire {
    pub id: String,
    pub name: String,
    pub points: i32,
    pub positions: Vec<i32>,
}

/// Raw board state as it appears in a map update
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MapWire {
    pub width: i32,
    pub height: i32,
    pub world_tick: u32,
    pub snake_infos: Vec<SnakeInfoWire>,
    pub food_positions: Vec<i32>,
    pub obstacle_positions: Vec<i32>,
}

/// Per-tick map update addressed to one player
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MapUpdateMessage {
    pub game_tick: u32,
    pub game_id: String,
    pub receiving_player_id: String,
    pub map: MapWire,
}

/// Game lifecycle events, dispatched by kind.
/// Tag strings match the snakepit server event types.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(tag = "type")]
pub enum GameEvent {
    #[serde(
        rename = "se.cygni.snake.api.event.GameStartingEvent",
        rename_all = "camelCase"
    )]
    GameStarting {
        game_id: String,
        noof_players: u32,
        width: i32,
        height: i32,
    },
    #[serde(
        rename = "se.cygni.snake.api.event.SnakeDeadEvent",
        rename_all = "camelCase"
    )]
    SnakeDead {
        player_id: String,
        death_reason: String,
        x: i32,
        y: i32,
        game_id: String,
        game_tick: u32,
    },
    #[serde(
        rename = "se.cygni.snake.api.event.GameEndedEvent",
        rename_all = "camelCase"
    )]
    GameEnded {
        player_winner_id: String,
        game_id: String,
        game_tick: u32,
    },
}

/// Server-defined game tunables. The bot never interprets these; settings
/// omitted here are left at the server's defaults. Overrides for training
/// games come from Snake.toml and are passed through verbatim.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_noof_players: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_snake_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_ms_per_tick: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obstacles_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_to_tail_consumes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail_consume_grows: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_food_likelihood: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_food_likelihood: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spontaneous_growth_every_n_world_ticks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_game: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_per_length: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_per_food: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_per_caused_death: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_per_nibble: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noof_rounds_tail_protected_after_nibble: Option<u32>,
}

/// Message type string for the move registration response
pub const REGISTER_MOVE_TYPE: &str = "se.cygni.snake.api.request.RegisterMove";
