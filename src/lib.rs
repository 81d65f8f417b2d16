// Library exports for the snakepit bot
// This allows the replay tool and other utilities to use the core decision logic

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod engine;
pub mod replay;
pub mod types;
pub mod world;
