// HTTP handler bindings for the snakepit bot endpoints
//
// This module provides thin wrapper functions that bind Rocket HTTP routes
// to the Bot's core logic methods. Handlers are responsible for:
// - Deserializing incoming JSON messages
// - Extracting Bot instance from Rocket's managed state
// - Delegating to Bot methods
// - Serializing responses
//
// The websocket relay that talks to the snakepit server proper lives
// outside this crate; it forwards server messages here and submits the
// RegisterMove answers back.

use log::error;
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use serde_json::Value;

use crate::bot::Bot;
use crate::types::{GameEvent, MapUpdateMessage};

/// GET / endpoint
/// Returns bot metadata and the training-game settings pass-through
#[get("/")]
pub fn index(bot: &rocket::State<Bot>) -> Json<Value> {
    Json(bot.info())
}

/// POST /start endpoint
/// Convenience route for relays that deliver the GameStartingEvent separately
#[post("/start", format = "json", data = "<event>")]
pub fn start(bot: &rocket::State<Bot>, event: Json<GameEvent>) -> Status {
    bot.on_event(&event);
    Status::Ok
}

/// POST /move endpoint
/// Called each tick with a map update; answers the RegisterMove message.
/// Malformed snapshots are rejected here instead of propagating inward.
#[post("/move", format = "json", data = "<move_req>")]
pub async fn get_move(
    bot: &rocket::State<Bot>,
    move_req: Json<MapUpdateMessage>,
) -> Result<Json<Value>, status::Custom<String>> {
    match bot.get_move(&move_req) {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            error!("Rejecting move request: {}", e);
            Err(status::Custom(Status::BadRequest, e))
        }
    }
}

/// POST /event endpoint
/// Generic dispatch for any game lifecycle event (snake died, game ended)
#[post("/event", format = "json", data = "<event>")]
pub fn event(bot: &rocket::State<Bot>, event: Json<GameEvent>) -> Status {
    bot.on_event(&event);
    Status::Ok
}

/// POST /end endpoint
/// Convenience route for relays that deliver the GameEndedEvent separately
#[post("/end", format = "json", data = "<event>")]
pub fn end(bot: &rocket::State<Bot>, event: Json<GameEvent>) -> Status {
    bot.on_event(&event);
    Status::Ok
}
