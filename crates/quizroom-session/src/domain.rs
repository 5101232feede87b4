//! Entities and value types for the session context.

pub mod evaluation;
pub mod game;
pub mod player;
pub mod question;
pub mod room;
pub mod score;
