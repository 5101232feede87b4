//! Application services for the session context.

pub mod connections;
pub mod game_loop;
pub mod game_manager;
pub mod notification;
pub mod ports;
pub mod room_manager;
