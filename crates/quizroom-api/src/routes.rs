//! Route modules.

pub mod games;
pub mod health;
pub mod rooms;
