//! Quizroom HTTP API — library surface for integration tests.

pub mod error;
pub mod routes;
pub mod state;
