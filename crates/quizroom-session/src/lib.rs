//! Quizroom — Session orchestration bounded context.
//!
//! Responsible for room and player membership, game lifecycle, the timed
//! question-cycling tick loop, scoring aggregation, and at-least-once
//! notification delivery.

pub mod application;
pub mod domain;
