//! Quizroom Core — shared abstractions.
//!
//! This crate defines the error taxonomy and the small set of traits
//! (clock, randomness, retry) that every other crate depends on. It
//! contains no domain code.

pub mod clock;
pub mod error;
pub mod random;
pub mod retry;
