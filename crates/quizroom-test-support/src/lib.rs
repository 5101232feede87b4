//! Shared test mocks and utilities for the Quizroom session engine.

mod clock;
mod random;
mod stores;

pub use clock::FixedClock;
pub use random::{SequenceRandom, ZeroRandom};
pub use stores::{FailingAnswerStore, FailingQuestionStore, FlakyNotifier, RecordingNotifier};
