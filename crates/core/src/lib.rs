#![forbid(unsafe_code)]

//! Domain model for career-skills quizzes: questions, session state, and
//! scoring. Everything here is synchronous and side-effect free; persistence
//! and remote calls live in the `storage` and `services` crates.

pub mod error;
pub mod model;
pub mod time;

pub use error::Error;
pub use time::Clock;
