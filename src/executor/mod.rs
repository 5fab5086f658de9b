//! Trigger execution engine
//!
//! Provides the sequential runner and its pause abstraction.

mod delay;
mod runner;

pub use delay::{Delay, TokioDelay};
pub use runner::SequentialRunner;
