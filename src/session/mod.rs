//! Game sessions: the per-puzzle state machine.
//!
//! - [`GameSession`]: owns one puzzle's mutable progress
//! - [`GameSessionState`]: immutable snapshot read by the UI
//! - [`Attempt`]: one recorded try
//!
//! A session is exclusively owned by its caller for the lifetime of one
//! puzzle. Switching puzzles means dropping the session.

mod game;
mod state;

pub use game::GameSession;
pub use state::{Attempt, GameSessionState, GameStatus};
