//! Tactic progression engine: session state machine, the operations a UI
//! drives, tick-based scheduling, and the embedded tactic collection.

pub mod logic;
pub mod repository;
pub mod types;

pub use logic::{process_input, tick, TrainerInput};
// `RepositoryError` is only consumed through the library crate, not the binary.
#[allow(unused_imports)]
pub use repository::{RepositoryError, TacticRepository};
pub use types::{MoveFeedback, SessionStatus, TacticSession};
