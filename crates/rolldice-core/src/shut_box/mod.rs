pub mod error;
pub mod game;
pub mod moves;
pub mod slots;
pub mod solver;

pub use error::{GameError, MoveError, SlotsParseError};
pub use game::{MoveOutcome, Phase, PhaseKind, RollOutcome, ShutTheBox};
pub use moves::process_proposed_update;
pub use slots::{SIZE_BOX, Slots};
pub use solver::{has_solution, target_sum_exists};
