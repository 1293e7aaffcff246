pub mod action;
pub mod coin;
pub mod dice;
pub mod error;
pub mod event;
pub mod source;
pub mod table;

pub use action::{EventAction, EventReport, validate_and_execute};
pub use coin::{Coin, CoinFlip, flip_once};
pub use dice::{D6, DiceRoll, VALID_DICE_TYPES, VALID_DICE_TYPES_LABEL, roll_once, valid_dice_type};
pub use error::EventError;
pub use event::{ProbabilisticEvent, generate};
pub use source::{RandomSource, ReplaySource, RngSource};
pub use table::{FrequencyTable, percent};
