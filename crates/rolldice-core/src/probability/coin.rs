use core::fmt;
use serde::{Deserialize, Serialize};

use super::action::EventAction;
use super::error::EventError;
use super::event::ProbabilisticEvent;
use super::source::RandomSource;
use super::table::{FrequencyTable, percent};

pub const HEADS: &str = "Heads";
pub const TAILS: &str = "Tails";

const COIN_FACES: [&str; 2] = [HEADS, TAILS];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coin {
    Heads,
    Tails,
}

impl Coin {
    pub const BOTH: [Coin; 2] = [Coin::Heads, Coin::Tails];

    pub const fn label(self) -> &'static str {
        match self {
            Coin::Heads => HEADS,
            Coin::Tails => TAILS,
        }
    }

    pub const fn short(self) -> char {
        match self {
            Coin::Heads => 'H',
            Coin::Tails => 'T',
        }
    }

    const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Coin::Heads),
            1 => Some(Coin::Tails),
            _ => None,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A batch of coin flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinFlip {
    event_count: i64,
}

impl CoinFlip {
    pub const fn new(event_count: i64) -> Self {
        Self { event_count }
    }
}

impl EventAction for CoinFlip {
    fn event_count(&self) -> i64 {
        self.event_count
    }

    fn outcomes(&self) -> &'static [&'static str] {
        &COIN_FACES
    }

    // (H) :  49.882126% : 61572
    // (T) :  50.117874% : 61863
    fn render(&self, table: &FrequencyTable) -> String {
        let total = self.event_count.max(0) as u64;
        Coin::BOTH
            .iter()
            .map(|coin| {
                let count = table.count(coin.label());
                format!(
                    "({}) : {:10.6}% : {}\n",
                    coin.short(),
                    percent(count, total),
                    count
                )
            })
            .collect()
    }
}

/// Flips a single coin.
pub fn flip_once<S: RandomSource + Send>(source: S) -> Result<Coin, EventError> {
    let index = ProbabilisticEvent::single(&COIN_FACES, source)?.draw_index()?;
    Coin::from_index(index).ok_or(EventError::SourceOutOfRange {
        index,
        outcomes: COIN_FACES.len(),
    })
}
