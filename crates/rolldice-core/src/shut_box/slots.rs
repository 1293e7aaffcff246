use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use super::error::SlotsParseError;

/// Number of slots on the board.
pub const SIZE_BOX: u32 = 9;

const MASK: u16 = (1 << SIZE_BOX) - 1;
const EMPTY_SLOT: &str = "[_]";
const SLOT_WIDTH: usize = 3;

/// Open/closed state of the nine slots. Bit `i` holds slot value `i + 1`;
/// a set bit means the slot is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slots(u16);

impl Slots {
    pub const OPEN: Slots = Slots(MASK);
    pub const SHUT: Slots = Slots(0);

    pub const fn from_bits(bits: u16) -> Self {
        Slots(bits & MASK)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Whether slot `value` is open. Values outside `1..=9` are never open.
    pub const fn is_open(self, value: u32) -> bool {
        match bit(value) {
            Some(bit) => self.0 & bit != 0,
            None => false,
        }
    }

    /// Closes slot `value`, returning whether it was open.
    pub fn close(&mut self, value: u32) -> bool {
        if !self.is_open(value) {
            return false;
        }
        if let Some(bit) = bit(value) {
            self.0 &= !bit;
        }
        true
    }

    pub const fn is_shut(self) -> bool {
        self.0 == 0
    }

    pub fn open_values(self) -> impl Iterator<Item = u32> {
        (1..=SIZE_BOX).filter(move |&value| self.is_open(value))
    }
}

impl Default for Slots {
    fn default() -> Self {
        Slots::OPEN
    }
}

const fn bit(value: u32) -> Option<u16> {
    if value >= 1 && value <= SIZE_BOX {
        Some(1 << (value - 1))
    } else {
        None
    }
}

// [_][2][3][_][5][6][_][8][9]
impl fmt::Display for Slots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in 1..=SIZE_BOX {
            if self.is_open(value) {
                write!(f, "[{value}]")?;
            } else {
                f.write_str(EMPTY_SLOT)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Slots {
    type Err = SlotsParseError;

    fn from_str(display: &str) -> Result<Self, Self::Err> {
        let expected = SLOT_WIDTH * SIZE_BOX as usize;
        if display.len() != expected || !display.is_ascii() {
            return Err(SlotsParseError::Length {
                expected,
                found: display.len(),
            });
        }

        let mut slots = Slots::SHUT;
        for (index, cell) in display.as_bytes().chunks(SLOT_WIDTH).enumerate() {
            let value = index as u32 + 1;
            match cell {
                b"[_]" => {}
                [b'[', digit, b']'] if u32::from(digit.wrapping_sub(b'0')) == value => {
                    slots.0 |= 1 << index;
                }
                _ => {
                    return Err(SlotsParseError::Slot {
                        slot: value,
                        found: String::from_utf8_lossy(cell).into_owned(),
                    });
                }
            }
        }
        Ok(slots)
    }
}
