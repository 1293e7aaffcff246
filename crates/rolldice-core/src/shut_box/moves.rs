use super::error::MoveError;
use super::slots::Slots;

/// Applies a proposed move such as `"137"` to a copy of `slots`.
///
/// Every character must be a digit in `1..=9` naming a slot that is still open
/// (a repeated digit counts as closing an already closed slot), and the digits
/// must add up to `target`. The updated board is returned only when the whole
/// move is valid; `slots` itself is never touched.
pub fn process_proposed_update(slots: Slots, update: &str, target: u32) -> Result<Slots, MoveError> {
    if update.is_empty() {
        return Err(MoveError::InvalidDigit);
    }

    let mut working = slots;
    let mut combined = 0;
    for ch in update.chars() {
        let digit = match ch.to_digit(10) {
            Some(digit @ 1..=9) => digit,
            _ => return Err(MoveError::InvalidDigit),
        };

        if !working.close(digit) {
            return Err(MoveError::SlotAlreadyClosed { slot: digit });
        }
        combined += digit;
    }

    if combined != target {
        return Err(MoveError::NotEqualTarget {
            actual: combined,
            target,
        });
    }

    Ok(working)
}
