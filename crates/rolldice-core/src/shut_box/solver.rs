use super::slots::Slots;

/// Whether some set of open slots adds up to exactly `target`.
///
/// Slots that form one witnessing set are closed in `slots` when a set is
/// found; on failure `slots` is left as it was. Callers that only need the
/// answer should pass a copy.
///
/// A target that is itself an open slot is taken directly. Otherwise every
/// split `target = low + high` with `low < high` is tried, starting from
/// `low = 1`, solving `low` first and then `high` against what remains. A
/// failed split restores the board before the next one.
pub fn target_sum_exists(slots: &mut Slots, target: u32) -> bool {
    if slots.close(target) {
        return true;
    }

    let snapshot = *slots;
    let mut low = 1;
    let mut high = target.saturating_sub(1);

    while low < high {
        if target_sum_exists(slots, low) && target_sum_exists(slots, high) {
            return true;
        }
        *slots = snapshot;
        low += 1;
        high -= 1;
    }

    false
}

/// Non-consuming form of [`target_sum_exists`].
pub fn has_solution(slots: Slots, target: u32) -> bool {
    let mut scratch = slots;
    target_sum_exists(&mut scratch, target)
}
