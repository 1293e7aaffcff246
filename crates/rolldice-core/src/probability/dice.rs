use super::action::EventAction;
use super::error::EventError;
use super::event::ProbabilisticEvent;
use super::source::RandomSource;
use super::table::{FrequencyTable, percent};

pub const D4: u32 = 4;
pub const D6: u32 = 6;
pub const D10: u32 = 10;
pub const D12: u32 = 12;
pub const D20: u32 = 20;

pub const VALID_DICE_TYPES: [u32; 5] = [D4, D6, D10, D12, D20];

/// Shown when prompting for a die type.
pub const VALID_DICE_TYPES_LABEL: &str = "(4, 6, 10, 12, 20)";

const DICE_FACES: [&str; 20] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20",
];

pub fn valid_dice_type(sides: i64) -> bool {
    VALID_DICE_TYPES.iter().any(|&valid| i64::from(valid) == sides)
}

fn faces(sides: i64) -> &'static [&'static str] {
    usize::try_from(sides)
        .ok()
        .and_then(|sides| DICE_FACES.get(..sides))
        .unwrap_or(&[])
}

/// A batch of rolls of one die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceRoll {
    event_count: i64,
    sides: i64,
}

impl DiceRoll {
    pub const fn new(event_count: i64, sides: i64) -> Self {
        Self { event_count, sides }
    }

    pub const fn sides(&self) -> i64 {
        self.sides
    }
}

impl EventAction for DiceRoll {
    fn event_count(&self) -> i64 {
        self.event_count
    }

    fn validate(&self) -> Result<(), EventError> {
        if !valid_dice_type(self.sides) {
            return Err(EventError::InvalidDiceType { sides: self.sides });
        }
        Ok(())
    }

    fn outcomes(&self) -> &'static [&'static str] {
        faces(self.sides)
    }

    // [1]  :  16.666667% : 2
    // ...
    // [6]  :  16.666667% : 2
    fn render(&self, table: &FrequencyTable) -> String {
        let total = self.event_count.max(0) as u64;
        self.outcomes()
            .iter()
            .map(|face| {
                let count = table.count(face);
                format!(
                    "{:<4} : {:10.6}% : {}\n",
                    format!("[{face}]"),
                    percent(count, total),
                    count
                )
            })
            .collect()
    }
}

/// Rolls a single die and returns the face value (`1..=sides`).
pub fn roll_once<S: RandomSource + Send>(sides: u32, source: S) -> Result<u32, EventError> {
    let outcomes = faces(i64::from(sides));
    if !valid_dice_type(i64::from(sides)) {
        return Err(EventError::InvalidDiceType {
            sides: i64::from(sides),
        });
    }
    let index = ProbabilisticEvent::single(outcomes, source)?.draw_index()?;
    Ok(index as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::{DiceRoll, roll_once, valid_dice_type};
    use crate::probability::action::validate_and_execute;
    use crate::probability::error::EventError;
    use crate::probability::source::ReplaySource;

    #[test]
    fn only_standard_dice_are_valid() {
        for sides in [4, 6, 10, 12, 20] {
            assert!(valid_dice_type(sides), "d{sides} should be valid");
        }
        for sides in [3, 5, 21, 0, -6, 100] {
            assert!(!valid_dice_type(sides), "d{sides} should be invalid");
        }
    }

    #[test]
    fn render_lists_every_face_in_order() {
        let roll = DiceRoll::new(4, 4);
        let report = validate_and_execute(&roll, ReplaySource::new([0, 0, 2, 6])).expect("valid");
        assert_eq!(
            report.rendered(),
            concat!(
                "[1]  :  50.000000% : 2\n",
                "[2]  :   0.000000% : 0\n",
                "[3]  :  50.000000% : 2\n",
                "[4]  :   0.000000% : 0\n",
            )
        );
    }

    #[test]
    fn twenty_sided_faces_cover_all_labels() {
        let roll = DiceRoll::new(20, 20);
        let sequence: Vec<u64> = (0..20).collect();
        let report = validate_and_execute(&roll, ReplaySource::new(sequence)).expect("valid");
        for face in 1..=20 {
            assert_eq!(report.table().count(&face.to_string()), 1);
        }
        assert_eq!(report.rendered().lines().count(), 20);
        assert!(report.rendered().contains("[20] :   5.000000% : 1"));
    }

    #[test]
    fn invalid_dice_type_rejected_after_count_check() {
        let err = validate_and_execute(&DiceRoll::new(10, 7), ReplaySource::new([0]))
            .expect_err("d7 is not a die");
        assert_eq!(err, EventError::InvalidDiceType { sides: 7 });

        let err = validate_and_execute(&DiceRoll::new(0, 7), ReplaySource::new([0]))
            .expect_err("count checked first");
        assert_eq!(err, EventError::InvalidEventCount { count: 0 });
    }

    #[test]
    fn single_roll_returns_face_value() {
        let mut source = ReplaySource::new([0, 5, 13]);
        assert_eq!(roll_once(6, &mut source).expect("roll"), 1);
        assert_eq!(roll_once(6, &mut source).expect("roll"), 6);
        assert_eq!(roll_once(6, &mut source).expect("roll"), 2);
        assert_eq!(
            roll_once(7, &mut source).expect_err("d7"),
            EventError::InvalidDiceType { sides: 7 }
        );
    }
}
