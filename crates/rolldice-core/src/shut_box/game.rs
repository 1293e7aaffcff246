use core::fmt;
use tracing::{Level, event};

use super::error::GameError;
use super::moves::process_proposed_update;
use super::slots::Slots;
use super::solver::has_solution;
use crate::probability::{D6, RandomSource, roll_once};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingRoll,
    AwaitingMove { target: u32 },
    Won,
    Finished,
}

/// Phase without its payload, used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    AwaitingRoll,
    AwaitingMove,
    Won,
    Finished,
}

impl Phase {
    pub const fn kind(self) -> PhaseKind {
        match self {
            Phase::AwaitingRoll => PhaseKind::AwaitingRoll,
            Phase::AwaitingMove { .. } => PhaseKind::AwaitingMove,
            Phase::Won => PhaseKind::Won,
            Phase::Finished => PhaseKind::Finished,
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PhaseKind::AwaitingRoll => "awaiting a roll",
            PhaseKind::AwaitingMove => "awaiting a move",
            PhaseKind::Won => "won",
            PhaseKind::Finished => "finished",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollOutcome {
    /// Some combination of open slots reaches the target; a move is expected.
    Target { dice: [u32; 2], target: u32 },
    /// Nothing reaches the target. The round is lost, the board reopened and
    /// play passed to the next player.
    NoSolution {
        dice: [u32; 2],
        target: u32,
        player: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Closed { slots: Slots },
    Won { winner: String },
}

/// Shut the Box for a fixed rotation of local players.
#[derive(Debug, Clone)]
pub struct ShutTheBox {
    slots: Slots,
    players: Vec<String>,
    current: usize,
    phase: Phase,
}

impl ShutTheBox {
    pub fn new(players: Vec<String>) -> Result<Self, GameError> {
        if players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        Ok(Self {
            slots: Slots::OPEN,
            players,
            current: 0,
            phase: Phase::AwaitingRoll,
        })
    }

    pub fn slots(&self) -> Slots {
        self.slots
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> &str {
        &self.players[self.current]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    /// Passes play to the next player, wrapping after the last one.
    pub fn next_player(&mut self) -> usize {
        self.current = (self.current + 1) % self.players.len();
        self.current
    }

    pub fn reset_box(&mut self) {
        self.slots = Slots::OPEN;
    }

    /// Reopens the board for the next player's round.
    pub fn next_turn(&mut self) {
        self.reset_box();
        self.next_player();
        self.phase = Phase::AwaitingRoll;
    }

    /// Rolls two six-sided dice for the current player.
    pub fn roll<S: RandomSource + Send>(&mut self, mut source: S) -> Result<RollOutcome, GameError> {
        self.expect_phase(PhaseKind::AwaitingRoll)?;
        let first = roll_once(D6, &mut source)?;
        let second = roll_once(D6, &mut source)?;
        self.apply_roll([first, second])
    }

    /// Resolves an already rolled pair of dice.
    pub fn apply_roll(&mut self, dice: [u32; 2]) -> Result<RollOutcome, GameError> {
        self.expect_phase(PhaseKind::AwaitingRoll)?;
        let target = dice[0] + dice[1];

        if !has_solution(self.slots, target) {
            let player = self.current_player().to_string();
            event!(
                target: "rolldice::shut_box",
                Level::INFO,
                player = %player,
                target_sum = target,
                board = %self.slots,
                "no combination reaches target; round lost"
            );
            self.next_turn();
            return Ok(RollOutcome::NoSolution {
                dice,
                target,
                player,
            });
        }

        self.phase = Phase::AwaitingMove { target };
        Ok(RollOutcome::Target { dice, target })
    }

    /// Closes the slots named in `update` when they add up to the target.
    /// Nothing changes when the move is rejected.
    pub fn submit_move(&mut self, update: &str) -> Result<MoveOutcome, GameError> {
        let Phase::AwaitingMove { target } = self.phase else {
            return Err(self.wrong_phase(PhaseKind::AwaitingMove));
        };

        self.slots = process_proposed_update(self.slots, update, target)?;
        event!(
            target: "rolldice::shut_box",
            Level::DEBUG,
            player = %self.current_player(),
            update,
            target_sum = target,
            board = %self.slots,
            "move committed"
        );

        if self.slots.is_shut() {
            let winner = self.current_player().to_string();
            event!(
                target: "rolldice::shut_box",
                Level::INFO,
                winner = %winner,
                "box shut"
            );
            self.phase = Phase::Won;
            return Ok(MoveOutcome::Won { winner });
        }

        self.phase = Phase::AwaitingRoll;
        Ok(MoveOutcome::Closed { slots: self.slots })
    }

    /// After a win either start a new round with the next player or end the game.
    pub fn continue_after_win(&mut self, keep_playing: bool) -> Result<(), GameError> {
        self.expect_phase(PhaseKind::Won)?;
        if keep_playing {
            self.next_turn();
        } else {
            self.phase = Phase::Finished;
        }
        Ok(())
    }

    pub fn quit(&mut self) {
        self.phase = Phase::Finished;
    }

    fn expect_phase(&self, expected: PhaseKind) -> Result<(), GameError> {
        if self.phase.kind() != expected {
            return Err(self.wrong_phase(expected));
        }
        Ok(())
    }

    fn wrong_phase(&self, expected: PhaseKind) -> GameError {
        GameError::WrongPhase {
            expected,
            found: self.phase.kind(),
        }
    }
}

// Player: p1
//
// [_][2][3][_][5][6][_][8][9]
impl fmt::Display for ShutTheBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player: {}\n\n{}", self.current_player(), self.slots)
    }
}

#[cfg(test)]
mod tests {
    use super::{MoveOutcome, Phase, PhaseKind, RollOutcome, ShutTheBox};
    use crate::probability::ReplaySource;
    use crate::shut_box::error::{GameError, MoveError};
    use crate::shut_box::slots::Slots;

    fn players(count: usize) -> Vec<String> {
        (1..=count).map(|n| format!("p{n}")).collect()
    }

    #[test]
    fn empty_player_list_rejected() {
        assert_eq!(
            ShutTheBox::new(Vec::new()).expect_err("no players"),
            GameError::NoPlayers
        );
    }

    #[test]
    fn next_player_wraps_around() {
        let mut game = ShutTheBox::new(players(4)).expect("game");
        let seen: Vec<usize> = (0..4).map(|_| game.next_player()).collect();
        assert_eq!(seen, vec![1, 2, 3, 0]);
        assert_eq!(game.current_player(), "p1");
    }

    #[test]
    fn roll_sets_target_from_both_dice() {
        let mut game = ShutTheBox::new(players(2)).expect("game");
        let outcome = game.roll(ReplaySource::new([2, 4])).expect("roll");
        assert_eq!(
            outcome,
            RollOutcome::Target {
                dice: [3, 5],
                target: 8
            }
        );
        assert_eq!(game.phase(), Phase::AwaitingMove { target: 8 });
        assert_eq!(game.slots(), Slots::OPEN, "checking solvability uses a copy");
    }

    #[test]
    fn rejected_move_keeps_board_and_target() {
        let mut game = ShutTheBox::new(players(1)).expect("game");
        game.apply_roll([4, 4]).expect("roll");
        assert_eq!(
            game.submit_move("45").expect_err("9 != 8"),
            GameError::Move(MoveError::NotEqualTarget {
                actual: 9,
                target: 8
            })
        );
        assert_eq!(game.slots(), Slots::OPEN);
        assert_eq!(game.phase(), Phase::AwaitingMove { target: 8 });

        let outcome = game.submit_move("35").expect("valid move");
        assert_eq!(
            outcome,
            MoveOutcome::Closed {
                slots: "[1][2][_][4][_][6][7][8][9]".parse().expect("board")
            }
        );
        assert_eq!(game.phase(), Phase::AwaitingRoll);
    }

    #[test]
    fn unsolvable_roll_loses_round_and_rotates() {
        let mut game = ShutTheBox::new(players(3)).expect("game");
        game.apply_roll([6, 6]).expect("roll");
        game.submit_move("939").expect_err("9 twice");
        game.submit_move("75").expect("close 7 and 5");
        game.apply_roll([6, 6]).expect("roll");
        game.submit_move("93").expect("close 9 and 3");
        // open: 1 2 4 6 8, 12 = 4 + 8
        game.apply_roll([6, 6]).expect("roll");
        game.submit_move("48").expect("close 4 and 8");
        // open: 1 2 6, nothing reaches 12
        let outcome = game.apply_roll([6, 6]).expect("roll");
        assert_eq!(
            outcome,
            RollOutcome::NoSolution {
                dice: [6, 6],
                target: 12,
                player: "p1".to_string()
            }
        );
        assert_eq!(game.current_index(), 1);
        assert_eq!(game.slots(), Slots::OPEN);
        assert_eq!(game.phase(), Phase::AwaitingRoll);
    }

    #[test]
    fn shutting_the_box_wins_and_can_continue() {
        let mut game = ShutTheBox::new(players(2)).expect("game");
        for (dice, update) in [
            ([6, 3], "9"),
            ([4, 4], "8"),
            ([5, 2], "7"),
            ([3, 3], "6"),
            ([1, 4], "5"),
            ([2, 2], "4"),
            ([5, 1], "123"),
        ] {
            assert!(matches!(
                game.apply_roll(dice).expect("roll"),
                RollOutcome::Target { .. }
            ));
            let outcome = game.submit_move(update).expect("valid move");
            if update == "123" {
                assert_eq!(
                    outcome,
                    MoveOutcome::Won {
                        winner: "p1".to_string()
                    }
                );
            }
        }
        assert_eq!(game.phase(), Phase::Won);
        assert!(game.slots().is_shut());

        game.continue_after_win(true).expect("continue");
        assert_eq!(game.current_player(), "p2");
        assert_eq!(game.slots(), Slots::OPEN);
        assert_eq!(game.phase(), Phase::AwaitingRoll);
    }

    #[test]
    fn declining_after_win_finishes() {
        let mut game = ShutTheBox::new(players(1)).expect("game");
        game.slots = Slots::from_bits(1 << 7);
        game.apply_roll([4, 4]).expect("roll");
        game.submit_move("8").expect("last slot");
        game.continue_after_win(false).expect("stop");
        assert!(game.is_finished());
    }

    #[test]
    fn out_of_phase_calls_are_rejected() {
        let mut game = ShutTheBox::new(players(1)).expect("game");
        assert_eq!(
            game.submit_move("5").expect_err("no roll yet"),
            GameError::WrongPhase {
                expected: PhaseKind::AwaitingMove,
                found: PhaseKind::AwaitingRoll
            }
        );
        game.apply_roll([1, 1]).expect("roll");
        assert!(matches!(
            game.apply_roll([1, 1]),
            Err(GameError::WrongPhase { .. })
        ));
        assert!(matches!(
            game.continue_after_win(true),
            Err(GameError::WrongPhase { .. })
        ));
    }

    #[test]
    fn display_shows_player_and_board() {
        let game = ShutTheBox::new(players(2)).expect("game");
        assert_eq!(
            game.to_string(),
            "Player: p1\n\n[1][2][3][4][5][6][7][8][9]"
        );
    }
}
