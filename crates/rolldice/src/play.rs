use std::io::{self, BufRead, Write};

use rolldice_core::probability::RandomSource;
use rolldice_core::shut_box::{GameError, MoveOutcome, Phase, RollOutcome, ShutTheBox};
use thiserror::Error;
use tracing::{Level, event};

use crate::console::{Console, Input};

#[derive(Debug, Error)]
pub enum PlayError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("game error: {0}")]
    Game(#[from] GameError),
}

/// `Player 1`, `Player 2`, ...
pub fn default_player_names(count: usize) -> Vec<String> {
    (1..=count).map(|n| format!("Player {n}")).collect()
}

/// Runs Shut the Box on the console until the players stop.
///
/// An empty line at the move or continue prompt ends the game.
pub fn play_shut_the_box<R, W, S>(
    console: &mut Console<R, W>,
    source: &mut S,
    players: Vec<String>,
) -> Result<(), PlayError>
where
    R: BufRead,
    W: Write,
    S: RandomSource + Send,
{
    let mut game = ShutTheBox::new(players)?;
    event!(
        target: "rolldice::play",
        Level::INFO,
        players = game.players().len() as u64,
        "shut the box started"
    );

    loop {
        console.say(format!("\n\n{game}\n"))?;

        if matches!(game.phase(), Phase::Won) {
            console.say(format!(
                "\n\n{}, you have won!\n\n>>>> !!! Congratulations !!! <<<<\n",
                game.current_player()
            ))?;
            let keep_playing = continue_playing(console)?;
            game.continue_after_win(keep_playing)?;
            if game.is_finished() {
                return Ok(());
            }
            continue;
        }

        let target = match game.roll(&mut *source)? {
            RollOutcome::NoSolution {
                dice,
                target,
                player,
            } => {
                show_dice(console, dice)?;
                event!(
                    target: "rolldice::play",
                    Level::DEBUG,
                    target_sum = target,
                    "roll has no solution"
                );
                console.say(format!(
                    "\nSorry {player}, there is no possible solution. Next players turn\n\n"
                ))?;
                continue;
            }
            RollOutcome::Target { dice, target } => {
                show_dice(console, dice)?;
                target
            }
        };

        loop {
            console.say(format!(
                "\nTarget sum is '{target}' . Please enter open slots together:\n"
            ))?;
            let update = match console.read_line()? {
                Input::Line(update) => update,
                Input::Done | Input::Closed => {
                    console.say("Stopping current operation\n")?;
                    game.quit();
                    return Ok(());
                }
            };

            match game.submit_move(&update) {
                Ok(MoveOutcome::Closed { .. }) | Ok(MoveOutcome::Won { .. }) => break,
                Err(GameError::Move(err)) => {
                    console.say(format!("{err}\n"))?;
                    console.say(format!("\n\n{game}\n"))?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

fn show_dice<R: BufRead, W: Write>(console: &mut Console<R, W>, dice: [u32; 2]) -> io::Result<()> {
    for die in dice {
        console.say(format!("Rolled: [{die}]\n"))?;
    }
    Ok(())
}

/// Asks whether to keep playing until the answer is `y` or `n`.
/// An empty line counts as no.
fn continue_playing<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<bool> {
    loop {
        console.say("Would you like to keep playing? [y/n]\n")?;
        match console.read_line()? {
            Input::Line(answer) if answer == "y" => return Ok(true),
            Input::Line(answer) if answer == "n" => return Ok(false),
            Input::Line(_) => console.say("input error: expected 'y' or 'n'\n")?,
            Input::Done | Input::Closed => {
                console.say("Stopping current operation\n")?;
                return Ok(false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayError, continue_playing, default_player_names, play_shut_the_box};
    use crate::console::Console;
    use rolldice_core::probability::ReplaySource;
    use rolldice_core::shut_box::GameError;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_writer()).expect("utf8 output")
    }

    #[test]
    fn default_names_are_numbered() {
        assert_eq!(
            default_player_names(2),
            vec!["Player 1".to_string(), "Player 2".to_string()]
        );
    }

    #[test]
    fn move_errors_are_reported_and_reprompted() {
        // dice 4 + 5 = 9
        let mut source = ReplaySource::new([3, 4]);
        let mut console = console("45x\n18\n36\n\n");
        play_shut_the_box(&mut console, &mut source, vec!["ada".into()]).expect("game runs");

        let text = output(console);
        assert!(text.contains("Player: ada\n\n[1][2][3][4][5][6][7][8][9]"));
        assert!(text.contains("Rolled: [4]\nRolled: [5]\n"));
        assert!(text.contains("invalid digit input not in range [1,9]"));
        assert!(text.contains("[_][2][3][4][5][6][7][_][9]"));
        assert!(text.contains("Stopping current operation"));
    }

    #[test]
    fn mismatched_sum_leaves_board_open() {
        let mut source = ReplaySource::new([3, 4]);
        let mut console = console("45\n44\n\n");
        play_shut_the_box(&mut console, &mut source, vec!["ada".into()]).expect("game runs");
        let text = output(console);
        assert!(text.contains("[1][2][3][_][_][6][7][8][9]"));
        assert!(text.contains("slot 4 is already closed. Please try again"));
    }

    #[test]
    fn unsolvable_roll_passes_to_next_player() {
        // Every roll is 6 + 6. After 9+3, 8+4 and 7+5 only 1, 2 and 6 are
        // open, so ada loses the round.
        let mut source = ReplaySource::new([5, 5]);
        let mut console = console("93\n84\n75\n\n");
        play_shut_the_box(
            &mut console,
            &mut source,
            vec!["ada".into(), "bob".into()],
        )
        .expect("game runs");

        let text = output(console);
        assert!(text.contains("Sorry ada, there is no possible solution. Next players turn"));
        assert!(text.contains("Player: bob\n\n[1][2][3][4][5][6][7][8][9]"));
    }

    #[test]
    fn winner_is_asked_to_continue() {
        let mut console = console("y\nmaybe\nn\n");
        assert!(continue_playing(&mut console).expect("answer"));
        assert!(!continue_playing(&mut console).expect("answer"));
        let text = output(console);
        assert!(text.contains("input error: expected 'y' or 'n'"));
    }

    #[test]
    fn empty_roster_is_a_game_error() {
        let mut source = ReplaySource::new([0]);
        let mut console = console("");
        let err = play_shut_the_box(&mut console, &mut source, Vec::new()).expect_err("no players");
        assert!(matches!(err, PlayError::Game(GameError::NoPlayers)));
    }
}
