use std::io::{self, BufRead, Write};

use rolldice_core::probability::{
    CoinFlip, DiceRoll, EventAction, RandomSource, VALID_DICE_TYPES_LABEL, validate_and_execute,
};
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{MAX_PLAYERS, validate_players};
use crate::console::{Console, Input, SYNTAX_ERR_EXPECTED_INT};
use crate::play::{PlayError, default_player_names, play_shut_the_box};

pub const ERR_UNSUPPORTED: &str = "unsupported option";

pub const WELCOME: &str = "--------------- Welcome ---------------\n\
\nSelect the menu option using the associated\n\
integer. Additionally, an empty input\n\
indicates you are 'done' while executing an\n\
operation, returning execution to the main menu\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Exit = 0,
    FlipCoins = 1,
    RollDice = 2,
    ShutTheBox = 3,
}

impl MenuOption {
    pub const ALL: [MenuOption; 4] = [
        MenuOption::Exit,
        MenuOption::FlipCoins,
        MenuOption::RollDice,
        MenuOption::ShutTheBox,
    ];

    pub fn from_number(number: i64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|option| option.number() == number)
    }

    pub const fn number(self) -> i64 {
        self as i64
    }

    pub const fn name(self) -> &'static str {
        match self {
            MenuOption::Exit => "Exit",
            MenuOption::FlipCoins => "Flip Coins",
            MenuOption::RollDice => "Roll Dice",
            MenuOption::ShutTheBox => "Shut the Box",
        }
    }
}

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Play(#[from] PlayError),
}

/// Shows the menu and runs options until Exit is chosen or input ends.
pub fn run_menu<R, W, S>(console: &mut Console<R, W>, source: &mut S) -> Result<(), MenuError>
where
    R: BufRead,
    W: Write,
    S: RandomSource + Send,
{
    loop {
        show_options(console)?;
        let number = match console.read_line()? {
            Input::Line(text) => match text.parse::<i64>() {
                Ok(number) => number,
                Err(_) => {
                    console.say(format!("{SYNTAX_ERR_EXPECTED_INT}\n"))?;
                    continue;
                }
            },
            Input::Done => {
                console.say(format!("{ERR_UNSUPPORTED}\n"))?;
                continue;
            }
            Input::Closed => {
                event!(target: "rolldice::menu", Level::DEBUG, "input closed");
                return Ok(());
            }
        };

        let Some(option) = MenuOption::from_number(number) else {
            console.say(format!("{ERR_UNSUPPORTED}\n"))?;
            continue;
        };
        event!(
            target: "rolldice::menu",
            Level::DEBUG,
            option = option.name(),
            "menu option selected"
        );

        match option {
            MenuOption::Exit => {
                console.say("Exiting now ...\n")?;
                return Ok(());
            }
            MenuOption::FlipCoins => flip_coins(console, &mut *source)?,
            MenuOption::RollDice => roll_dice(console, &mut *source)?,
            MenuOption::ShutTheBox => run_shut_the_box(console, &mut *source, Vec::new())?,
        }
    }
}

fn show_options<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<()> {
    console.say("\n\nPlease enter the option number\n\nRegistered Options:\n\n")?;
    for option in MenuOption::ALL {
        console.say(format!("\t{}) {}\n", option.number(), option.name()))?;
    }
    Ok(())
}

fn flip_coins<R, W, S>(console: &mut Console<R, W>, source: &mut S) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    S: RandomSource + Send,
{
    while let Some(count) = console.ask_int("Please enter the number of coin flips:\n")? {
        run_action(console, &CoinFlip::new(count), &mut *source)?;
    }
    Ok(())
}

fn roll_dice<R, W, S>(console: &mut Console<R, W>, source: &mut S) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    S: RandomSource + Send,
{
    let sides_prompt = format!("Please select the number of dice sides {VALID_DICE_TYPES_LABEL}:\n");
    loop {
        let Some(sides) = console.ask_int(&sides_prompt)? else {
            return Ok(());
        };
        let Some(count) = console.ask_int("Please enter the number of dice rolls:\n")? else {
            return Ok(());
        };
        run_action(console, &DiceRoll::new(count, sides), &mut *source)?;
    }
}

/// Prints the rendered report, or the error when the action is rejected.
fn run_action<R, W, A, S>(console: &mut Console<R, W>, action: &A, source: S) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    A: EventAction,
    S: RandomSource + Send,
{
    match validate_and_execute(action, source) {
        Ok(report) => console.say(format!("\n{report}")),
        Err(err) => {
            event!(
                target: "rolldice::menu",
                Level::DEBUG,
                error = %err,
                "action rejected"
            );
            console.say(format!("{err}\n"))
        }
    }
}

/// Runs Shut the Box for `players`, asking for a roster first when none is given.
pub fn run_shut_the_box<R, W, S>(
    console: &mut Console<R, W>,
    source: &mut S,
    players: Vec<String>,
) -> Result<(), PlayError>
where
    R: BufRead,
    W: Write,
    S: RandomSource + Send,
{
    let players = if players.is_empty() {
        match prompt_players(console)? {
            Some(players) => players,
            None => return Ok(()),
        }
    } else {
        players
    };
    play_shut_the_box(console, source, players)
}

/// Asks for a roster until it passes validation. `None` when the user is done.
fn prompt_players<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> io::Result<Option<Vec<String>>> {
    loop {
        let Some(count) = prompt_player_count(console)? else {
            return Ok(None);
        };

        let mut players = default_player_names(count);
        for (index, player) in players.iter_mut().enumerate() {
            console.say(format!("Please enter the name of player {}:\n", index + 1))?;
            match console.read_line()? {
                Input::Line(name) => *player = name,
                Input::Done => {}
                Input::Closed => return Ok(None),
            }
        }

        match validate_players(&mut players) {
            Ok(()) => return Ok(Some(players)),
            Err(err) => {
                event!(
                    target: "rolldice::menu",
                    Level::DEBUG,
                    error = %err,
                    "roster rejected"
                );
                console.say(format!("{err}\n"))?;
            }
        }
    }
}

fn prompt_player_count<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> io::Result<Option<usize>> {
    loop {
        let Some(count) = console.ask_int("Please enter the number of players:\n")? else {
            return Ok(None);
        };
        match usize::try_from(count) {
            Ok(count @ 1..=MAX_PLAYERS) => return Ok(Some(count)),
            _ => console.say(format!(
                "number of players must be between 1 and {MAX_PLAYERS}\n"
            ))?,
        }
    }
}
