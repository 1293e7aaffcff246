use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{Level, event};

use rolldice::config::AppConfig;
use rolldice::console::Console;
use rolldice::logging::init_logging;
use rolldice::menu::{WELCOME, run_menu, run_shut_the_box};
use rolldice_core::AppInfo;
use rolldice_core::probability::{
    CoinFlip, DiceRoll, EventAction, EventReport, RngSource, validate_and_execute,
};

/// Coin flips, dice roll statistics and Shut the Box.
#[derive(Debug, Parser)]
#[command(
    name = "rolldice",
    author,
    version,
    about = "Coins, dice and Shut the Box"
)]
struct Cli {
    /// Path to the YAML configuration file (defaults to ./rolldice.yaml when present).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the RNG seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Run one operation; without a subcommand the interactive menu starts.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Flip a coin COUNT times and print the frequency table.
    Flip {
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        count: i64,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Roll a die COUNT times and print the frequency table.
    Roll {
        /// Number of sides: 4, 6, 10, 12 or 20.
        #[arg(short, long, default_value_t = 6, allow_negative_numbers = true)]
        sides: i64,

        #[arg(short = 'n', long, allow_negative_numbers = true)]
        count: i64,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Play Shut the Box.
    ShutTheBox {
        /// Comma separated player names; falls back to the config, then a prompt.
        #[arg(long, value_delimiter = ',')]
        players: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    if let Some(Command::ShutTheBox { players }) = &cli.command {
        if !players.is_empty() {
            config.players = players.clone();
        }
    }

    config.validate()?;

    let _logging_guard = init_logging(&config.logging)?;
    event!(
        target: "rolldice::app",
        Level::INFO,
        app = AppInfo::name(),
        version = AppInfo::version(),
        seed = ?config.seed,
        "starting"
    );

    let mut source = match config.seed {
        Some(seed) => RngSource::with_seed(seed),
        None => RngSource::from_entropy(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    match cli.command {
        None => {
            console.say(WELCOME)?;
            run_menu(&mut console, &mut source)?;
        }
        Some(Command::Flip { count, json }) => {
            execute(&mut console, &CoinFlip::new(count), &mut source, json)?;
        }
        Some(Command::Roll { sides, count, json }) => {
            execute(&mut console, &DiceRoll::new(count, sides), &mut source, json)?;
        }
        Some(Command::ShutTheBox { .. }) => {
            run_shut_the_box(&mut console, &mut source, config.players)?;
        }
    }

    Ok(())
}

fn execute<R, W, A>(
    console: &mut Console<R, W>,
    action: &A,
    source: &mut RngSource,
    json: bool,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
    A: EventAction,
{
    let report: EventReport = validate_and_execute(action, source)?;
    if json {
        let body = serde_json::to_string_pretty(&report).context("serializing report")?;
        console.say(format!("{body}\n"))?;
    } else {
        console.say(&report)?;
    }
    Ok(())
}
