mod app;
mod command;
mod config;
mod consts;
mod game;
mod util;
use crate::app::App;
use crate::config::{Config, LoggingConfig};
use crate::game::Game;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use rand::{rngs::StdRng, SeedableRng};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Arguments),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    seed: Option<u64>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("seed") => args.seed = Some(parser.value()?.parse()?),
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(args))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(args) => args.run(),
            Command::Help => {
                println!("Usage: letterquest [-c|--config <file>] [--seed <int>]");
                println!();
                println!("Collect the letters in order, then the star.");
                println!();
                println!("Options:");
                println!("  -c, --config <file>  Read configuration from the given file");
                println!("      --seed <int>     Seed the random number generator");
                println!("  -h, --help           Display this help message and exit");
                println!("  -V, --version        Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("letterquest {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

impl Arguments {
    fn run(self) -> anyhow::Result<()> {
        let config = match self.config {
            Some(path) => Config::load(&path, false),
            None => Config::default_path().and_then(|path| Config::load(&path, true)),
        }
        .context("failed to load configuration")?;
        init_logging(&config.logging)?;
        log::debug!("Using configuration: {config:?}");
        let grid = config.grid.as_grid();
        let rules = config.rules.to_rules();
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let game = Game::new(grid, rules, rng).context("failed to set up game")?;
        let terminal = ratatui::init();
        let r = App::new(game).run(terminal);
        ratatui::restore();
        r
    }
}

/// Send log messages to the configured file.  The terminal belongs to the
/// game, so without a file nothing is logged.
fn init_logging(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let Some(ref path) = cfg.file else {
        return Ok(());
    };
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context("failed to open log file")?;
    env_logger::Builder::new()
        .parse_filters(cfg.level.as_deref().unwrap_or("info"))
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialize logger")?;
    Ok(())
}

fn main() -> ExitCode {
    let r = match Command::from_parser(Parser::from_env()) {
        Ok(cmd) => cmd.run(),
        Err(e) => Err(e.into()),
    };
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e)
            if e.downcast_ref::<std::io::Error>()
                .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("letterquest: {e:?}");
            ExitCode::from(2)
        }
    }
}
