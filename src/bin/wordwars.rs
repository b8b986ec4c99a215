//! Word Wars - hot-seat console game
//!
//! Players take turns at one terminal. Each turn reads one command from
//! stdin:
//!
//! ```text
//! play <x> <y> <across|down> <word>
//! skip
//! cancel
//! quit
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use word_wars::{
    Direction, GameId, GameService, InMemoryHistory, InMemoryRepository, MoveRequest, PlayerId,
    WordWarsConfig,
};

/// Play Word Wars at the terminal
#[derive(Parser, Debug)]
#[command(name = "wordwars")]
#[command(about = "Hot-seat word placement game", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for tile draws (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Player name, in turn order (repeat for each player)
    #[arg(short, long = "player", required = true)]
    players: Vec<String>,
}

/// One line of player input.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Play(MoveRequest),
    Skip,
    Cancel,
    Quit,
}

impl std::str::FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["play", x, y, direction, word] => {
                let x = x.parse().map_err(|_| format!("bad column '{x}'"))?;
                let y = y.parse().map_err(|_| format!("bad row '{y}'"))?;
                let direction: Direction = direction.parse()?;
                Ok(Command::Play(MoveRequest::play(x, y, direction, *word)))
            }
            ["skip"] => Ok(Command::Skip),
            ["cancel"] => Ok(Command::Cancel),
            ["quit"] | ["exit"] => Ok(Command::Quit),
            _ => Err("expected: play <x> <y> <across|down> <word> | skip | cancel | quit".into()),
        }
    }
}

type Service = GameService<InMemoryRepository, InMemoryHistory>;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => WordWarsConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => WordWarsConfig::default(),
    };
    if cli.seed.is_some() {
        config.game.seed = cli.seed;
    }
    config.validate()?;
    debug!(?config, "configuration loaded");

    let mut service = Service::new(InMemoryRepository::new(), InMemoryHistory::new(), &config);
    let id = service.new_game()?;
    for name in &cli.players {
        service.add_player(id, PlayerId::new(name.as_str()))?;
    }
    service.start_game(id)?;
    info!(%id, players = cli.players.len(), "hot-seat game started");

    run(&mut service, id)
}

fn run(service: &mut Service, id: GameId) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let game = service.game(id)?;
        println!("{game}");
        if game.game_over() {
            break;
        }
        let Some(up) = game.current_player() else {
            bail!("game {id} has nobody to move");
        };
        let player = up.player().clone();

        print!("{player}> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let request = match line.parse::<Command>() {
            Ok(Command::Play(request)) => request,
            Ok(Command::Skip) => MoveRequest::skip(),
            Ok(Command::Cancel) => {
                service.cancel_game(id)?;
                continue;
            }
            Ok(Command::Quit) => break,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match service.make_move(id, &player, &request) {
            Ok(report) if !report.description.is_empty() => println!("{}", report.description),
            Ok(_) => {}
            Err(e) if e.is_recoverable() => println!("{e}"),
            Err(e) => return Err(e.into()),
        }
    }

    for record in service.game_history(id)? {
        println!("{record}");
    }
    Ok(())
}
