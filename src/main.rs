use anyhow::{bail, Context, Result};
use chess_rules::{Position, UuidIds};
use chess_variant::core::{load_settings, settings_path, GameSettings};
use chess_variant::game::{GameSession, SavedGame};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chess_variant", about = "Chess variant rules on the command line")]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List legal moves in the opening position
    Moves {
        /// Only moves of the piece on this square, e.g. e2
        #[arg(long)]
        square: Option<String>,
    },
    /// Replay a saved game and print its moves and final board
    Replay { file: PathBuf },
    /// Play random legal moves until the game ends
    Playout {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 200)]
        max_moves: usize,
        /// Write the finished game here
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let settings = load_settings(&cli.settings.unwrap_or_else(settings_path));

    match cli.command {
        Command::Moves { square } => list_moves(settings, square.as_deref()),
        Command::Replay { file } => replay(settings, &file),
        Command::Playout { seed, max_moves, save } => playout(settings, seed, max_moves, save),
    }
}

fn list_moves(settings: GameSettings, square: Option<&str>) -> Result<()> {
    let mut game = GameSession::new(settings);
    let moves = match square {
        Some(text) => {
            let position = Position::from_algebraic(text)
                .with_context(|| format!("not a square: {text}"))?;
            game.legal_moves_at(position)
        }
        None => game.all_legal_moves(),
    };
    for mv in &moves {
        println!("{}", mv.describe());
    }
    println!("{} move(s)", moves.len());
    Ok(())
}

fn replay(settings: GameSettings, file: &Path) -> Result<()> {
    let saved = SavedGame::load_from_file(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let (game, report) = GameSession::restore(&saved, settings, Box::new(UuidIds))
        .with_context(|| format!("replaying {}", file.display()))?;
    for (position, kind) in &report.skipped {
        eprintln!("skipped unknown piece kind {kind:?} at {position}");
    }
    print_game(&game);
    Ok(())
}

fn playout(
    settings: GameSettings,
    seed: u64,
    max_moves: usize,
    save: Option<PathBuf>,
) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = GameSession::new(settings);

    for _ in 0..max_moves {
        if game.status().is_game_over() {
            break;
        }
        let moves = game.all_legal_moves();
        if moves.is_empty() {
            bail!("{} has no moves but the game is not over", game.turn());
        }
        let mv = &moves[rng.random_range(0..moves.len())];
        let origin = mv.origin();
        let click = mv
            .clickable_positions()
            .first()
            .copied()
            .with_context(|| format!("{} has nowhere to click", mv.describe()))?;

        game.on_piece_click(origin)?;
        let outcome = game
            .on_cell_click(click)?
            .with_context(|| format!("click on {click} did not commit a move"))?;
        if outcome.promotion_pending {
            game.resolve_promotion_by_importance()?;
        }
    }

    print_game(&game);
    if let Some(path) = save {
        game.save()
            .save_to_file(&path)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn print_game(game: &GameSession) {
    for (turn, pair) in game.history().notations().chunks(2).enumerate() {
        println!("{:>3}. {}", turn + 1, pair.join(" "));
    }
    println!("{}", game.board());
    println!("{}", game.status().message());
}
