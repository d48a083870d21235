use anyhow::{Context, Result};
use canvas_snake::game::{Difficulty, GameConfig};
use canvas_snake::modes::HumanMode;
use canvas_snake::rating::FileStore;
use clap::{Parser, ValueEnum};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "canvas_snake")]
#[command(version, about = "Snake on a wrap-around grid with a per-difficulty leaderboard")]
struct Cli {
    /// Side of one cell in pixels
    #[arg(long, default_value = "20")]
    cell_size: u32,

    /// Number of cells along each side of the grid
    #[arg(long, default_value = "25")]
    cell_count: u32,

    /// Difficulty preselected in the start dialog
    #[arg(long, value_enum, default_value = "medium")]
    difficulty: DifficultyArg,

    /// Player name prefilled in the start dialog
    #[arg(long, default_value = "")]
    name: String,

    /// Directory holding the leaderboards
    #[arg(long, default_value = "snake_data")]
    data_dir: PathBuf,

    /// Log file (the terminal is taken by the game)
    #[arg(long, default_value = "snake.log")]
    log_file: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum DifficultyArg {
    /// 300 ms per tick
    Easy,
    /// 200 ms per tick
    Medium,
    /// 100 ms per tick
    Hard,
    /// 60 ms per tick
    Insane,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::easy(),
            DifficultyArg::Medium => Difficulty::medium(),
            DifficultyArg::Hard => Difficulty::hard(),
            DifficultyArg::Insane => Difficulty::insane(),
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "canvas_snake=info".into()))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    // Create game configuration from CLI arguments
    let config = GameConfig::new(cli.cell_size, cli.cell_count);
    let store = FileStore::new(&cli.data_dir);
    info!(
        cell_size = config.cell_size,
        cell_count = config.cell_count,
        data_dir = %cli.data_dir.display(),
        "starting"
    );

    let mut human_mode = HumanMode::new(config, store, &cli.name, cli.difficulty.into())?;
    human_mode.run().await?;

    Ok(())
}
