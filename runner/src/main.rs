mod config;
mod game_loop;
mod input;
mod renderer;

use clap::{Parser, ValueEnum};
use grid_snake_common::games::SessionRng;
use grid_snake_common::games::snake::{BotType, GridSimulation, SimulationSettings};
use grid_snake_common::{log, logger};
use tokio::sync::mpsc;

use config::get_config_manager;
use game_loop::{run_game_loop, GameLoopOptions};
use input::spawn_stdin_reader;
use renderer::render_board;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BotArg {
    Efficient,
    Random,
}

impl From<BotArg> for BotType {
    fn from(arg: BotArg) -> Self {
        match arg {
            BotArg::Efficient => BotType::Efficient,
            BotArg::Random => BotType::Random,
        }
    }
}

#[derive(Parser)]
#[command(name = "grid_snake_runner", about = "Plays grid snake in the terminal")]
struct Args {
    /// YAML config file; defaults to grid_snake_config.yaml next to the executable
    #[arg(long)]
    config: Option<String>,

    /// Seed for board generation; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Let a bot steer instead of reading commands
    #[arg(long, value_enum)]
    bot: Option<BotArg>,

    /// Number of games to play before exiting (bot mode defaults to 1)
    #[arg(long)]
    rounds: Option<u32>,

    /// Save the effective config to the config path before playing
    #[arg(long)]
    write_config: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Runner".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let (config_path, config_manager) = get_config_manager(args.config.as_deref());
    let config = config_manager.get_config()?;
    log!("Using config {}", config_path);

    if args.write_config {
        config_manager.set_config(&config)?;
        log!("Config written to {}", config_path);
    }

    let rng = args.seed.map(SessionRng::new).unwrap_or_else(SessionRng::from_random);
    let mut simulation = GridSimulation::new(SimulationSettings::from(&config.snake), rng)?;
    let bot_rng = SessionRng::new(simulation.seed()).derive(1);

    let bot = args.bot.map(BotType::from);
    let rounds = args.rounds.or(bot.map(|_| 1));

    let (command_tx, mut command_rx) = mpsc::unbounded_channel();
    if let Some(bot_type) = bot {
        drop(command_tx);
        simulation.start()?;
        log!("{:?} bot playing, seed {}", bot_type, simulation.seed());
    } else {
        spawn_stdin_reader(command_tx);
        log!("Commands: start, left (a), right (d), restart (n), quit (q)");
    }

    println!("{}", render_board(&simulation));

    let summary = run_game_loop(
        &mut simulation,
        &config.level_results,
        GameLoopOptions { bot, rounds },
        bot_rng,
        &mut command_rx,
    )
    .await;

    log!(
        "Played {} game(s): {} won, {} lost, {} fruit eaten, best length {}",
        summary.games,
        summary.wins,
        summary.losses,
        summary.fruits_eaten,
        summary.best_length
    );

    Ok(())
}
