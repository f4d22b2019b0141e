use grid_snake_common::games::SessionRng;
use grid_snake_common::games::snake::{
    BotController, BotType, GridSimulation, Outcome, TickOutcome,
};
use grid_snake_common::log;
use tokio::sync::mpsc;
use tokio::time::{sleep, Instant};

use crate::config::LevelResults;
use crate::input::RunnerCommand;
use crate::renderer::{render_board, ConsoleObserver};

pub struct GameLoopOptions {
    pub bot: Option<BotType>,
    /// Stop after this many finished games; `None` keeps going until quit.
    pub rounds: Option<u32>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct GameSummary {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub fruits_eaten: u32,
    pub best_length: usize,
}

impl GameSummary {
    fn record(&mut self, outcome: Outcome, length: usize) {
        self.games += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Lose => self.losses += 1,
        }
        self.best_length = self.best_length.max(length);
    }
}

enum CommandEffect {
    Nothing,
    Started,
    Quit,
}

fn handle_command(simulation: &mut GridSimulation, command: RunnerCommand) -> CommandEffect {
    match command {
        RunnerCommand::Start => match simulation.start() {
            Ok(()) => CommandEffect::Started,
            Err(e) => {
                log!("{}", e);
                CommandEffect::Nothing
            }
        },
        RunnerCommand::Restart => match simulation.restart() {
            Ok(()) => {
                println!("{}", render_board(simulation));
                CommandEffect::Started
            }
            Err(e) => {
                log!("{}", e);
                CommandEffect::Nothing
            }
        },
        RunnerCommand::Rotate(side) => {
            simulation.request_rotate(side);
            CommandEffect::Nothing
        }
        RunnerCommand::Quit => CommandEffect::Quit,
    }
}

/// Drives `simulation` on its own move interval, applying commands between
/// ticks, until the round limit is reached, the player quits, or Ctrl+C.
pub async fn run_game_loop(
    simulation: &mut GridSimulation,
    level_results: &LevelResults,
    options: GameLoopOptions,
    mut bot_rng: SessionRng,
    command_rx: &mut mpsc::UnboundedReceiver<RunnerCommand>,
) -> GameSummary {
    let mut summary = GameSummary::default();
    let mut observer = ConsoleObserver::new(level_results);
    let mut input_open = true;

    let tick_timer = sleep(simulation.move_interval());
    tokio::pin!(tick_timer);

    loop {
        tokio::select! {
            _ = &mut tick_timer, if simulation.state().is_running() => {
                if let Some(bot_type) = options.bot
                    && let Some(side) = BotController::calculate_rotation(bot_type, simulation, &mut bot_rng)
                {
                    simulation.request_rotate(side);
                }

                let outcome = simulation.tick(&mut observer);
                println!("{}", render_board(simulation));

                if let TickOutcome::Ended(result) = outcome {
                    summary.record(result, simulation.snake_length());
                    if options.rounds.is_some_and(|rounds| summary.games >= rounds) {
                        break;
                    }
                    if options.bot.is_some() {
                        if let Err(e) = simulation.restart() {
                            log!("{}", e);
                            break;
                        }
                    } else {
                        log!("Type 'restart' to play again or 'quit' to leave");
                    }
                }

                tick_timer.as_mut().reset(Instant::now() + simulation.move_interval());
            }
            command = command_rx.recv(), if input_open => {
                match command {
                    Some(command) => match handle_command(simulation, command) {
                        CommandEffect::Started => {
                            tick_timer.as_mut().reset(Instant::now() + simulation.move_interval());
                        }
                        CommandEffect::Quit => break,
                        CommandEffect::Nothing => {}
                    },
                    None => {
                        input_open = false;
                        if options.bot.is_none() {
                            log!("Input closed");
                            break;
                        }
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log!("Interrupted");
                break;
            }
        }
    }

    summary.fruits_eaten = observer.fruits_eaten;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_snake_common::games::snake::SimulationSettings;
    use std::time::Duration;

    fn simulation(seed: u64) -> GridSimulation {
        let settings = SimulationSettings {
            grid_size: 8,
            move_interval: Duration::from_millis(10),
            move_animation_duration: Duration::from_millis(5),
            max_snake_length: 6,
            extra_obstacles_min: 0,
            extra_obstacles_max: 1,
            ..SimulationSettings::default()
        };
        GridSimulation::new(settings, SessionRng::new(seed)).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_bot_plays_requested_rounds() {
        let mut simulation = simulation(42);
        simulation.start().unwrap();
        let (_command_tx, mut command_rx) = mpsc::unbounded_channel();

        let summary = run_game_loop(
            &mut simulation,
            &LevelResults::default(),
            GameLoopOptions {
                bot: Some(BotType::Random),
                rounds: Some(3),
            },
            SessionRng::new(1),
            &mut command_rx,
        )
        .await;

        assert_eq!(summary.games, 3);
        assert_eq!(summary.wins + summary.losses, 3);
        assert!(summary.best_length >= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_game_follows_commands() {
        let mut simulation = simulation(7);
        let (command_tx, mut command_rx) = mpsc::unbounded_channel();

        command_tx.send(RunnerCommand::Start).unwrap();
        command_tx.send(RunnerCommand::Rotate(grid_snake_common::games::snake::RotationSide::Right)).unwrap();
        drop(command_tx);

        let summary = run_game_loop(
            &mut simulation,
            &LevelResults::default(),
            GameLoopOptions { bot: None, rounds: Some(1) },
            SessionRng::new(1),
            &mut command_rx,
        )
        .await;

        // Input closes right after the commands are consumed, before any tick fires.
        assert_eq!(summary.games, 0);
        assert!(simulation.state().is_running());
        assert_eq!(simulation.pending_directions().count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_stops_idle_loop() {
        let mut simulation = simulation(3);
        let (command_tx, mut command_rx) = mpsc::unbounded_channel();
        command_tx.send(RunnerCommand::Quit).unwrap();

        let summary = run_game_loop(
            &mut simulation,
            &LevelResults::default(),
            GameLoopOptions { bot: None, rounds: None },
            SessionRng::new(1),
            &mut command_rx,
        )
        .await;

        assert_eq!(summary, GameSummary::default());
        assert!(!simulation.state().is_running());
    }
}
