use grid_snake_common::games::snake::RotationSide;
use grid_snake_common::log;
use std::io::BufRead;
use tokio::sync::mpsc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunnerCommand {
    Start,
    Rotate(RotationSide),
    Restart,
    Quit,
}

pub fn parse_command(line: &str) -> Option<RunnerCommand> {
    match line.trim().to_ascii_lowercase().as_str() {
        "s" | "start" => Some(RunnerCommand::Start),
        "a" | "l" | "left" => Some(RunnerCommand::Rotate(RotationSide::Left)),
        "d" | "r" | "right" => Some(RunnerCommand::Rotate(RotationSide::Right)),
        "n" | "restart" => Some(RunnerCommand::Restart),
        "q" | "quit" | "exit" => Some(RunnerCommand::Quit),
        _ => None,
    }
}

/// Forwards stdin lines as commands until stdin closes or the receiver is
/// dropped. Runs on a plain thread so a pending read never holds up runtime
/// shutdown.
pub fn spawn_stdin_reader(command_tx: mpsc::UnboundedSender<RunnerCommand>) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    log!("Failed to read input: {}", e);
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Some(command) => {
                    if command_tx.send(command).is_err() {
                        break;
                    }
                }
                None => log!("Unknown command '{}' (use start, left, right, restart, quit)", line.trim()),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_and_long_forms() {
        assert_eq!(parse_command("a"), Some(RunnerCommand::Rotate(RotationSide::Left)));
        assert_eq!(parse_command(" Right \n"), Some(RunnerCommand::Rotate(RotationSide::Right)));
        assert_eq!(parse_command("START"), Some(RunnerCommand::Start));
        assert_eq!(parse_command("n"), Some(RunnerCommand::Restart));
        assert_eq!(parse_command("exit"), Some(RunnerCommand::Quit));
    }

    #[test]
    fn test_parse_unknown_is_none() {
        assert_eq!(parse_command("jump"), None);
        assert_eq!(parse_command(""), None);
    }
}
