use std::str::FromStr;

use snake_common::snake::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    Start,
    Stop,
    Resume,
    Restart,
    Step,
    Turn(Direction),
    Difficulty(usize),
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "commands: start | stop | resume | restart | step | up | down | left | right \
| 37..40 (arrow key codes) | difficulty <level> | status | help | quit";

/// Legacy browser arrow key codes.
pub fn direction_from_key_code(code: u32) -> Option<Direction> {
    match code {
        37 => Some(Direction::Left),
        38 => Some(Direction::Up),
        39 => Some(Direction::Right),
        40 => Some(Direction::Down),
        _ => None,
    }
}

impl FromStr for ConsoleCommand {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parts = input.split_whitespace();
        let Some(word) = parts.next() else {
            return Err("Empty command".to_string());
        };
        let argument = parts.next();
        if parts.next().is_some() {
            return Err(format!("Too many arguments in '{}'", input.trim()));
        }

        let command = match (word.to_ascii_lowercase().as_str(), argument) {
            ("start", None) => ConsoleCommand::Start,
            ("stop" | "pause", None) => ConsoleCommand::Stop,
            ("resume", None) => ConsoleCommand::Resume,
            ("restart" | "reload", None) => ConsoleCommand::Restart,
            ("step", None) => ConsoleCommand::Step,
            ("up", None) => ConsoleCommand::Turn(Direction::Up),
            ("down", None) => ConsoleCommand::Turn(Direction::Down),
            ("left", None) => ConsoleCommand::Turn(Direction::Left),
            ("right", None) => ConsoleCommand::Turn(Direction::Right),
            ("status", None) => ConsoleCommand::Status,
            ("help" | "?", None) => ConsoleCommand::Help,
            ("quit" | "exit", None) => ConsoleCommand::Quit,
            ("difficulty" | "d", Some(level)) => {
                let level = level
                    .parse::<usize>()
                    .map_err(|_| format!("Difficulty must be a positive number, got '{}'", level))?;
                ConsoleCommand::Difficulty(level)
            }
            (code, None) if code.chars().all(|c| c.is_ascii_digit()) => code
                .parse::<u32>()
                .ok()
                .and_then(direction_from_key_code)
                .map(ConsoleCommand::Turn)
                .ok_or_else(|| format!("Unknown key code '{}'", code))?,
            _ => return Err(format!("Unknown command '{}'. {}", input.trim(), HELP)),
        };
        Ok(command)
    }
}
