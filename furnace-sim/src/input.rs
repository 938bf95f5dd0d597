//! Operator commands from stdin
//!
//! One command per line: `setpoint <C>`, `door open`, `door close`, `quit`.
//! Lines are parsed on a dedicated thread and queued on
//! [`INPUT_CHANNEL`](crate::channels::INPUT_CHANNEL); the simulation task
//! applies them at the next tick boundary.

use core::fmt;
use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use furnace_core::state::Command;

use crate::channels::INPUT_CHANNEL;

/// One parsed line of operator input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Forward to the simulation driver
    Command(Command),
    /// Stop the run
    Quit,
}

/// Why a line was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    UnknownCommand(String),
    MissingArgument(&'static str),
    InvalidNumber(String),
    InvalidDoorState(String),
    TrailingInput(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty line"),
            ParseError::UnknownCommand(word) => write!(
                f,
                "unknown command '{word}' (expected setpoint, door or quit)"
            ),
            ParseError::MissingArgument(command) => write!(f, "'{command}' needs an argument"),
            ParseError::InvalidNumber(value) => {
                write!(f, "'{value}' is not a finite temperature")
            }
            ParseError::InvalidDoorState(value) => {
                write!(f, "door state '{value}' (expected open or close)")
            }
            ParseError::TrailingInput(value) => write!(f, "unexpected '{value}'"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse one line of operator input
///
/// Keywords are case-insensitive and surrounding whitespace is ignored.
pub fn parse_input(line: &str) -> Result<Input, ParseError> {
    let line = line.trim().to_ascii_lowercase();
    let mut words = line.split_whitespace();
    let keyword = words.next().ok_or(ParseError::Empty)?;

    let input = match keyword {
        "setpoint" | "sp" => {
            let value = words.next().ok_or(ParseError::MissingArgument("setpoint"))?;
            let setpoint: f64 = value
                .parse()
                .map_err(|_| ParseError::InvalidNumber(value.to_string()))?;
            if !setpoint.is_finite() {
                return Err(ParseError::InvalidNumber(value.to_string()));
            }
            Input::Command(Command::SetSetpoint(setpoint))
        }
        "door" => match words.next() {
            Some("open") => Input::Command(Command::SetDoor(true)),
            Some("close") | Some("closed") => Input::Command(Command::SetDoor(false)),
            Some(other) => return Err(ParseError::InvalidDoorState(other.to_string())),
            None => return Err(ParseError::MissingArgument("door")),
        },
        "quit" | "exit" | "q" => Input::Quit,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    match words.next() {
        Some(extra) => Err(ParseError::TrailingInput(extra.to_string())),
        None => Ok(input),
    }
}

/// Start the stdin reader thread
///
/// The thread ends when stdin closes; the simulation keeps running.
pub fn spawn_stdin_reader() -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin".into())
        .spawn(read_stdin)
}

fn read_stdin() {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("stdin read failed: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_input(&line) {
            Ok(input) => {
                if INPUT_CHANNEL.try_send(input).is_err() {
                    warn!("Input queue full, dropping '{}'", line.trim());
                } else {
                    debug!("Queued {:?}", input);
                }
            }
            Err(e) => warn!("Ignoring '{}': {}", line.trim(), e),
        }
    }
    debug!("stdin closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setpoint() {
        assert_eq!(
            parse_input("setpoint 150"),
            Ok(Input::Command(Command::SetSetpoint(150.0)))
        );
        assert_eq!(
            parse_input("  SP 212.5 \n"),
            Ok(Input::Command(Command::SetSetpoint(212.5)))
        );
        assert_eq!(
            parse_input("setpoint -20"),
            Ok(Input::Command(Command::SetSetpoint(-20.0)))
        );
    }

    #[test]
    fn test_door() {
        assert_eq!(
            parse_input("door open"),
            Ok(Input::Command(Command::SetDoor(true)))
        );
        assert_eq!(
            parse_input("Door Close"),
            Ok(Input::Command(Command::SetDoor(false)))
        );
        assert_eq!(
            parse_input("door closed"),
            Ok(Input::Command(Command::SetDoor(false)))
        );
    }

    #[test]
    fn test_quit() {
        assert_eq!(parse_input("quit"), Ok(Input::Quit));
        assert_eq!(parse_input("Q"), Ok(Input::Quit));
    }

    #[test]
    fn test_rejects_malformed_lines() {
        assert_eq!(parse_input("   "), Err(ParseError::Empty));
        assert_eq!(
            parse_input("heat 100"),
            Err(ParseError::UnknownCommand("heat".into()))
        );
        assert_eq!(
            parse_input("setpoint"),
            Err(ParseError::MissingArgument("setpoint"))
        );
        assert_eq!(
            parse_input("setpoint hot"),
            Err(ParseError::InvalidNumber("hot".into()))
        );
        assert_eq!(
            parse_input("setpoint NaN"),
            Err(ParseError::InvalidNumber("nan".into()))
        );
        assert_eq!(
            parse_input("setpoint inf"),
            Err(ParseError::InvalidNumber("inf".into()))
        );
        assert_eq!(
            parse_input("door ajar"),
            Err(ParseError::InvalidDoorState("ajar".into()))
        );
        assert_eq!(parse_input("door"), Err(ParseError::MissingArgument("door")));
        assert_eq!(
            parse_input("quit now"),
            Err(ParseError::TrailingInput("now".into()))
        );
    }

    #[test]
    fn test_error_messages() {
        let message = ParseError::UnknownCommand("heat".into()).to_string();
        assert!(message.contains("heat"));
        assert!(message.contains("setpoint"));
    }
}
