// src/console/parser.rs
//
// Turns one line of console input into a command or a view request.

use std::fmt;

use crate::{
    session::commands::PlayerCommand,
    world::locations::{City, LocationId},
};

/// Read-only screens that never touch the turn pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Status,
    Goods,
    Locations,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    Command(PlayerCommand),
    Show(View),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    UnknownVerb(String),
    MissingArgument {
        verb: &'static str,
        usage: &'static str,
    },
    InvalidNumber(String),
    UnknownCity(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "type a command, or 'help'"),
            Self::UnknownVerb(verb) => write!(f, "unknown command '{verb}', try 'help'"),
            Self::MissingArgument { verb, usage } => write!(f, "usage: {verb} {usage}"),
            Self::InvalidNumber(value) => write!(f, "'{value}' is not a positive number"),
            Self::UnknownCity(value) => {
                write!(f, "'{value}' is not a city (beijing or shanghai)")
            }
        }
    }
}

impl std::error::Error for ParseError {}

pub fn parse_line(line: &str) -> Result<ConsoleInput, ParseError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(ParseError::Empty);
    };
    let args: Vec<&str> = words.collect();

    let input = match verb.to_ascii_lowercase().as_str() {
        "status" | "st" => ConsoleInput::Show(View::Status),
        "goods" | "market" | "g" => ConsoleInput::Show(View::Goods),
        "locations" | "map" | "l" => ConsoleInput::Show(View::Locations),
        "help" | "?" => ConsoleInput::Help,
        "quit" | "exit" | "q" => ConsoleInput::Quit,
        "travel" | "go" | "t" => {
            let stop = single(&args, "travel", "<location number>")?;
            ConsoleInput::Command(PlayerCommand::Travel(LocationId::new(number(stop)?)))
        }
        "city" => {
            let name = single(&args, "city", "<beijing|shanghai>")?;
            let city =
                City::parse(name).ok_or_else(|| ParseError::UnknownCity(name.to_string()))?;
            ConsoleInput::Command(PlayerCommand::SwitchCity(city))
        }
        "buy" | "b" => {
            let (good, quantity) = good_and_quantity(&args, "buy")?;
            ConsoleInput::Command(PlayerCommand::Buy { good, quantity })
        }
        "sell" | "s" => {
            let (good, quantity) = good_and_quantity(&args, "sell")?;
            ConsoleInput::Command(PlayerCommand::Sell { good, quantity })
        }
        "deposit" => {
            let amount = single(&args, "deposit", "<amount>")?;
            ConsoleInput::Command(PlayerCommand::Deposit(number(amount)?))
        }
        "withdraw" => {
            let amount = single(&args, "withdraw", "<amount>")?;
            ConsoleInput::Command(PlayerCommand::Withdraw(number(amount)?))
        }
        "repay" => {
            let amount = single(&args, "repay", "<amount>")?;
            ConsoleInput::Command(PlayerCommand::Repay(number(amount)?))
        }
        "treat" | "hospital" => {
            let points = single(&args, "treat", "<points>")?;
            ConsoleInput::Command(PlayerCommand::Treat(number(points)?))
        }
        other => return Err(ParseError::UnknownVerb(other.to_string())),
    };

    Ok(input)
}

fn single<'a>(
    args: &[&'a str],
    verb: &'static str,
    usage: &'static str,
) -> Result<&'a str, ParseError> {
    match args {
        [value] => Ok(*value),
        _ => Err(ParseError::MissingArgument { verb, usage }),
    }
}

/// `<good...> <qty>`: the last word is the quantity, everything before it names the good.
fn good_and_quantity(args: &[&str], verb: &'static str) -> Result<(String, u32), ParseError> {
    let usage = "<good id or name> <quantity>";
    let Some((quantity, good)) = args.split_last() else {
        return Err(ParseError::MissingArgument { verb, usage });
    };
    if good.is_empty() {
        return Err(ParseError::MissingArgument { verb, usage });
    }
    Ok((good.join(" "), number(quantity)?))
}

fn number<T: std::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value
        .parse::<T>()
        .map_err(|_| ParseError::InvalidNumber(value.to_string()))
}
