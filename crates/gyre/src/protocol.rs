//! Line protocol spoken over the control socket.
//!
//! One command per line: `heading <degrees>`, `lost`, `screen <name>`,
//! `sheet`.

use crate::heading::HeadingSample;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/dials.sock";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Screen {
    Clock,
    #[default]
    Compass,
}

impl Screen {
    pub fn next(self) -> Self {
        Self::iter()
            .cycle()
            .skip_while(|s| *s != self)
            .nth(1)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Heading(HeadingSample),
    Lost,
    Screen(Screen),
    ToggleSheet,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    UnknownVerb(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("unexpected trailing input '{0}'")]
    Trailing(String),
    #[error("invalid heading '{0}': {1}")]
    InvalidHeading(String, ParseFloatError),
    #[error("heading must be finite, got '{0}'")]
    NonFiniteHeading(String),
    #[error("unknown screen '{0}'")]
    UnknownScreen(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(ParseCommandError::Empty)?;

        let command = match verb.to_ascii_lowercase().as_str() {
            "heading" => {
                let arg = words
                    .next()
                    .ok_or(ParseCommandError::MissingArgument("heading"))?;
                let degrees: f64 = arg
                    .parse()
                    .map_err(|e| ParseCommandError::InvalidHeading(arg.to_string(), e))?;
                if !degrees.is_finite() {
                    return Err(ParseCommandError::NonFiniteHeading(arg.to_string()));
                }
                Command::Heading(HeadingSample::new(degrees))
            }
            "lost" => Command::Lost,
            "screen" => {
                let arg = words
                    .next()
                    .ok_or(ParseCommandError::MissingArgument("screen"))?;
                let screen = arg
                    .parse()
                    .map_err(|_| ParseCommandError::UnknownScreen(arg.to_string()))?;
                Command::Screen(screen)
            }
            "sheet" => Command::ToggleSheet,
            other => return Err(ParseCommandError::UnknownVerb(other.to_string())),
        };

        match words.next() {
            Some(extra) => Err(ParseCommandError::Trailing(extra.to_string())),
            None => Ok(command),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heading(sample) => write!(f, "heading {sample}"),
            Self::Lost => f.write_str("lost"),
            Self::Screen(screen) => write!(f, "screen {screen}"),
            Self::ToggleSheet => f.write_str("sheet"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cases = vec![
            ("heading 12.5", Command::Heading(HeadingSample::new(12.5))),
            ("  HEADING   -30  ", Command::Heading(HeadingSample::new(-30.0))),
            ("lost", Command::Lost),
            ("screen clock", Command::Screen(Screen::Clock)),
            ("screen Compass", Command::Screen(Screen::Compass)),
            ("sheet", Command::ToggleSheet),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<Command>(), Ok(expected), "{line}");
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "show".parse::<Command>(),
            Err(ParseCommandError::UnknownVerb("show".into()))
        );
        assert_eq!(
            "heading".parse::<Command>(),
            Err(ParseCommandError::MissingArgument("heading"))
        );
        assert!(matches!(
            "heading north".parse::<Command>(),
            Err(ParseCommandError::InvalidHeading(..))
        ));
        assert_eq!(
            "heading NaN".parse::<Command>(),
            Err(ParseCommandError::NonFiniteHeading("NaN".into()))
        );
        assert_eq!(
            "screen radar".parse::<Command>(),
            Err(ParseCommandError::UnknownScreen("radar".into()))
        );
        assert_eq!(
            "lost now".parse::<Command>(),
            Err(ParseCommandError::Trailing("now".into()))
        );
    }

    #[test]
    fn test_display_parses_back() {
        for command in [
            Command::Heading(HeadingSample::new(271.25)),
            Command::Lost,
            Command::Screen(Screen::Clock),
            Command::ToggleSheet,
        ] {
            assert_eq!(command.to_string().parse::<Command>(), Ok(command));
        }
    }

    #[test]
    fn test_screen_cycles() {
        assert_eq!(Screen::Clock.next(), Screen::Compass);
        assert_eq!(Screen::Compass.next(), Screen::Clock);
    }

    #[test]
    fn test_screen_deserialization() {
        let cases = vec![
            ("\"clock\"", Screen::Clock),
            ("\"CLOCK\"", Screen::Clock),
            ("\"Compass\"", Screen::Compass),
        ];

        for (json, expected) in cases {
            let deserialized: Screen = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }
}
