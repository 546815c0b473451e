//! Messages to show on the badge, with their display style and speed.
//!
//! Messages can be given on the command line as `TEXT[@OPTIONS]`, where the
//! options are a comma separated style name and speed digit, e.g.
//! `Hello@flash,5`. The text ends at the last `@`, so a text that contains an
//! `@` itself can be written with an empty option list, e.g. `me@example.org@`.
use serde::Deserialize;
use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Maximum number of characters of a message, longer texts are truncated.
pub const MAX_TEXT_LEN: usize = 250;

/// Sent in place of characters that have no single-byte representation.
const REPLACEMENT: u8 = b'?';

/// How the message moves over the display.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Hold,
    Scrolling,
    RainDown,
    Flash
}

impl Style {
    /// Wire representation of the style.
    pub fn byte(self) -> u8 {
        match self {
            Style::Hold => 0x41,
            Style::Scrolling => 0x42,
            Style::RainDown => 0x43,
            Style::Flash => 0x44
        }
    }

    pub fn from_byte(byte: u8) -> Option<Style> {
        match byte {
            0x41 => Some(Style::Hold),
            0x42 => Some(Style::Scrolling),
            0x43 => Some(Style::RainDown),
            0x44 => Some(Style::Flash),
            _ => None
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::Scrolling
    }
}

impl FromStr for Style {
    type Err = ParseStyleError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        match source.to_ascii_lowercase().as_str() {
            "hold" => Ok(Style::Hold),
            "scroll" | "scrolling" => Ok(Style::Scrolling),
            "rain" | "raindown" | "rain-down" | "rain_down" => Ok(Style::RainDown),
            "flash" => Ok(Style::Flash),
            _ => Err(ParseStyleError {
                input: source.to_string()
            })
        }
    }
}

impl Display for Style {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Style::Hold => "hold",
            Style::Scrolling => "scrolling",
            Style::RainDown => "rain down",
            Style::Flash => "flash"
        };
        f.write_str(name)
    }
}

/// Scrolling or update speed, `One` is the slowest and `Five` the fastest.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Deserialize)]
#[serde(try_from = "u8")]
pub enum Speed {
    One,
    Two,
    Three,
    Four,
    Five
}

impl Speed {
    /// The speed as a number in range 1 to 5.
    pub fn number(self) -> u8 {
        match self {
            Speed::One => 1,
            Speed::Two => 2,
            Speed::Three => 3,
            Speed::Four => 4,
            Speed::Five => 5
        }
    }

    /// Wire representation of the speed, the ASCII digit of the speed number.
    pub fn byte(self) -> u8 {
        b'0' + self.number()
    }

    pub fn from_byte(byte: u8) -> Option<Speed> {
        Speed::try_from(byte.wrapping_sub(b'0')).ok()
    }
}

impl Default for Speed {
    fn default() -> Self {
        Speed::One
    }
}

impl TryFrom<u8> for Speed {
    type Error = ParseSpeedError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        match number {
            1 => Ok(Speed::One),
            2 => Ok(Speed::Two),
            3 => Ok(Speed::Three),
            4 => Ok(Speed::Four),
            5 => Ok(Speed::Five),
            _ => Err(ParseSpeedError {
                input: number.to_string()
            })
        }
    }
}

impl FromStr for Speed {
    type Err = ParseSpeedError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let number = source.parse::<u8>().map_err(|_| ParseSpeedError {
            input: source.to_string()
        })?;
        Speed::try_from(number)
    }
}

/// A text message with style and speed.
///
/// The text is guaranteed to be at most [`MAX_TEXT_LEN`] bytes long, one byte
/// per character.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize)]
#[serde(from = "MessageConfig")]
pub struct Message {
    text: Vec<u8>,
    style: Style,
    speed: Speed
}

/// Shape of a message in YAML run files.
#[derive(Deserialize)]
struct MessageConfig {
    text: String,
    #[serde(default)]
    style: Style,
    #[serde(default)]
    speed: Speed
}

impl From<MessageConfig> for Message {
    fn from(config: MessageConfig) -> Self {
        Message::new(&config.text)
            .with_style(config.style)
            .with_speed(config.speed)
    }
}

impl Message {
    /// Creates a message with default style and speed from the given text.
    ///
    /// Only the first [`MAX_TEXT_LEN`] characters are used. Characters outside
    /// of ASCII are replaced with `?`.
    pub fn new(text: &str) -> Message {
        let char_count = text.chars().count();
        if char_count > MAX_TEXT_LEN {
            debug!(
                "Truncating message of {len} characters to {max}",
                len = char_count,
                max = MAX_TEXT_LEN
            );
        }

        let mut replaced = 0;
        let text: Vec<u8> = text
            .chars()
            .take(MAX_TEXT_LEN)
            .map(|c| {
                if c.is_ascii() {
                    c as u8
                } else {
                    replaced += 1;
                    REPLACEMENT
                }
            })
            .collect();
        if replaced > 0 {
            debug!(
                "Replaced {count} non-ASCII characters in message with `?`",
                count = replaced
            );
        }

        Message {
            text,
            style: Style::default(),
            speed: Speed::default()
        }
    }

    /// Creates a message with default style and speed from raw bytes, keeping
    /// only the first [`MAX_TEXT_LEN`] bytes.
    pub fn from_bytes(text: &[u8]) -> Message {
        Message {
            text: text[..text.len().min(MAX_TEXT_LEN)].to_vec(),
            style: Style::default(),
            speed: Speed::default()
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    pub fn text(&self) -> &[u8] {
        &self.text[..]
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{text}\" ({style}, speed {speed})",
            text = String::from_utf8_lossy(&self.text),
            style = self.style,
            speed = self.speed.number()
        )
    }
}

impl FromStr for Message {
    type Err = ParseMessageError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let (text, options) = match source.rsplit_once('@') {
            Some((text, options)) => (text, options),
            None => (source, "")
        };

        let mut style = None;
        let mut speed = None;
        for option in options.split(',').map(str::trim).filter(|o| !o.is_empty()) {
            if let Ok(parsed) = option.parse::<Speed>() {
                if speed.replace(parsed).is_some() {
                    return Err(ParseMessageError::duplicate(option));
                }
            } else if let Ok(parsed) = option.parse::<Style>() {
                if style.replace(parsed).is_some() {
                    return Err(ParseMessageError::duplicate(option));
                }
            } else {
                return Err(ParseMessageError::unknown(option));
            }
        }

        Ok(Message::new(text)
            .with_style(style.unwrap_or_default())
            .with_speed(speed.unwrap_or_default()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown message style `{input}`, expected one of hold, scroll, rain or flash")]
pub struct ParseStyleError {
    input: String
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Message speed must be a number in range 1-5, got `{input}`")]
pub struct ParseSpeedError {
    input: String
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseMessageError {
    #[error("Message option `{option}` is neither a style nor a speed in range 1-5")]
    UnknownOption { option: String },
    #[error("Message option `{option}` sets style or speed for a second time")]
    Duplicate { option: String }
}

impl ParseMessageError {
    fn unknown(option: &str) -> Self {
        Self::UnknownOption {
            option: option.to_string()
        }
    }

    fn duplicate(option: &str) -> Self {
        Self::Duplicate {
            option: option.to_string()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let message = Message::new("testing1");
        assert_eq!(message.text(), b"testing1");
        assert_eq!(message.style(), Style::Scrolling);
        assert_eq!(message.speed(), Speed::One);
    }

    #[test]
    fn truncates_to_max_len() {
        let text = "x".repeat(300);
        let message = Message::new(&text);
        assert_eq!(message.text().len(), MAX_TEXT_LEN);
    }

    #[test]
    fn keeps_text_of_max_len() {
        let text = "y".repeat(MAX_TEXT_LEN);
        assert_eq!(Message::new(&text).text(), text.as_bytes());
    }

    #[test]
    fn truncates_characters_not_bytes() {
        let text = "ä".repeat(260);
        let message = Message::new(&text);
        assert_eq!(message.text(), &[b'?'; MAX_TEXT_LEN][..]);
    }

    #[test]
    fn replaces_non_ascii() {
        let message = Message::new("Grüße");
        assert_eq!(message.text(), b"Gr??e");
    }

    #[test]
    fn from_bytes_truncates() {
        let message = Message::from_bytes(&[0xAB; 251]);
        assert_eq!(message.text(), &[0xAB; 250][..]);
    }

    #[test]
    fn speed_bytes() {
        assert_eq!(Speed::One.byte(), 0x31);
        assert_eq!(Speed::Five.byte(), 0x35);
        assert_eq!(Speed::from_byte(0x33), Some(Speed::Three));
        assert_eq!(Speed::from_byte(0x30), None);
        assert_eq!(Speed::from_byte(0x00), None);
    }

    #[test]
    fn style_bytes() {
        assert_eq!(Style::Hold.byte(), 0x41);
        assert_eq!(Style::Flash.byte(), 0x44);
        assert_eq!(Style::from_byte(0x43), Some(Style::RainDown));
        assert_eq!(Style::from_byte(0x45), None);
    }

    #[test]
    fn parse_plain_text() {
        let message: Message = "Hello world".parse().unwrap();
        assert_eq!(message, Message::new("Hello world"));
    }

    #[test]
    fn parse_with_style_and_speed() {
        let message: Message = "testing2@flash,5".parse().unwrap();
        assert_eq!(
            message,
            Message::new("testing2")
                .with_style(Style::Flash)
                .with_speed(Speed::Five)
        );
    }

    #[test]
    fn parse_speed_only() {
        let message: Message = "testing1@ 5 ".parse().unwrap();
        assert_eq!(message.style(), Style::Scrolling);
        assert_eq!(message.speed(), Speed::Five);
    }

    #[test]
    fn parse_splits_at_last_at_sign() {
        let message: Message = "me@example.org@".parse().unwrap();
        assert_eq!(message, Message::new("me@example.org"));

        let message: Message = "a@b@RAIN".parse().unwrap();
        assert_eq!(message.text(), b"a@b");
        assert_eq!(message.style(), Style::RainDown);
    }

    #[test]
    fn parse_unknown_option() {
        let error = "me@example.org".parse::<Message>().unwrap_err();
        assert_eq!(
            error,
            ParseMessageError::UnknownOption {
                option: "example.org".to_string()
            }
        );
    }

    #[test]
    fn parse_speed_out_of_range() {
        let error = "hi@6".parse::<Message>().unwrap_err();
        assert_eq!(
            error,
            ParseMessageError::UnknownOption {
                option: "6".to_string()
            }
        );
    }

    #[test]
    fn parse_duplicate_option() {
        let error = "hi@hold,flash".parse::<Message>().unwrap_err();
        assert_eq!(
            error,
            ParseMessageError::Duplicate {
                option: "flash".to_string()
            }
        );
    }

    #[test]
    fn deserialize() {
        let message: Message =
            serde_yaml::from_str("text: Hello\nstyle: rain_down\nspeed: 3\n").unwrap();
        assert_eq!(
            message,
            Message::new("Hello")
                .with_style(Style::RainDown)
                .with_speed(Speed::Three)
        );
    }

    #[test]
    fn deserialize_defaults() {
        let message: Message = serde_yaml::from_str("text: Hello\n").unwrap();
        assert_eq!(message, Message::new("Hello"));
    }

    #[test]
    fn deserialize_speed_out_of_range() {
        assert!(serde_yaml::from_str::<Message>("text: Hello\nspeed: 0\n").is_err());
    }

    #[test]
    fn display() {
        let message = Message::new("hi").with_speed(Speed::Four);
        assert_eq!(format!("{}", message), "\"hi\" (scrolling, speed 4)");
    }
}
