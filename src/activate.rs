use crate::args::{Clear, Enable};
use crate::badge::{Badge, Result};
use serde::Deserialize;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Bit pattern of slots to activate, bit 0 for the first slot up to bit 5 for the
/// sixth. Bits 6 and 7 are reported to control two image slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "u8")]
pub struct Pattern(u8);

impl Pattern {
    pub fn bits(self) -> u8 {
        self.0
    }
}

impl From<u8> for Pattern {
    fn from(bits: u8) -> Self {
        Pattern(bits)
    }
}

impl FromStr for Pattern {
    type Err = ParsePatternError;

    fn from_str(source: &str) -> std::result::Result<Self, Self::Err> {
        let lower = source.trim().to_ascii_lowercase();
        let bits = if let Some(hex) = lower.strip_prefix("0x") {
            u8::from_str_radix(hex, 16)
        } else if let Some(binary) = lower.strip_prefix("0b") {
            u8::from_str_radix(binary, 2)
        } else {
            lower.parse::<u8>()
        };
        bits.map(Pattern).map_err(|source_err| ParsePatternError {
            input: source.to_string(),
            source: source_err
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Could not parse `{input}` as slot pattern in range 0-255: {source}")]
pub struct ParsePatternError {
    input: String,
    source: ParseIntError
}

pub fn enable(opts: &Enable) -> Result<()> {
    Badge::resolve(opts.serial.as_deref(), &opts.device)?.enable_messages(opts.pattern.bits())
}

pub fn clear(opts: &Clear) -> Result<()> {
    Badge::resolve(opts.serial.as_deref(), &opts.device)?.clear_messages()
}
