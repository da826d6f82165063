//! Candidate canvas aspect ratios

use crate::io::configuration::DEFAULT_ASPECT_RATIOS;
use crate::io::error::{QuiltError, invalid_parameter};
use std::fmt;
use std::str::FromStr;

/// A canvas aspect ratio expressed as width:height
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct AspectRatio {
    width: u32,
    height: u32,
}

impl AspectRatio {
    /// Create a ratio, rejecting zero terms
    pub const fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            Some(Self { width, height })
        }
    }

    /// Width term
    pub const fn width(self) -> u32 {
        self.width
    }

    /// Height term
    pub const fn height(self) -> u32 {
        self.height
    }

    /// Width divided by height
    pub fn value(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// The default candidate menu in evaluation order
    pub fn default_menu() -> Vec<Self> {
        DEFAULT_ASPECT_RATIOS
            .iter()
            .filter_map(|&(width, height)| Self::new(width, height))
            .collect()
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

impl FromStr for AspectRatio {
    type Err = QuiltError;

    /// Parse `W:H`, e.g. `16:9`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .split_once(':')
            .ok_or_else(|| invalid_parameter("ratio", &s, &"expected the form W:H"))?;

        let parse_term = |term: &str| {
            term.trim()
                .parse::<u32>()
                .map_err(|e| invalid_parameter("ratio", &s, &e))
        };

        Self::new(parse_term(width)?, parse_term(height)?)
            .ok_or_else(|| invalid_parameter("ratio", &s, &"terms must be positive"))
    }
}
