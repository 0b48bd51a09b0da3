use std::{fmt, str::FromStr};

use crate::errors::Error;

/// Every button that round-trips through the bot as callback data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallbackAction {
    /// "I completed all": re-run the membership gate.
    Recheck,
    Trending,
    NowPlaying,
}

impl CallbackAction {
    pub fn as_data(self) -> &'static str {
        match self {
            Self::Recheck => "recheck_all",
            Self::Trending => "trending",
            Self::NowPlaying => "now_playing",
        }
    }

    /// Content buttons are only reachable from the welcome menu.
    pub fn is_content(self) -> bool {
        matches!(self, Self::Trending | Self::NowPlaying)
    }
}

impl FromStr for CallbackAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recheck_all" => Ok(Self::Recheck),
            "trending" => Ok(Self::Trending),
            "now_playing" => Ok(Self::NowPlaying),
            other => Err(Error::InvalidCallback(other.to_string())),
        }
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_data())
    }
}
