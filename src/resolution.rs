//! The fixed table of output resolutions.
//!
//! Each [`Resolution`] maps to one canonical file name inside a macOS
//! `.iconset` directory and one square canvas edge length.

use std::fmt;
use std::str::FromStr;

/// A supported output resolution.
///
/// Variants are declared in iteration order; [`Resolution::ALL`] follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resolution {
    Icon16,
    Icon16At2x,
    Icon32,
    Icon32At2x,
    Icon128,
    Icon128At2x,
    Icon256,
    Icon256At2x,
    Icon512,
    Icon512At2x,
}

impl Resolution {
    /// Every supported resolution, in declaration order.
    pub const ALL: [Resolution; 10] = [
        Self::Icon16,
        Self::Icon16At2x,
        Self::Icon32,
        Self::Icon32At2x,
        Self::Icon128,
        Self::Icon128At2x,
        Self::Icon256,
        Self::Icon256At2x,
        Self::Icon512,
        Self::Icon512At2x,
    ];

    /// Canvas edge length in pixels.
    pub fn edge(self) -> u32 {
        match self {
            Self::Icon16 => 16,
            Self::Icon16At2x | Self::Icon32 => 32,
            Self::Icon32At2x => 64,
            Self::Icon128 => 128,
            Self::Icon128At2x | Self::Icon256 => 256,
            Self::Icon256At2x | Self::Icon512 => 512,
            Self::Icon512At2x => 1024,
        }
    }

    /// Canonical file name without extension, e.g. `icon_32x32@2x`.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Icon16 => "icon_16x16",
            Self::Icon16At2x => "icon_16x16@2x",
            Self::Icon32 => "icon_32x32",
            Self::Icon32At2x => "icon_32x32@2x",
            Self::Icon128 => "icon_128x128",
            Self::Icon128At2x => "icon_128x128@2x",
            Self::Icon256 => "icon_256x256",
            Self::Icon256At2x => "icon_256x256@2x",
            Self::Icon512 => "icon_512x512",
            Self::Icon512At2x => "icon_512x512@2x",
        }
    }

    /// Canonical output file name, e.g. `icon_32x32@2x.png`.
    pub fn file_name(self) -> String {
        format!("{}.png", self.file_stem())
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.file_stem() == s)
            .ok_or_else(|| format!("unknown resolution `{s}`"))
    }
}
