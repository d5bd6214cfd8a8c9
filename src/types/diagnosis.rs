use std::fmt;
use std::sync::OnceLock;

use fancy_regex::Regex;

use serde::{Serialize, Serializer};

/// iOS release extracted from an `OS <major>_<minor>[_<patch>]` UA token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct IosVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl IosVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Extract the version from the first `OS <digits>_<digits>[_<digits>]`
    /// token in `ua`.
    ///
    /// A missing patch component defaults to 0. A component that does not fit
    /// in a `u32` leaves the version absent.
    pub fn from_user_agent(ua: &str) -> Option<Self> {
        let caps = ios_version_regex()?.captures(ua).ok()??;
        let number = |group: usize| -> Option<u32> {
            match caps.get(group).map(|m| m.as_str()) {
                Some(s) if !s.is_empty() => s.parse().ok(),
                _ => Some(0),
            }
        };
        Some(Self::new(number(1)?, number(2)?, number(3)?))
    }
}

const IOS_VERSION_PATTERN: &str = r"OS (\d+)_(\d+)_?(\d*)";

static IOS_VERSION_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

/// Compiled once per process; a constant pattern that failed to compile
/// would simply disable version extraction.
fn ios_version_regex() -> Option<&'static Regex> {
    IOS_VERSION_REGEX
        .get_or_init(|| Regex::new(IOS_VERSION_PATTERN).ok())
        .as_ref()
}

impl fmt::Display for IosVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serialize for IosVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single diagnostic finding. Variants are listed in the order the
/// evaluator emits them.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// The visual viewport is pinch-zoomed beyond the warning threshold.
    Zoomed { scale: f64 },
    /// No `<meta name="viewport">` tag, or one without `width=device-width`.
    MissingMetaViewport,
    /// Document content is wider than the viewport.
    ContentOverflow,
    /// iOS zooms into focused inputs whose font is smaller than `min_px`.
    SmallInputFont { size_px: f64, min_px: f64 },
    /// The zoom/font combination suggests the Larger Text setting is on.
    PrefersLargeText,
}

impl Warning {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Zoomed { .. } => "zoomed",
            Self::MissingMetaViewport => "missing_meta_viewport",
            Self::ContentOverflow => "content_overflow",
            Self::SmallInputFont { .. } => "small_input_font",
            Self::PrefersLargeText => "prefers_large_text",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zoomed { scale } => {
                write!(f, "Page is zoomed in (scale: {:.2})", round_half_up_2dp(*scale))
            }
            Self::MissingMetaViewport => f.write_str("Missing or invalid meta viewport tag"),
            Self::ContentOverflow => f.write_str(
                "Page content is wider than the viewport and may trigger automatic zoom",
            ),
            Self::SmallInputFont { size_px, min_px } => write!(
                f,
                "iOS device: input font size {}px < {}px may trigger automatic zoom",
                size_px, min_px
            ),
            Self::PrefersLargeText => {
                f.write_str("The Larger Text accessibility setting may be enabled")
            }
        }
    }
}

/// Round to two decimals with ties away from zero, so that 1.125 shows as
/// 1.13 rather than the `{:.2}` tie-to-even 1.12.
fn round_half_up_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Serialize for Warning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of one evaluation. Fully determined by the snapshot and the
/// evaluator configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticResult {
    pub is_content_overflow: bool,
    pub prefers_large_text: bool,
    pub ios_version: Option<IosVersion>,
    pub warnings: Vec<Warning>,
}

impl DiagnosticResult {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Rendered warning messages, in emission order.
    pub fn messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    pub fn warning_kinds(&self) -> Vec<&'static str> {
        self.warnings.iter().map(Warning::kind).collect()
    }
}
