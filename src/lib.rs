//! Browser/device viewport diagnostics.
//!
//! Feed a [`DeviceSnapshot`] (viewport, zoom, meta viewport, input font
//! sizes, User-Agent hints) to [`evaluate`] and get back a
//! [`DiagnosticResult`] with the overflow / large-text flags, the iOS version
//! and an ordered list of [`Warning`]s. [`Diagnostics`] bundles the evaluator
//! with a device summary and a rule-driven [`UserAgentParser`].

mod config;
mod db;
mod diagnostics;
mod error;
mod evaluator;
mod helpers;
mod hints;
mod parser;
mod parser_data;
mod report;
mod substitution;
mod summary;
mod types;
mod ua_parser;

pub use config::DiagnosticConfig;
pub use diagnostics::Diagnostics;
pub use error::{Error, Result};
pub use evaluator::{evaluate, Evaluator};
pub use hints::{DeviceHints, HintMatcher};
pub use report::DiagnosticReport;
pub use summary::{DeviceClassifier, DeviceSummary, Dimensions, ScreenInfo};
pub use types::*;
pub use ua_parser::UserAgentParser;
