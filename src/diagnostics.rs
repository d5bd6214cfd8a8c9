use crate::config::DiagnosticConfig;
use crate::error::Result;
use crate::evaluator::Evaluator;
use crate::report::DiagnosticReport;
use crate::summary::{DeviceClassifier, DeviceSummary};
use crate::types::{DeviceSnapshot, DiagnosticResult, UserAgentInfo};
use crate::ua_parser::UserAgentParser;

/// One-stop entry point bundling the evaluator, the device classifier and
/// (optionally) a User-Agent parser.
///
/// Build it once and call [`Diagnostics::report`] whenever the host signals
/// a measurement change; every call recomputes from scratch.
pub struct Diagnostics {
    evaluator: Evaluator,
    classifier: DeviceClassifier,
    ua_parser: Option<UserAgentParser>,
}

impl Diagnostics {
    /// Diagnostics with the bundled User-Agent rules.
    pub fn new(config: DiagnosticConfig) -> Result<Self> {
        let diagnostics = Self::without_ua_parser(config)?;
        Ok(diagnostics.with_ua_parser(UserAgentParser::bundled()?))
    }

    pub fn without_ua_parser(config: DiagnosticConfig) -> Result<Self> {
        Ok(Self {
            evaluator: Evaluator::new(config)?,
            classifier: DeviceClassifier::new()?,
            ua_parser: None,
        })
    }

    pub fn with_ua_parser(mut self, parser: UserAgentParser) -> Self {
        self.ua_parser = Some(parser);
        self
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Start a snapshot for `ua` with its device hints filled in.
    pub fn snapshot(&self, ua: impl Into<String>) -> DeviceSnapshot {
        DeviceSnapshot::from_user_agent(ua, self.classifier.hint_matcher())
    }

    pub fn evaluate(&self, snapshot: &DeviceSnapshot) -> DiagnosticResult {
        self.evaluator.evaluate(snapshot)
    }

    pub fn summarize(&self, snapshot: &DeviceSnapshot) -> DeviceSummary {
        self.classifier.summarize(snapshot)
    }

    pub fn parse_user_agent<'a>(&'a self, ua: &'a str) -> Option<UserAgentInfo<'a>> {
        self.ua_parser.as_ref().map(|p| p.parse(ua))
    }

    pub fn report<'a>(&'a self, snapshot: &'a DeviceSnapshot) -> DiagnosticReport<'a> {
        DiagnosticReport::build(
            snapshot,
            &self.evaluator,
            &self.classifier,
            self.ua_parser.as_ref(),
        )
    }
}
