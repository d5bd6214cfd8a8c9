use serde::Serialize;

use crate::error::Result;
use crate::evaluator::Evaluator;
use crate::summary::{DeviceClassifier, DeviceSummary};
use crate::types::{DeviceSnapshot, DiagnosticResult, UserAgentInfo};
use crate::ua_parser::UserAgentParser;

/// Everything known about one snapshot, ready to render or dump.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport<'a> {
    pub snapshot: &'a DeviceSnapshot,
    pub summary: DeviceSummary,
    pub diagnosis: DiagnosticResult,
    /// Absent when the report was built without a UA parser.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<UserAgentInfo<'a>>,
}

impl<'a> DiagnosticReport<'a> {
    pub fn build(
        snapshot: &'a DeviceSnapshot,
        evaluator: &Evaluator,
        classifier: &DeviceClassifier,
        ua_parser: Option<&'a UserAgentParser>,
    ) -> Self {
        Self {
            snapshot,
            summary: classifier.summarize(snapshot),
            diagnosis: evaluator.evaluate(snapshot),
            user_agent: ua_parser.map(|p| p.parse(&snapshot.user_agent)),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
