use aho_corasick::AhoCorasick;
use fancy_regex::Regex;
use serde::Serialize;

use crate::error::Result;
use crate::hints::HintMatcher;
use crate::types::{DeviceClass, DeviceSnapshot, OsFamily};

/// Tablet shape: an iPad token, or an Android UA whose platform section is
/// followed by AppleWebKit.
const TABLET_PATTERN: &str = r"(?i)\(iPad|Android.*?(?:Mobile)?[;)][^)]*?AppleWebKit";

/// Any of these (case-sensitive) vetoes the tablet classification.
const HANDSET_TOKENS: &[&str] = &["iPhone", "Mobile"];

/// Headline device facts: the "device info" card shown next to the
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceSummary {
    pub viewport: Dimensions,
    pub screen: ScreenInfo,
    pub is_mobile: bool,
    pub device_class: DeviceClass,
    pub os_family: OsFamily,
    pub platform: String,
    pub orientation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenInfo {
    pub width: u32,
    pub height: u32,
    pub ratio: f64,
}

pub struct DeviceClassifier {
    hints: HintMatcher,
    tablet: Regex,
    handset: AhoCorasick,
}

impl DeviceClassifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            hints: HintMatcher::new()?,
            tablet: Regex::new(TABLET_PATTERN)?,
            handset: AhoCorasick::new(HANDSET_TOKENS)?,
        })
    }

    pub fn hint_matcher(&self) -> &HintMatcher {
        &self.hints
    }

    pub fn classify(&self, ua: &str) -> DeviceClass {
        let is_tablet =
            self.tablet.is_match(ua).unwrap_or(false) && !self.handset.is_match(ua);
        if is_tablet {
            DeviceClass::Tablet
        } else if self.hints.hints(ua).is_mobile {
            DeviceClass::Phone
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn summarize(&self, snapshot: &DeviceSnapshot) -> DeviceSummary {
        let ua = snapshot.user_agent.as_str();
        DeviceSummary {
            viewport: Dimensions {
                width: snapshot.viewport_inner_width,
                height: snapshot.viewport_inner_height,
            },
            screen: ScreenInfo {
                width: snapshot.screen_width,
                height: snapshot.screen_height,
                ratio: snapshot.device_pixel_ratio,
            },
            is_mobile: self.hints.hints(ua).is_mobile,
            device_class: self.classify(ua),
            os_family: OsFamily::from_hints(snapshot.is_ios_hint, snapshot.is_android_hint),
            platform: non_empty_or(snapshot.platform.as_deref(), "Unknown"),
            orientation: non_empty_or(snapshot.orientation.as_deref(), "unknown"),
        }
    }
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}
