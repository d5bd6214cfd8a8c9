use aho_corasick::AhoCorasick;
use serde::Serialize;

use crate::error::Result;

/// Device tokens that mark an iOS browser. Case-sensitive, as in the UA.
const IOS_TOKENS: &[&str] = &["iPad", "iPhone", "iPod"];

const ANDROID_TOKENS: &[&str] = &["Android"];

/// Tokens that mark a handheld browser. Matched case-insensitively.
const MOBILE_TOKENS: &[&str] = &[
    "Android",
    "iPhone",
    "iPad",
    "iPod",
    "BlackBerry",
    "IEMobile",
    "Opera Mini",
];

/// Boolean platform hints derived by plain token matching on the UA string.
///
/// These are deliberately independent of the rule-driven
/// [`UserAgentParser`](crate::UserAgentParser): the diagnostics only ever
/// need to know "is this iOS / Android / handheld".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeviceHints {
    pub is_ios: bool,
    pub is_android: bool,
    pub is_mobile: bool,
}

/// Pre-built token automata for [`DeviceHints`] extraction.
pub struct HintMatcher {
    ios: AhoCorasick,
    android: AhoCorasick,
    mobile: AhoCorasick,
}

impl HintMatcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            ios: AhoCorasick::new(IOS_TOKENS)?,
            android: AhoCorasick::new(ANDROID_TOKENS)?,
            mobile: AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .build(MOBILE_TOKENS)?,
        })
    }

    pub fn hints(&self, ua: &str) -> DeviceHints {
        DeviceHints {
            is_ios: self.ios.is_match(ua),
            is_android: self.android.is_match(ua),
            is_mobile: self.mobile.is_match(ua),
        }
    }
}
