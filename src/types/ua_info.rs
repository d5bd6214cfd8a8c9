use std::borrow::Cow;

use serde::Serialize;

/// Structured User-Agent fields for display.
///
/// Borrows from both the parser's rule data and the UA string, so fields
/// without `$N` substitution avoid allocation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserAgentInfo<'a> {
    pub ua: &'a str,
    pub browser: Browser<'a>,
    pub engine: Engine<'a>,
    pub os: Os<'a>,
    pub device: Device<'a>,
    pub cpu: Cpu<'a>,
}

impl<'a> UserAgentInfo<'a> {
    /// True when no rule matched at all.
    pub fn is_empty(&self) -> bool {
        self.browser.name.is_none()
            && self.engine.name.is_none()
            && self.os.name.is_none()
            && self.device.vendor.is_none()
            && self.device.model.is_none()
            && self.device.kind.is_none()
            && self.cpu.architecture.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Browser<'a> {
    pub name: Option<Cow<'a, str>>,
    pub version: Option<Cow<'a, str>>,
    /// Leading numeric component of `version`.
    pub major: Option<Cow<'a, str>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Engine<'a> {
    pub name: Option<Cow<'a, str>>,
    pub version: Option<Cow<'a, str>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Os<'a> {
    pub name: Option<Cow<'a, str>>,
    pub version: Option<Cow<'a, str>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Device<'a> {
    pub vendor: Option<Cow<'a, str>>,
    pub model: Option<Cow<'a, str>>,
    #[serde(rename = "type")]
    pub kind: Option<super::DeviceKind>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Cpu<'a> {
    pub architecture: Option<Cow<'a, str>>,
}
