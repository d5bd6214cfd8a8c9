use serde::{Deserialize, Serialize};

use crate::hints::{DeviceHints, HintMatcher};

/// One point-in-time capture of the measurable browser/device signals.
///
/// The host environment (a browser, a test harness, a log replay) fills this
/// in; the evaluator never reads ambient state. Fields that the host could
/// not measure keep their defaults: scale `1.0`, smallest input font `0.0`
/// (no inputs on the page), optional texts absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSnapshot {
    pub user_agent: String,
    pub is_ios_hint: bool,
    pub is_android_hint: bool,
    /// `content` attribute of `<meta name="viewport">`, if the tag exists.
    pub meta_viewport_content: Option<String>,
    /// Pinch-zoom factor of the visual viewport.
    pub visual_viewport_scale: f64,
    pub document_scroll_width: u32,
    pub viewport_inner_width: u32,
    pub viewport_inner_height: u32,
    /// `document.body.clientWidth`; 0 when there is no body.
    pub body_client_width: u32,
    /// Smallest computed font size among input/textarea elements, in px.
    pub smallest_input_font_size_px: f64,
    pub screen_width: u32,
    pub screen_height: u32,
    pub device_pixel_ratio: f64,
    pub platform: Option<String>,
    pub orientation: Option<String>,
    /// Page URL at capture time.
    pub href: Option<String>,
    /// Empty referrers are kept as `None`.
    pub referrer: Option<String>,
}

impl Default for DeviceSnapshot {
    fn default() -> Self {
        Self {
            user_agent: String::new(),
            is_ios_hint: false,
            is_android_hint: false,
            meta_viewport_content: None,
            visual_viewport_scale: 1.0,
            document_scroll_width: 0,
            viewport_inner_width: 0,
            viewport_inner_height: 0,
            body_client_width: 0,
            smallest_input_font_size_px: 0.0,
            screen_width: 0,
            screen_height: 0,
            device_pixel_ratio: 1.0,
            platform: None,
            orientation: None,
            href: None,
            referrer: None,
        }
    }
}

impl DeviceSnapshot {
    /// Start a snapshot for `ua` with the device hints derived by `matcher`.
    pub fn from_user_agent(ua: impl Into<String>, matcher: &HintMatcher) -> Self {
        let user_agent = ua.into();
        let hints = matcher.hints(&user_agent);
        Self {
            user_agent,
            ..Self::default()
        }
        .with_hints(hints)
    }

    pub fn with_hints(mut self, hints: DeviceHints) -> Self {
        self.is_ios_hint = hints.is_ios;
        self.is_android_hint = hints.is_android;
        self
    }

    pub fn with_meta_viewport(mut self, content: impl Into<String>) -> Self {
        self.meta_viewport_content = Some(content.into());
        self
    }

    pub fn with_visual_viewport_scale(mut self, scale: f64) -> Self {
        self.visual_viewport_scale = scale;
        self
    }

    pub fn with_viewport(mut self, inner_width: u32, inner_height: u32) -> Self {
        self.viewport_inner_width = inner_width;
        self.viewport_inner_height = inner_height;
        self
    }

    pub fn with_body_client_width(mut self, width: u32) -> Self {
        self.body_client_width = width;
        self
    }

    pub fn with_document_scroll_width(mut self, width: u32) -> Self {
        self.document_scroll_width = width;
        self
    }

    pub fn with_smallest_input_font(mut self, size_px: f64) -> Self {
        self.smallest_input_font_size_px = size_px;
        self
    }

    pub fn with_screen(mut self, width: u32, height: u32, device_pixel_ratio: f64) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self.device_pixel_ratio = device_pixel_ratio;
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn with_orientation(mut self, orientation: impl Into<String>) -> Self {
        self.orientation = Some(orientation.into());
        self
    }

    pub fn with_environment(mut self, href: impl Into<String>, referrer: impl Into<String>) -> Self {
        self.href = Some(href.into());
        let referrer = referrer.into();
        self.referrer = (!referrer.is_empty()).then_some(referrer);
        self
    }

    /// Parse a snapshot from YAML. JSON input works too, YAML being a superset.
    pub fn from_yaml_str(s: &str) -> crate::Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Visual viewport scale with unusable values replaced by `1.0`.
    pub(crate) fn effective_scale(&self) -> f64 {
        let scale = self.visual_viewport_scale;
        if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            tracing::warn!(scale, "unusable visual viewport scale, assuming 1.0");
            1.0
        }
    }

    /// Smallest input font size with unusable values replaced by `0.0`
    /// ("no inputs").
    pub(crate) fn effective_input_font(&self) -> f64 {
        let size = self.smallest_input_font_size_px;
        if size.is_finite() && size >= 0.0 {
            size
        } else {
            tracing::warn!(size, "unusable input font size, treating as no inputs");
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let snap = DeviceSnapshot::from_yaml_str("user_agent: curl/8.0\nviewport_inner_width: 375\n")
            .unwrap();
        assert_eq!(snap.user_agent, "curl/8.0");
        assert_eq!(snap.viewport_inner_width, 375);
        assert_eq!(snap.visual_viewport_scale, 1.0);
        assert_eq!(snap.smallest_input_font_size_px, 0.0);
        assert!(snap.meta_viewport_content.is_none());
    }

    #[test]
    fn json_input_is_accepted() {
        let snap = DeviceSnapshot::from_yaml_str(
            r#"{"is_ios_hint": true, "visual_viewport_scale": 1.5, "meta_viewport_content": null}"#,
        )
        .unwrap();
        assert!(snap.is_ios_hint);
        assert_eq!(snap.visual_viewport_scale, 1.5);
        assert!(snap.meta_viewport_content.is_none());
    }

    #[test]
    fn unusable_measurements_fall_back() {
        let snap = DeviceSnapshot::default()
            .with_visual_viewport_scale(f64::NAN)
            .with_smallest_input_font(-3.0);
        assert_eq!(snap.effective_scale(), 1.0);
        assert_eq!(snap.effective_input_font(), 0.0);

        let zero = DeviceSnapshot::default().with_visual_viewport_scale(0.0);
        assert_eq!(zero.effective_scale(), 1.0);
    }

    #[test]
    fn environment_drops_empty_referrer() {
        let snap = DeviceSnapshot::default()
            .with_body_client_width(360)
            .with_environment("https://example.com/ua", "");
        assert_eq!(snap.body_client_width, 360);
        assert_eq!(snap.href.as_deref(), Some("https://example.com/ua"));
        assert!(snap.referrer.is_none());

        let linked = snap.with_environment("https://example.com/ua", "https://example.com/");
        assert_eq!(linked.referrer.as_deref(), Some("https://example.com/"));
    }

    #[test]
    fn from_user_agent_derives_hints() {
        let matcher = HintMatcher::new().unwrap();
        let snap = DeviceSnapshot::from_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 16_2 like Mac OS X)",
            &matcher,
        );
        assert!(snap.is_ios_hint);
        assert!(!snap.is_android_hint);
    }
}
