use rayon::prelude::*;

use crate::config::DiagnosticConfig;
use crate::error::Result;
use crate::types::{DeviceSnapshot, DiagnosticResult, IosVersion, Warning};

/// Evaluate `snapshot` with the default thresholds.
pub fn evaluate(snapshot: &DeviceSnapshot) -> DiagnosticResult {
    evaluate_with(&DiagnosticConfig::default(), snapshot)
}

/// Stateless diagnostic evaluator.
///
/// Holds only its (validated) configuration, so one instance can be shared
/// freely across threads and re-invoked on every resize/scroll/zoom event.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: DiagnosticConfig,
}

impl Evaluator {
    pub fn new(config: DiagnosticConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DiagnosticConfig {
        &self.config
    }

    pub fn evaluate(&self, snapshot: &DeviceSnapshot) -> DiagnosticResult {
        evaluate_with(&self.config, snapshot)
    }

    /// Evaluate many snapshots in parallel. Output order matches input order.
    pub fn evaluate_batch(&self, snapshots: &[DeviceSnapshot]) -> Vec<DiagnosticResult> {
        snapshots.par_iter().map(|s| self.evaluate(s)).collect()
    }
}

fn evaluate_with(config: &DiagnosticConfig, snapshot: &DeviceSnapshot) -> DiagnosticResult {
    let scale = snapshot.effective_scale();
    let input_font = snapshot.effective_input_font();

    let is_content_overflow = content_overflows(
        snapshot.document_scroll_width,
        snapshot.viewport_inner_width,
        config.overflow_tolerance_percent,
    );

    let ios_version = if snapshot.is_ios_hint {
        IosVersion::from_user_agent(&snapshot.user_agent)
    } else {
        None
    };

    // 0 means "no inputs on the page" and never counts as a small font.
    let has_small_input_font = input_font > 0.0 && input_font < config.min_input_font_px;

    let prefers_large_text =
        snapshot.is_ios_hint && scale > config.large_text_scale && has_small_input_font;

    let mut warnings = Vec::new();

    if scale > config.zoom_warning_scale {
        warnings.push(Warning::Zoomed { scale });
    }

    let has_viewport_meta = snapshot
        .meta_viewport_content
        .as_deref()
        .map_or(false, |c| c.contains(config.required_viewport_token.as_str()));
    if !has_viewport_meta {
        warnings.push(Warning::MissingMetaViewport);
    }

    if is_content_overflow {
        warnings.push(Warning::ContentOverflow);
    }

    if snapshot.is_ios_hint && has_small_input_font {
        warnings.push(Warning::SmallInputFont {
            size_px: input_font,
            min_px: config.min_input_font_px,
        });
    }

    if prefers_large_text {
        warnings.push(Warning::PrefersLargeText);
    }

    tracing::debug!(
        scale,
        is_content_overflow,
        prefers_large_text,
        warnings = warnings.len(),
        "evaluated device snapshot"
    );

    DiagnosticResult {
        is_content_overflow,
        prefers_large_text,
        ios_version,
        warnings,
    }
}

/// `scroll_width > inner_width * (1 + tolerance/100)`, in exact integer
/// arithmetic so the boundary itself is never overflow.
///
/// An unknown (zero) viewport width yields no overflow signal.
fn content_overflows(scroll_width: u32, inner_width: u32, tolerance_percent: u32) -> bool {
    if inner_width == 0 {
        return false;
    }
    let scroll = u64::from(scroll_width) * 100;
    let limit = u64::from(inner_width) * (100 + u64::from(tolerance_percent));
    scroll > limit
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 16_2_1 like Mac OS X) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.2 Mobile/15E148 Safari/604.1";

    fn clean() -> DeviceSnapshot {
        DeviceSnapshot::default()
            .with_meta_viewport("width=device-width, initial-scale=1")
            .with_viewport(375, 667)
            .with_document_scroll_width(375)
    }

    fn ios(ua: &str) -> DeviceSnapshot {
        DeviceSnapshot {
            user_agent: ua.to_string(),
            is_ios_hint: true,
            ..clean()
        }
    }

    #[test]
    fn clean_snapshot_has_no_warnings() {
        let result = evaluate(&clean());
        assert!(!result.is_content_overflow);
        assert!(!result.prefers_large_text);
        assert!(result.ios_version.is_none());
        assert!(!result.has_warnings());
    }

    #[test]
    fn deterministic() {
        let snap = ios(IPHONE_UA)
            .with_visual_viewport_scale(1.4)
            .with_smallest_input_font(12.0);
        let first = evaluate(&snap);
        for _ in 0..5 {
            assert_eq!(evaluate(&snap), first);
        }
    }

    #[test]
    fn overflow_boundary_is_strict() {
        // 20 * 1.05 == 21 exactly.
        let at = clean().with_viewport(20, 0).with_document_scroll_width(21);
        assert!(!evaluate(&at).is_content_overflow);
        let over = clean().with_viewport(20, 0).with_document_scroll_width(22);
        assert!(evaluate(&over).is_content_overflow);

        // 375 * 1.05 == 393.75
        let below = clean().with_document_scroll_width(393);
        assert!(!evaluate(&below).is_content_overflow);
        let above = clean().with_document_scroll_width(394);
        assert!(evaluate(&above).is_content_overflow);
    }

    #[test]
    fn unknown_viewport_width_is_not_overflow() {
        let snap = clean().with_viewport(0, 0).with_document_scroll_width(500);
        assert!(!evaluate(&snap).is_content_overflow);
    }

    #[test]
    fn zoom_warning_mentions_scale() {
        let result = evaluate(&clean().with_visual_viewport_scale(1.25));
        assert_eq!(result.warning_kinds(), vec!["zoomed"]);
        assert!(result.messages()[0].contains("1.25"));
    }

    #[test]
    fn zoom_at_threshold_is_not_zoomed() {
        let result = evaluate(&clean().with_visual_viewport_scale(1.1));
        assert!(!result.has_warnings());
    }

    #[test]
    fn meta_viewport_presence() {
        assert!(!evaluate(&clean()).has_warnings());

        let mut missing = clean();
        missing.meta_viewport_content = None;
        assert_eq!(evaluate(&missing).warnings, vec![Warning::MissingMetaViewport]);

        let invalid = clean().with_meta_viewport("initial-scale=1");
        assert_eq!(evaluate(&invalid).warnings, vec![Warning::MissingMetaViewport]);
    }

    #[test]
    fn small_input_font_on_ios() {
        let result = evaluate(&ios(IPHONE_UA).with_smallest_input_font(14.0));
        assert_eq!(result.warning_kinds(), vec!["small_input_font"]);
        assert!(result.messages()[0].contains("14"));
    }

    #[test]
    fn no_inputs_is_not_small_font() {
        let result = evaluate(
            &ios(IPHONE_UA)
                .with_smallest_input_font(0.0)
                .with_visual_viewport_scale(1.05),
        );
        assert!(!result.has_warnings());
        assert!(!result.prefers_large_text);
    }

    #[test]
    fn no_inputs_never_triggers_large_text() {
        let result = evaluate(
            &ios(IPHONE_UA)
                .with_smallest_input_font(0.0)
                .with_visual_viewport_scale(1.5),
        );
        assert!(!result.prefers_large_text);
        assert_eq!(result.warning_kinds(), vec!["zoomed"]);
    }

    #[test]
    fn font_at_minimum_is_not_small() {
        let result = evaluate(&ios(IPHONE_UA).with_smallest_input_font(16.0));
        assert!(!result.has_warnings());

        let result = evaluate(&ios(IPHONE_UA).with_smallest_input_font(15.99));
        assert_eq!(result.warning_kinds(), vec!["small_input_font"]);
    }

    #[test]
    fn large_text_scale_threshold_is_strict() {
        let at = evaluate(
            &ios(IPHONE_UA)
                .with_visual_viewport_scale(1.3)
                .with_smallest_input_font(12.0),
        );
        assert!(!at.prefers_large_text);
        assert_eq!(at.warning_kinds(), vec!["zoomed", "small_input_font"]);

        let above = evaluate(
            &ios(IPHONE_UA)
                .with_visual_viewport_scale(1.31)
                .with_smallest_input_font(12.0),
        );
        assert!(above.prefers_large_text);
    }

    #[test]
    fn unusable_scale_is_not_zoomed() {
        for scale in [f64::NAN, 0.0, -2.0, f64::INFINITY, f64::NEG_INFINITY] {
            let result = evaluate(
                &ios(IPHONE_UA)
                    .with_visual_viewport_scale(scale)
                    .with_smallest_input_font(12.0),
            );
            assert!(!result.prefers_large_text, "scale {}", scale);
            assert_eq!(result.warning_kinds(), vec!["small_input_font"], "scale {}", scale);
        }
    }

    #[test]
    fn zoom_message_rounds_ties_up() {
        let result = evaluate(&clean().with_visual_viewport_scale(1.125));
        assert_eq!(result.messages(), vec!["Page is zoomed in (scale: 1.13)"]);
        let result = evaluate(&clean().with_visual_viewport_scale(1.625));
        assert_eq!(result.messages(), vec!["Page is zoomed in (scale: 1.63)"]);
    }

    #[test]
    fn small_font_off_ios_is_ignored() {
        let result = evaluate(&clean().with_smallest_input_font(12.0));
        assert!(!result.has_warnings());
    }

    #[test]
    fn ios_version_only_with_ios_hint() {
        let result = evaluate(&ios(IPHONE_UA));
        assert_eq!(result.ios_version, Some(IosVersion::new(16, 2, 1)));

        let not_ios = DeviceSnapshot {
            user_agent: IPHONE_UA.to_string(),
            ..clean()
        };
        assert_eq!(evaluate(&not_ios).ios_version, None);

        let no_pattern = ios("Mozilla/5.0 (iPad) Safari");
        assert_eq!(evaluate(&no_pattern).ios_version, None);
    }

    #[test]
    fn ios_version_without_patch() {
        let result = evaluate(&ios("Mozilla/5.0 (iPhone; CPU iPhone OS 16_2 like Mac OS X)"));
        assert_eq!(result.ios_version, Some(IosVersion::new(16, 2, 0)));
    }

    #[test]
    fn all_warnings_in_fixed_order() {
        let snap = DeviceSnapshot {
            user_agent: IPHONE_UA.to_string(),
            is_ios_hint: true,
            visual_viewport_scale: 1.5,
            smallest_input_font_size_px: 12.0,
            meta_viewport_content: None,
            document_scroll_width: 400,
            viewport_inner_width: 375,
            ..DeviceSnapshot::default()
        };
        let result = evaluate(&snap);
        assert!(result.is_content_overflow);
        assert!(result.prefers_large_text);
        assert_eq!(
            result.warning_kinds(),
            vec![
                "zoomed",
                "missing_meta_viewport",
                "content_overflow",
                "small_input_font",
                "prefers_large_text",
            ]
        );
    }

    #[test]
    fn custom_config_changes_thresholds() {
        let evaluator = Evaluator::new(DiagnosticConfig {
            zoom_warning_scale: 2.0,
            overflow_tolerance_percent: 0,
            ..DiagnosticConfig::default()
        })
        .unwrap();
        let snap = clean()
            .with_visual_viewport_scale(1.5)
            .with_document_scroll_width(376);
        let result = evaluator.evaluate(&snap);
        assert_eq!(result.warning_kinds(), vec!["content_overflow"]);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = DiagnosticConfig {
            large_text_scale: f64::INFINITY,
            ..DiagnosticConfig::default()
        };
        assert!(Evaluator::new(config).is_err());
    }

    #[test]
    fn batch_preserves_order() {
        let evaluator = Evaluator::default();
        let snaps: Vec<DeviceSnapshot> = (0..64)
            .map(|i| clean().with_document_scroll_width(370 + i))
            .collect();
        let batch = evaluator.evaluate_batch(&snaps);
        let sequential: Vec<_> = snaps.iter().map(|s| evaluator.evaluate(s)).collect();
        assert_eq!(batch, sequential);
    }
}
