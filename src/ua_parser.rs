use super::db;
use super::error::Result;
use super::helpers::*;
use super::parser::CompiledParser;
use super::parser_data::*;
use super::substitution::substitute;
use super::types::*;
use std::borrow::Cow;
use std::path::Path;

/// Rule database compiled into the crate.
const BUNDLED_RULES: &str = include_str!("../rules/ua.yml");

/// Device vendor key that stands for "no vendor".
const UNKNOWN_VENDOR: &str = "Unknown";

/// Rule-driven User-Agent parser producing browser / engine / OS / device /
/// CPU fields for display.
///
/// This is the display-side collaborator; the diagnostics themselves only use
/// the token hints from [`HintMatcher`](crate::HintMatcher).
pub struct UserAgentParser {
    browser_parser: CompiledParser<VersionedData>,
    engine_parser: CompiledParser<VersionedData>,
    os_parser: CompiledParser<VersionedData>,
    device_parser: CompiledParser<DeviceData>,
    cpu_parser: CompiledParser<CpuData>,
}

impl UserAgentParser {
    /// Build a parser from the rule set shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_yaml_str(BUNDLED_RULES)
    }

    /// Load a rule file (same layout as `rules/ua.yml`) from `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(rules: &str) -> Result<Self> {
        let rules: db::RuleFile = serde_yaml::from_str(rules)?;
        Self::build(rules)
    }

    fn build(rules: db::RuleFile) -> Result<Self> {
        let db::RuleFile {
            browsers,
            engines,
            os,
            devices,
            cpu,
        } = rules;

        // Client-side sections and device/cpu sections compile concurrently.
        let (versioned, hardware) = rayon::join(
            || -> Result<_> {
                let browser_parser = build_versioned_parser(browsers)?;
                let engine_parser = build_versioned_parser(engines)?;
                let os_parser = build_versioned_parser(os)?;
                Ok((browser_parser, engine_parser, os_parser))
            },
            || -> Result<_> {
                let device_parser =
                    CompiledParser::build(devices.into_iter().flat_map(|(vendor, models)| {
                        models.into_iter().map(move |m| {
                            (
                                m.regex,
                                DeviceData {
                                    vendor: vendor.clone(),
                                    model_template: m.model,
                                    kind: m.device.as_deref().and_then(DeviceKind::from_str),
                                },
                            )
                        })
                    }))?;
                let cpu_parser = CompiledParser::build(cpu.into_iter().map(|c| {
                    (
                        c.regex,
                        CpuData {
                            architecture: c.architecture,
                        },
                    )
                }))?;
                Ok((device_parser, cpu_parser))
            },
        );

        let (browser_parser, engine_parser, os_parser) = versioned?;
        let (device_parser, cpu_parser) = hardware?;

        tracing::info!(
            browsers = browser_parser.len(),
            engines = engine_parser.len(),
            os = os_parser.len(),
            devices = device_parser.len(),
            cpu = cpu_parser.len(),
            "compiled user-agent rules"
        );

        Ok(Self {
            browser_parser,
            engine_parser,
            os_parser,
            device_parser,
            cpu_parser,
        })
    }

    /// Parse a User-Agent string. Sections without a matching rule are left
    /// at their defaults (all `None`).
    pub fn parse<'a>(&'a self, ua: &'a str) -> UserAgentInfo<'a> {
        let browser = self
            .browser_parser
            .match_first(ua)
            .map(|m| {
                let version = resolve_template(m.data.version_template.as_deref(), &m.captures);
                let major = version.as_ref().and_then(major_version);
                Browser {
                    name: non_empty(substitute(&m.data.name, &m.captures)),
                    version,
                    major,
                }
            })
            .unwrap_or_default();

        let engine = self
            .engine_parser
            .match_first(ua)
            .map(|m| Engine {
                name: non_empty(substitute(&m.data.name, &m.captures)),
                version: resolve_template(m.data.version_template.as_deref(), &m.captures),
            })
            .unwrap_or_default();

        let os = self
            .os_parser
            .match_first(ua)
            .map(|m| Os {
                name: non_empty(substitute(&m.data.name, &m.captures)),
                version: resolve_template(m.data.version_template.as_deref(), &m.captures)
                    .map(dotted_version),
            })
            .unwrap_or_default();

        let device = self
            .device_parser
            .match_first(ua)
            .map(|m| {
                let vendor = if m.data.vendor == UNKNOWN_VENDOR {
                    None
                } else {
                    non_empty(Cow::Borrowed(m.data.vendor.as_str()))
                };
                let model = m
                    .data
                    .model_template
                    .as_deref()
                    .and_then(|tpl| non_empty(substitute(tpl, &m.captures)));
                Device {
                    vendor,
                    model,
                    kind: m.data.kind,
                }
            })
            .unwrap_or_default();

        let cpu = self
            .cpu_parser
            .match_first(ua)
            .map(|m| Cpu {
                architecture: Some(Cow::Borrowed(m.data.architecture.as_str())),
            })
            .unwrap_or_default();

        UserAgentInfo {
            ua,
            browser,
            engine,
            os,
            device,
            cpu,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_versioned_parser(
    entries: Vec<db::VersionedEntry>,
) -> Result<CompiledParser<VersionedData>> {
    CompiledParser::build(entries.into_iter().map(|e| {
        (
            e.regex,
            VersionedData {
                name: e.name,
                version_template: e.version,
            },
        )
    }))
}
