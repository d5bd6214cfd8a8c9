use indexmap::IndexMap;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Rule file  (rules/ua.yml)
//
// Every section is an ordered list (or vendor-keyed map of lists) of regex
// rules. Order matters: the first matching rule of a section wins.
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RuleFile {
    #[serde(default)]
    pub browsers: Vec<VersionedEntry>,
    #[serde(default)]
    pub engines: Vec<VersionedEntry>,
    #[serde(default)]
    pub os: Vec<VersionedEntry>,
    #[serde(default)]
    pub devices: DeviceVendorMap,
    #[serde(default)]
    pub cpu: Vec<CpuEntry>,
}

/// Browser, engine and OS rules share one shape: a name and an optional
/// `$N` version template (capture group 1 when absent).
#[derive(Debug, Deserialize)]
pub(crate) struct VersionedEntry {
    pub regex: String,
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

// ---------------------------------------------------------------------------
// Devices
//
// Format: top-level mapping  vendor_name → [DeviceEntry, ...]
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct DeviceEntry {
    pub regex: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default, rename = "type")]
    pub device: Option<String>,
}

/// Uses IndexMap to preserve YAML insertion order (first-match-wins).
pub(crate) type DeviceVendorMap = IndexMap<String, Vec<DeviceEntry>>;

// ---------------------------------------------------------------------------
// CPU architectures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct CpuEntry {
    pub regex: String,
    pub architecture: String,
}
