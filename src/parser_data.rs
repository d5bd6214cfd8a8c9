use super::types::DeviceKind;

// ---------------------------------------------------------------------------
// Internal data structs carried inside CompiledParser<T>
// ---------------------------------------------------------------------------

/// Browser, engine and OS rule payload.
pub(crate) struct VersionedData {
    pub name: String,
    pub version_template: Option<String>,
}

pub(crate) struct DeviceData {
    pub vendor: String,
    pub model_template: Option<String>,
    pub kind: Option<DeviceKind>,
}

pub(crate) struct CpuData {
    pub architecture: String,
}
