use serde::{Serialize, Serializer};

/// Coarse form factor shown in the device summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Phone,
    Tablet,
    Desktop,
}

impl DeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phone => "Phone",
            Self::Tablet => "Tablet",
            Self::Desktop => "Desktop",
        }
    }
}

impl Serialize for DeviceClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Platform family derived from the iOS / Android hints alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Ios,
    Android,
    Desktop,
}

impl OsFamily {
    /// iOS takes precedence when both hints are set.
    pub fn from_hints(is_ios: bool, is_android: bool) -> Self {
        if is_ios {
            Self::Ios
        } else if is_android {
            Self::Android
        } else {
            Self::Desktop
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "iOS",
            Self::Android => "Android",
            Self::Desktop => "Desktop",
        }
    }
}

impl Serialize for OsFamily {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
