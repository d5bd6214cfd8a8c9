use serde::{Serialize, Serializer};

/// Hardware category reported by the User-Agent rule database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Mobile,
    Tablet,
    SmartTv,
    Console,
    Wearable,
    Embedded,
    Xr,
}

impl DeviceKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mobile" | "smartphone" | "phone" => Some(Self::Mobile),
            "tablet" => Some(Self::Tablet),
            "smarttv" | "tv" | "smart tv" => Some(Self::SmartTv),
            "console" => Some(Self::Console),
            "wearable" => Some(Self::Wearable),
            "embedded" => Some(Self::Embedded),
            "xr" => Some(Self::Xr),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::SmartTv => "smarttv",
            Self::Console => "console",
            Self::Wearable => "wearable",
            Self::Embedded => "embedded",
            Self::Xr => "xr",
        }
    }
}

impl Serialize for DeviceKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
