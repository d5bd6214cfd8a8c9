mod device_class;
mod device_kind;
mod diagnosis;
mod snapshot;
mod ua_info;

pub use device_class::*;
pub use device_kind::*;
pub use diagnosis::*;
pub use snapshot::*;
pub use ua_info::*;
