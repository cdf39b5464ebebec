pub mod alert;
pub mod instance_type;
pub mod launch;

pub use alert::{Alert, AlertKind};
pub use instance_type::{find_instance_type, InstanceCategory, InstanceTypeInfo, INSTANCE_CATALOG};
pub use launch::{InstanceLaunchRequest, LaunchKind, LaunchSelection};
