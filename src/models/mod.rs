pub mod endpoint;
pub mod report;
pub mod snapshot;

pub use endpoint::{
    AuthProtocol, Credentials, DEFAULT_COMMUNITY, DEFAULT_PORT, Endpoint, PrivacyProtocol,
    SnmpVersion, UsmCredentials,
};
pub use report::{FieldOutcome, FieldReport};
pub use snapshot::{CoverRecord, DeviceInfo, Snapshot, SupplyRecord, SystemInfo, TrayRecord};
