pub mod clients_enum;
pub mod error;
pub mod mock;
pub mod oid;
pub mod session;
pub mod v1;
pub mod v2c;
pub mod v3;
pub mod value;
pub mod walk;

pub use clients_enum::SnmpClient;
pub use error::SnmpError;
pub use oid::{RowIndex, parse_arcs, parse_oid};
pub use session::{CallPolicy, Connector, Session, SnmpSession, UdpConnector};
pub use v1::SnmpClientV1;
pub use v2c::SnmpClientV2c;
pub use v3::SnmpClientV3;
pub use value::RawValue;
