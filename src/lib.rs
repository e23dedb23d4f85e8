//! Опрос сетевых принтеров по SNMP и сборка нормализованных снимков
//! состояния из Printer-MIB, Host Resources и MIB-II.

pub mod catalog;
pub mod collector;
pub mod config;
pub mod decode;
pub mod discovery;
pub mod formatter;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod routes;
pub mod snmp;

pub use collector::{PollError, SnmpCollector};
pub use models::{Endpoint, Snapshot};
pub use snmp::{CallPolicy, UdpConnector};
