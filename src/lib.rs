//! Shoal: a minimal broker endpoint speaking the Kafka binary wire protocol.
//!
//! Answers ApiVersions (18) and DescribeTopicPartitions (75); every queried
//! topic is reported as unknown since no topic catalog exists.

pub mod error;
pub mod protocol;
pub mod server;

pub use error::{Result, ShoalError};
pub use protocol::{ApiKey, RequestHeader};
pub use server::{run_server, run_server_on_listener};
