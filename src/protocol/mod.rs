//! Kafka binary wire protocol: framing, header, request/response codecs.
//!
//! Frame: u32 (BE) length + payload; the length excludes itself.
//! Request payload: header (api_key, api_version, correlation_id,
//! client_id) + per-api-key body.

mod codec;
mod header;
mod request;
mod response;
mod version;

pub use codec::{put_compact_len, put_compact_string, put_tag_buffer, ByteReader};
pub use header::RequestHeader;
pub use request::{ApiKey, DescribeTopicPartitionsRequest, TopicQuery, NULL_CURSOR};
pub use response::{
    patch_frame_len, ApiVersionsResponse, DescribeTopicPartitionsResponse, TopicPartitionsResult,
};
pub use version::{negotiate, ApiVersionRange, SUPPORTED_APIS};

/// Capability negotiation.
pub const API_VERSIONS: i16 = 18;
/// Topic metadata.
pub const DESCRIBE_TOPIC_PARTITIONS: i16 = 75;

pub const ERROR_NONE: i16 = 0;
pub const ERROR_UNKNOWN_TOPIC: i16 = 3;
pub const ERROR_UNSUPPORTED_VERSION: i16 = 35;
