//! Typed requests and per-api-key body decoders.

use crate::error::Result;
use crate::protocol::codec::ByteReader;

/// Closed set of api keys this server routes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKey {
    /// Capability negotiation (18).
    ApiVersions,
    /// Topic metadata (75).
    DescribeTopicPartitions,
    /// Anything else; never dispatched.
    Unknown(i16),
}

impl From<i16> for ApiKey {
    fn from(raw: i16) -> Self {
        match raw {
            super::API_VERSIONS => ApiKey::ApiVersions,
            super::DESCRIBE_TOPIC_PARTITIONS => ApiKey::DescribeTopicPartitions,
            other => ApiKey::Unknown(other),
        }
    }
}

/// One requested topic. List order is significant: the response echoes
/// topics back in exactly this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicQuery {
    pub name: String,
}

/// DescribeTopicPartitions request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeTopicPartitionsRequest {
    pub topics: Vec<TopicQuery>,
    pub response_partition_limit: u32,
    /// Pagination marker; `0xff` means no cursor.
    pub cursor: u8,
}

pub const NULL_CURSOR: u8 = 0xff;

impl DescribeTopicPartitionsRequest {
    /// Decode the body following the request header: tag byte, compact topic
    /// array, partition limit, cursor, trailing tag byte.
    pub fn decode(r: &mut ByteReader<'_>) -> Result<DescribeTopicPartitionsRequest> {
        r.skip_tag_buffer()?;
        let stored = r.get_u8("topic array length")?;
        let count = (stored as usize).saturating_sub(1);
        let mut topics = Vec::with_capacity(count);
        for _ in 0..count {
            let name = r.get_compact_string("topic name")?;
            r.skip_tag_buffer()?;
            topics.push(TopicQuery { name });
        }
        let response_partition_limit = r.get_u32("response_partition_limit")?;
        let cursor = r.get_u8("cursor")?;
        r.skip_tag_buffer()?;
        Ok(DescribeTopicPartitionsRequest {
            topics,
            response_partition_limit,
            cursor,
        })
    }
}
