//! Typed responses and their wire encoders.
//!
//! Every encoder emits a full frame starting with a 4-byte length
//! placeholder; [`patch_frame_len`] overwrites it last with the payload
//! length (the size field excludes itself).

use crate::protocol::codec::{put_compact_len, put_compact_string, put_tag_buffer};
use crate::protocol::request::{DescribeTopicPartitionsRequest, NULL_CURSOR};
use crate::protocol::version::SUPPORTED_APIS;
use crate::protocol::ERROR_UNKNOWN_TOPIC;
use bytes::{BufMut, BytesMut};

/// Authorized-operations bitmask advertised per topic (the read set).
const TOPIC_AUTHORIZED_OPS_READ: i32 = 0x0000_0df8;

/// Overwrite the leading placeholder with `len - 4`. Invariant on every
/// outbound frame: the declared size counts only the bytes after itself.
pub fn patch_frame_len(frame: &mut BytesMut) {
    let len = (frame.len() - 4) as u32;
    frame[0..4].copy_from_slice(&len.to_be_bytes());
}

fn frame_with_placeholder() -> BytesMut {
    let mut dst = BytesMut::with_capacity(64);
    dst.put_u32(0);
    dst
}

/// ApiVersions response: the advertised capability set plus the negotiated
/// error code.
#[derive(Debug, Clone)]
pub struct ApiVersionsResponse {
    pub correlation_id: u32,
    pub error_code: i16,
}

impl ApiVersionsResponse {
    pub fn encode(&self) -> BytesMut {
        let mut dst = frame_with_placeholder();
        dst.put_u32(self.correlation_id);
        dst.put_i16(self.error_code);
        put_compact_len(&mut dst, SUPPORTED_APIS.len());
        for api in SUPPORTED_APIS {
            dst.put_i16(api.api_key);
            dst.put_i16(api.min_version);
            dst.put_i16(api.max_version);
            put_tag_buffer(&mut dst);
        }
        dst.put_u32(0); // throttle_time_ms
        put_tag_buffer(&mut dst);
        patch_frame_len(&mut dst);
        dst
    }
}

/// Per-topic answer inside a DescribeTopicPartitions response, produced in
/// the same order the topics were requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicPartitionsResult {
    pub error_code: i16,
    pub name: String,
    pub topic_id: [u8; 16],
    pub is_internal: bool,
    pub authorized_ops: i32,
}

/// DescribeTopicPartitions response.
#[derive(Debug, Clone)]
pub struct DescribeTopicPartitionsResponse {
    pub correlation_id: u32,
    pub topics: Vec<TopicPartitionsResult>,
    pub cursor: u8,
}

impl DescribeTopicPartitionsResponse {
    /// Answer every requested topic as unknown: no catalog exists, so each
    /// result carries UNKNOWN_TOPIC and the all-zero topic id.
    pub fn unknown_topics(
        correlation_id: u32,
        request: &DescribeTopicPartitionsRequest,
    ) -> DescribeTopicPartitionsResponse {
        let topics = request
            .topics
            .iter()
            .map(|query| TopicPartitionsResult {
                error_code: ERROR_UNKNOWN_TOPIC,
                name: query.name.clone(),
                topic_id: [0u8; 16],
                is_internal: false,
                authorized_ops: TOPIC_AUTHORIZED_OPS_READ,
            })
            .collect();
        DescribeTopicPartitionsResponse {
            correlation_id,
            topics,
            cursor: NULL_CURSOR,
        }
    }

    pub fn encode(&self) -> BytesMut {
        let mut dst = frame_with_placeholder();
        dst.put_u32(self.correlation_id);
        put_tag_buffer(&mut dst);
        dst.put_u32(0); // throttle_time_ms
        put_compact_len(&mut dst, self.topics.len());
        for topic in &self.topics {
            dst.put_i16(topic.error_code);
            put_compact_string(&mut dst, &topic.name);
            dst.extend_from_slice(&topic.topic_id);
            dst.put_u8(topic.is_internal as u8);
            dst.put_u8(0x01); // authorized-ops array length byte
            dst.put_i32(topic.authorized_ops);
            put_tag_buffer(&mut dst);
        }
        dst.put_u8(self.cursor);
        put_tag_buffer(&mut dst);
        patch_frame_len(&mut dst);
        dst
    }
}
