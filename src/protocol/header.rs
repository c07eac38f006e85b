//! Common request header shared by every frame.

use crate::error::Result;
use crate::protocol::codec::ByteReader;

/// Header fields present at fixed offsets at the start of every request
/// payload. Decoded fresh per frame, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeader {
    pub api_key: i16,
    pub api_version: i16,
    pub correlation_id: u32,
    pub client_id: Option<String>,
}

impl RequestHeader {
    /// Decode the header, leaving the reader positioned at the request body
    /// (the header's trailing tag byte belongs to the body decoder).
    pub fn decode(r: &mut ByteReader<'_>) -> Result<RequestHeader> {
        let api_key = r.get_i16("api_key")?;
        let api_version = r.get_i16("api_version")?;
        let correlation_id = r.get_u32("correlation_id")?;
        let client_id_len = r.get_i16("client_id length")?;
        let client_id = if client_id_len < 0 {
            None
        } else {
            let bytes = r.take(client_id_len as usize, "client_id")?;
            Some(String::from_utf8_lossy(bytes).into_owned())
        };
        Ok(RequestHeader {
            api_key,
            api_version,
            correlation_id,
            client_id,
        })
    }
}
