//! Supported api keys and the version negotiation policy.

use crate::protocol::{ERROR_NONE, ERROR_UNSUPPORTED_VERSION};

/// One advertised api key with its inclusive supported version range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiVersionRange {
    pub api_key: i16,
    pub min_version: i16,
    pub max_version: i16,
}

/// Everything this server claims to speak, in advertisement order.
pub const SUPPORTED_APIS: &[ApiVersionRange] = &[
    ApiVersionRange {
        api_key: super::API_VERSIONS,
        min_version: 0,
        max_version: 4,
    },
    ApiVersionRange {
        api_key: super::DESCRIBE_TOPIC_PARTITIONS,
        min_version: 0,
        max_version: 0,
    },
];

/// Validate a negotiated version against the supported range for its key.
///
/// Returns the protocol error code for the response: 0 inside the range,
/// UNSUPPORTED_VERSION (35) outside it or for a key we never advertise.
pub fn negotiate(api_key: i16, api_version: i16) -> i16 {
    for api in SUPPORTED_APIS {
        if api.api_key == api_key {
            return if api_version >= api.min_version && api_version <= api.max_version {
                ERROR_NONE
            } else {
                ERROR_UNSUPPORTED_VERSION
            };
        }
    }
    ERROR_UNSUPPORTED_VERSION
}
