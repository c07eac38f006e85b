//! Byte-level tests: framing, dispatch, version policy, error paths.

use bytes::BytesMut;
use shoal::server::{handle_frame, split_frame};
use shoal::ShoalError;

/// Build a request payload: header (api_key, api_version, correlation_id,
/// client_id) followed by the raw body bytes.
fn request_payload(
    api_key: i16,
    api_version: i16,
    correlation_id: u32,
    client_id: &str,
    body: &[u8],
) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.extend_from_slice(&api_key.to_be_bytes());
    payload.extend_from_slice(&api_version.to_be_bytes());
    payload.extend_from_slice(&correlation_id.to_be_bytes());
    payload.extend_from_slice(&(client_id.len() as i16).to_be_bytes());
    payload.extend_from_slice(client_id.as_bytes());
    payload.extend_from_slice(body);
    payload
}

/// DescribeTopicPartitions body: tag byte, compact topic array, partition
/// limit, null cursor, trailing tag byte.
fn describe_topics_body(topics: &[&str]) -> Vec<u8> {
    let mut body = vec![0x00]; // header tag buffer
    body.push((topics.len() + 1) as u8);
    for name in topics {
        body.push((name.len() + 1) as u8);
        body.extend_from_slice(name.as_bytes());
        body.push(0x00);
    }
    body.extend_from_slice(&100u32.to_be_bytes()); // response_partition_limit
    body.push(0xff); // null cursor
    body.push(0x00);
    body
}

fn api_versions_error_code(response: &[u8]) -> i16 {
    i16::from_be_bytes([response[8], response[9]])
}

#[test]
fn api_versions_supported_versions_succeed() {
    for version in 0..=4 {
        let payload = request_payload(18, version, 42, "client", &[]);
        let response = handle_frame(&payload).unwrap().unwrap();
        assert_eq!(api_versions_error_code(&response), 0, "version {}", version);
    }
}

#[test]
fn api_versions_out_of_range_versions_fail() {
    for version in [-1i16, 5, 100] {
        let payload = request_payload(18, version, 42, "client", &[]);
        let response = handle_frame(&payload).unwrap().unwrap();
        assert_eq!(
            api_versions_error_code(&response),
            35,
            "version {}",
            version
        );
    }
}

#[test]
fn correlation_id_echoed_for_every_key_and_version() {
    let cases: &[(i16, i16, Vec<u8>)] = &[
        (18, 0, Vec::new()),
        (18, 4, Vec::new()),
        (18, 99, Vec::new()),
        (75, 0, describe_topics_body(&["t"])),
    ];
    for (api_key, version, body) in cases {
        let payload = request_payload(*api_key, *version, 0xdead_beef, "c", body);
        let response = handle_frame(&payload).unwrap().unwrap();
        let echoed = u32::from_be_bytes([response[4], response[5], response[6], response[7]]);
        assert_eq!(echoed, 0xdead_beef, "api_key {} v{}", api_key, version);
    }
}

#[test]
fn api_versions_golden_frame() {
    let payload = request_payload(18, 4, 7, "", &[]);
    let response = handle_frame(&payload).unwrap().unwrap();
    let expected: Vec<u8> = vec![
        0, 0, 0, 26, // length prefix: payload only
        0, 0, 0, 7, // correlation_id
        0, 0, // error_code
        3, // compact count: 2 entries + 1
        0, 18, 0, 0, 0, 4, 0, // ApiVersions 0..4, tag
        0, 75, 0, 0, 0, 0, 0, // DescribeTopicPartitions 0..0, tag
        0, 0, 0, 0, // throttle_time_ms
        0, // tag
    ];
    assert_eq!(&response[..], &expected[..]);
}

#[test]
fn every_response_declares_its_own_length() {
    let requests = [
        request_payload(18, 3, 9, "len-check", &[]),
        request_payload(75, 0, 9, "len-check", &describe_topics_body(&["a", "b", "c"])),
    ];
    for payload in requests {
        let response = handle_frame(&payload).unwrap().unwrap();
        let declared = u32::from_be_bytes([response[0], response[1], response[2], response[3]]);
        assert_eq!(declared as usize, response.len() - 4);
    }
}

#[test]
fn describe_topics_reports_each_topic_unknown_in_order() {
    let payload = request_payload(75, 0, 11, "kcli", &describe_topics_body(&["foo", "bar"]));
    let response = handle_frame(&payload).unwrap().unwrap();

    assert_eq!(&response[4..8], &11u32.to_be_bytes()); // correlation_id
    assert_eq!(response[8], 0x00); // tag
    assert_eq!(&response[9..13], &[0, 0, 0, 0]); // throttle_time_ms
    assert_eq!(response[13], 3); // 2 topics + 1

    let mut at = 14;
    for name in ["foo", "bar"] {
        let error_code = i16::from_be_bytes([response[at], response[at + 1]]);
        assert_eq!(error_code, 3, "unknown topic for {}", name);
        at += 2;
        assert_eq!(response[at] as usize, name.len() + 1);
        at += 1;
        assert_eq!(&response[at..at + name.len()], name.as_bytes());
        at += name.len();
        assert_eq!(&response[at..at + 16], &[0u8; 16]); // topic_id
        at += 16;
        assert_eq!(response[at], 0); // is_internal
        at += 1;
        assert_eq!(response[at], 0x01); // ops array length byte
        at += 1;
        let ops = i32::from_be_bytes([
            response[at],
            response[at + 1],
            response[at + 2],
            response[at + 3],
        ]);
        assert_eq!(ops, 0x0df8);
        at += 4;
        assert_eq!(response[at], 0x00); // tag
        at += 1;
    }
    assert_eq!(response[at], 0xff); // null cursor
    assert_eq!(response[at + 1], 0x00); // tag
    assert_eq!(response.len(), at + 2);
}

#[test]
fn overlong_client_id_is_truncated_not_out_of_bounds() {
    // Declares a 200-byte client id with only 2 bytes behind it.
    let mut payload = Vec::new();
    payload.extend_from_slice(&18i16.to_be_bytes());
    payload.extend_from_slice(&0i16.to_be_bytes());
    payload.extend_from_slice(&1u32.to_be_bytes());
    payload.extend_from_slice(&200i16.to_be_bytes());
    payload.extend_from_slice(b"ab");
    match handle_frame(&payload) {
        Err(ShoalError::Truncated(_)) => {}
        other => panic!("expected Truncated, got {:?}", other),
    }
}

#[test]
fn overlong_topic_name_is_truncated() {
    // Topic array claims one entry whose name length outruns the buffer.
    let body = vec![0x00, 2, 250];
    let payload = request_payload(75, 0, 1, "c", &body);
    match handle_frame(&payload) {
        Err(ShoalError::Truncated(_)) => {}
        other => panic!("expected Truncated, got {:?}", other),
    }
}

#[test]
fn missing_partition_limit_is_truncated() {
    // Valid topic list but the frame ends before response_partition_limit.
    let body = vec![0x00, 2, 2, b't', 0x00];
    let payload = request_payload(75, 0, 1, "c", &body);
    match handle_frame(&payload) {
        Err(ShoalError::Truncated(_)) => {}
        other => panic!("expected Truncated, got {:?}", other),
    }
}

#[test]
fn nonempty_tagged_fields_are_rejected() {
    let mut body = describe_topics_body(&["t"]);
    body[0] = 0x02; // header tag buffer claims tagged fields
    let payload = request_payload(75, 0, 1, "c", &body);
    match handle_frame(&payload) {
        Err(ShoalError::Protocol(_)) => {}
        other => panic!("expected Protocol error, got {:?}", other),
    }
}

#[test]
fn unknown_api_key_gets_no_response() {
    let payload = request_payload(99, 0, 5, "c", &[]);
    assert!(handle_frame(&payload).unwrap().is_none());
}

#[test]
fn split_frame_waits_for_whole_frame() {
    let payload = request_payload(18, 0, 1, "", &[]);
    let mut framed = Vec::new();
    framed.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    framed.extend_from_slice(&payload);

    let mut buf = BytesMut::from(&framed[..framed.len() - 1]);
    assert!(split_frame(&mut buf).unwrap().is_none());

    let mut buf = BytesMut::from(&framed[..]);
    let got = split_frame(&mut buf).unwrap().unwrap();
    assert_eq!(got, payload);
    assert!(buf.is_empty());
}

#[test]
fn split_frame_rejects_bogus_lengths() {
    let mut zero = BytesMut::from(&[0u8, 0, 0, 0, 1, 2][..]);
    assert!(matches!(
        split_frame(&mut zero),
        Err(ShoalError::Protocol(_))
    ));

    let mut huge = BytesMut::from(&[0xffu8, 0xff, 0xff, 0xff][..]);
    assert!(matches!(
        split_frame(&mut huge),
        Err(ShoalError::Protocol(_))
    ));
}

#[test]
fn empty_topic_list_still_answers() {
    let payload = request_payload(75, 0, 21, "c", &describe_topics_body(&[]));
    let response = handle_frame(&payload).unwrap().unwrap();
    assert_eq!(response[13], 1); // 0 topics + 1
    assert_eq!(response[14], 0xff); // straight to the null cursor
}
