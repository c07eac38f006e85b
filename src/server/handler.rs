//! Accept loop, per-connection task, and the request dispatcher.

use crate::error::{Result, ShoalError};
use crate::protocol::{
    negotiate, ApiKey, ApiVersionsResponse, DescribeTopicPartitionsRequest,
    DescribeTopicPartitionsResponse, ByteReader, RequestHeader,
};
use bytes::{Buf, BytesMut};
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info};

const MAX_FRAME_LEN: usize = 1024 * 1024;

/// Run the server loop (binds to addr).
pub async fn run_server(addr: &str) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    run_server_on_listener(listener).await
}

/// Run the server loop on an existing listener (e.g. from bind("127.0.0.1:0")).
pub async fn run_server_on_listener(listener: TcpListener) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("shoal server listening on {}", addr);
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(x) => x,
            Err(e) => {
                error!("accept error: {}", e);
                continue;
            }
        };
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer).await {
                error!("connection {} error: {}", peer, e);
            }
        });
    }
}

/// Half-duplex per-connection loop: read one frame, dispatch, write the
/// response, repeat until the peer closes. A decode failure closes this
/// connection rather than continuing from a misaligned offset.
async fn handle_connection(mut stream: TcpStream, peer: SocketAddr) -> Result<()> {
    let mut read_buf = BytesMut::with_capacity(4096);
    loop {
        read_buf.reserve(4096);
        let n = stream.read_buf(&mut read_buf).await?;
        if n == 0 {
            break;
        }
        while let Some(payload) = split_frame(&mut read_buf)? {
            if let Some(response) = handle_frame(&payload)? {
                info!(peer = %peer, len = response.len(), "response");
                stream.write_all(&response).await?;
                stream.flush().await?;
            }
        }
        if read_buf.len() > MAX_FRAME_LEN {
            return Err(ShoalError::Protocol("frame too large".into()));
        }
    }
    Ok(())
}

/// Split one length-prefixed frame off the buffer. Returns None until a
/// whole frame has arrived.
pub fn split_frame(src: &mut BytesMut) -> Result<Option<Vec<u8>>> {
    if src.len() < 4 {
        return Ok(None);
    }
    let len = u32::from_be_bytes([src[0], src[1], src[2], src[3]]) as usize;
    if len == 0 || len > MAX_FRAME_LEN {
        return Err(ShoalError::Protocol(format!("invalid frame size {}", len)));
    }
    if src.len() < 4 + len {
        return Ok(None);
    }
    src.advance(4);
    Ok(Some(src.split_to(len).to_vec()))
}

/// Dispatch one frame payload: decode the header, negotiate the version,
/// route by api key, and return the encoded response frame. Unknown api
/// keys get no response at all.
pub fn handle_frame(payload: &[u8]) -> Result<Option<BytesMut>> {
    let mut reader = ByteReader::new(payload);
    let header = RequestHeader::decode(&mut reader)?;
    // Version check happens before any body decode.
    let error_code = negotiate(header.api_key, header.api_version);
    info!(
        api_key = header.api_key,
        version = header.api_version,
        correlation_id = header.correlation_id,
        error_code,
        "request"
    );
    match ApiKey::from(header.api_key) {
        ApiKey::ApiVersions => {
            let response = ApiVersionsResponse {
                correlation_id: header.correlation_id,
                error_code,
            };
            Ok(Some(response.encode()))
        }
        ApiKey::DescribeTopicPartitions => {
            // The v0 response carries error codes per topic, not at the top
            // level; the negotiated code has nowhere to go here.
            let request = DescribeTopicPartitionsRequest::decode(&mut reader)?;
            let response =
                DescribeTopicPartitionsResponse::unknown_topics(header.correlation_id, &request);
            Ok(Some(response.encode()))
        }
        ApiKey::Unknown(key) => {
            info!(api_key = key, "unknown api key, no response");
            Ok(None)
        }
    }
}
