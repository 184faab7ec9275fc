//! owserver wire format
//!
//! Every message starts with six big-endian i32 words. Requests carry
//! `version, payload length, message type, flags, expected size, offset`,
//! responses carry `version, payload length, return code, flags, size,
//! offset`. A response with payload length -1 is a keep-alive ping.

use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Header length in bytes
pub const HEADER_LEN: usize = 24;

/// READ message type
pub const MSG_READ: i32 = 2;

/// Client flag marking an owserver-protocol (ownet) client
pub const FLG_OWNET: i32 = 0x0000_0100;

/// Largest payload owserver sends for a single read
pub const MAX_PAYLOAD: i32 = 65536;

/// Expected size announced in READ requests
pub const READ_SIZE: i32 = 8192;

/// Response header sent by owserver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerHeader {
    pub version: i32,
    pub payload: i32,
    pub ret: i32,
    pub flags: i32,
    pub size: i32,
    pub offset: i32,
}

impl ServerHeader {
    /// Decode a response header
    pub fn decode(mut raw: &[u8]) -> Option<Self> {
        if raw.len() < HEADER_LEN {
            return None;
        }
        Some(Self {
            version: raw.get_i32(),
            payload: raw.get_i32(),
            ret: raw.get_i32(),
            flags: raw.get_i32(),
            size: raw.get_i32(),
            offset: raw.get_i32(),
        })
    }

    /// Keep-alive sent while the server is still working on the request
    pub fn is_ping(&self) -> bool {
        self.payload == -1
    }

    /// Encode as sent by a server (used by test servers)
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(HEADER_LEN);
        buf.put_i32(self.version);
        buf.put_i32(self.payload);
        buf.put_i32(self.ret);
        buf.put_i32(self.flags);
        buf.put_i32(self.size);
        buf.put_i32(self.offset);
        buf.freeze()
    }
}

/// Build a complete READ request for `path`
///
/// The path is sent NUL-terminated and counted in the payload length.
pub fn encode_read_request(path: &str, flags: i32) -> Bytes {
    let payload_len = path.len() + 1;
    let mut buf = BytesMut::with_capacity(HEADER_LEN + payload_len);
    buf.put_i32(0);
    buf.put_i32(payload_len as i32);
    buf.put_i32(MSG_READ);
    buf.put_i32(flags);
    buf.put_i32(READ_SIZE);
    buf.put_i32(0);
    buf.put_slice(path.as_bytes());
    buf.put_u8(0);
    buf.freeze()
}
