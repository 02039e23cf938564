//! Minimal RLP encoding
//!
//! Just enough of the recursive-length-prefix format to assemble block
//! headers and account leaves. Single values encode as strings; `wrap_list`
//! turns a concatenation of encoded items into a list payload.

/// Appends the RLP encoding of a byte string to `out`.
pub fn encode_bytes(out: &mut Vec<u8>, data: &[u8]) {
    if data.len() == 1 && data[0] < 0x80 {
        out.push(data[0]);
    } else if data.len() <= 55 {
        out.push(0x80 + data.len() as u8);
        out.extend_from_slice(data);
    } else {
        let len_bytes = minimal_be(data.len() as u64);
        out.push(0xb7 + len_bytes.len() as u8);
        out.extend_from_slice(&len_bytes);
        out.extend_from_slice(data);
    }
}

/// Appends the RLP encoding of an unsigned integer (minimal big-endian;
/// zero encodes as the empty string).
pub fn encode_uint(out: &mut Vec<u8>, value: u64) {
    encode_bytes(out, &minimal_be(value));
}

/// Appends the RLP encoding of a 128-bit unsigned integer.
pub fn encode_uint128(out: &mut Vec<u8>, value: u128) {
    let bytes = value.to_be_bytes();
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    encode_bytes(out, &bytes[first..]);
}

/// Appends the RLP encoding of a 32-byte digest.
pub fn encode_hash(out: &mut Vec<u8>, hash: &[u8; 32]) {
    encode_bytes(out, hash);
}

/// Wraps an already-encoded payload in a list header.
pub fn wrap_list(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 9);
    if payload.len() <= 55 {
        out.push(0xc0 + payload.len() as u8);
    } else {
        let len_bytes = minimal_be(payload.len() as u64);
        out.push(0xf7 + len_bytes.len() as u8);
        out.extend_from_slice(&len_bytes);
    }
    out.extend_from_slice(payload);
    out
}

fn minimal_be(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    bytes[first..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        encode_bytes(&mut out, data);
        out
    }

    fn uint(value: u64) -> Vec<u8> {
        let mut out = Vec::new();
        encode_uint(&mut out, value);
        out
    }

    #[test]
    fn test_encode_bytes() {
        // Canonical cases from the format definition.
        assert_eq!(bytes(&[]), vec![0x80]);
        assert_eq!(bytes(&[0x00]), vec![0x00]);
        assert_eq!(bytes(&[0x7f]), vec![0x7f]);
        assert_eq!(bytes(&[0x80]), vec![0x81, 0x80]);
        assert_eq!(bytes(b"dog"), vec![0x83, b'd', b'o', b'g']);

        let long = [0xabu8; 56];
        let encoded = bytes(&long);
        assert_eq!(&encoded[..2], &[0xb8, 56]);
        assert_eq!(&encoded[2..], &long[..]);
    }

    #[test]
    fn test_encode_uint() {
        assert_eq!(uint(0), vec![0x80]);
        assert_eq!(uint(15), vec![0x0f]);
        assert_eq!(uint(1024), vec![0x82, 0x04, 0x00]);

        let mut out = Vec::new();
        encode_uint128(&mut out, 0);
        assert_eq!(out, vec![0x80]);
        let mut out = Vec::new();
        encode_uint128(&mut out, 1024);
        assert_eq!(out, vec![0x82, 0x04, 0x00]);
    }

    #[test]
    fn test_wrap_list() {
        assert_eq!(wrap_list(&[]), vec![0xc0]);

        let mut payload = Vec::new();
        encode_bytes(&mut payload, b"cat");
        encode_bytes(&mut payload, b"dog");
        let encoded = wrap_list(&payload);
        assert_eq!(
            encoded,
            vec![0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g']
        );

        let long = [0u8; 60];
        let mut payload = Vec::new();
        encode_bytes(&mut payload, &long);
        let encoded = wrap_list(&payload);
        assert_eq!(&encoded[..2], &[0xf8, 62]);
    }
}
