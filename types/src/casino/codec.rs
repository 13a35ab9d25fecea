use bytes::{Buf, BufMut};
use commonware_codec::{Error, ReadExt, Write};

/// Longest prefix of `s` that fits a `u16` length, cut on a character boundary.
fn encodable_prefix(s: &str) -> &str {
    let mut end = s.len().min(u16::MAX as usize);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Write a string as a `u16` length prefix followed by its UTF-8 bytes.
///
/// Strings longer than `u16::MAX` bytes are truncated to the last whole character that fits.
/// Callers that need the full value bound their inputs first (see `MAX_USER_ID_LENGTH`).
pub fn write_string(s: &str, writer: &mut impl BufMut) {
    let bytes = encodable_prefix(s).as_bytes();
    (bytes.len() as u16).write(writer);
    writer.put_slice(bytes);
}

/// Read a length-prefixed UTF-8 string of at most `max_len` bytes.
pub fn read_string(reader: &mut impl Buf, max_len: usize) -> Result<String, Error> {
    let len = u16::read(reader)? as usize;
    if len > max_len {
        return Err(Error::Invalid("String", "too long"));
    }
    if reader.remaining() < len {
        return Err(Error::EndOfBuffer);
    }
    let mut bytes = vec![0u8; len];
    reader.copy_to_slice(&mut bytes);
    String::from_utf8(bytes).map_err(|_| Error::Invalid("String", "invalid UTF-8"))
}

/// Encoded size of a string written by [`write_string`].
pub fn string_encode_size(s: &str) -> usize {
    2 + encodable_prefix(s).len()
}
