//! Separators and field conversions shared by all representations.
//!
//! Packet text is untrusted. Instead of rejecting a packet during parsing, the conversions in this
//! module implement a *fallback-to-default* mode: a numeric field that can not be interpreted is
//! read as zero and a missing field is read as empty text. This keeps the pipeline running on
//! garbage input while guaranteeing that such packets are rejected by validation, since a zero TTL,
//! a zero MAC or an empty payload never validate.
//!
//! Only [`decode_bytes`] is strict, it is used where the exact shape of a payload matters.
//!
//! [`decode_bytes`]: fn.decode_bytes.html
use core::fmt;
use core::str::FromStr;

use super::{Error, Result};

/// Separates the fields of one layer.
pub const FIELD: char = '|';

/// Separates the octets of an IPv4 address.
pub const OCTET: char = '.';

/// Separates the groups of a MAC address.
pub const GROUP: char = ':';

/// Separates the bytes of a data block or payload.
pub const TOKEN: char = ' ';

/// Parse a decimal number, falling back to zero.
///
/// Surrounding whitespace is ignored. Anything that is not a number fitting into `T` results in
/// `T::default()`.
///
/// ```
/// # use nicsim::wire::field::lenient;
/// assert_eq!(lenient::<u16>(" 1000 "), 1000);
/// assert_eq!(lenient::<u16>("70000"), 0);
/// assert_eq!(lenient::<u32>("ttl"), 0);
/// ```
pub fn lenient<T: FromStr + Default>(text: &str) -> T {
    text.trim().parse().unwrap_or_default()
}

/// Parse a hexadecimal byte, falling back to zero.
pub fn lenient_hex_u8(text: &str) -> u8 {
    u8::from_str_radix(text.trim(), 16).unwrap_or(0)
}

/// Parse a hexadecimal word, falling back to zero.
pub fn lenient_hex_u32(text: &str) -> u32 {
    u32::from_str_radix(text.trim(), 16).unwrap_or(0)
}

/// Parse up to `N` separated octets in the given radix.
///
/// Missing octets and those that can not be parsed are zero, surplus octets are ignored.
pub fn lenient_octets<const N: usize>(text: &str, separator: char, radix: u32) -> [u8; N] {
    let mut octets = [0; N];
    for (octet, part) in octets.iter_mut().zip(text.split(separator)) {
        *octet = u8::from_str_radix(part.trim(), radix).unwrap_or(0);
    }
    octets
}

/// Parse up to `N` whitespace separated hex bytes, zero padding the rest.
pub fn lenient_bytes<const N: usize>(text: &str) -> [u8; N] {
    let mut bytes = [0; N];
    for (byte, token) in bytes.iter_mut().zip(text.split_whitespace()) {
        *byte = lenient_hex_u8(token);
    }
    bytes
}

/// Get a field by index, an absent field is empty.
pub fn nth<'a>(fields: &[&'a str], index: usize) -> &'a str {
    fields.get(index).copied().unwrap_or("")
}

/// Decode a payload of hex byte tokens.
///
/// Every token must be exactly two hex digits and tokens are separated by exactly one space. An
/// empty payload is malformed as well.
pub fn decode_bytes(text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Err(Error::Malformed);
    }

    text.split(TOKEN).map(decode_byte).collect()
}

fn decode_byte(token: &str) -> Result<u8> {
    if token.len() != 2 || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::Malformed);
    }

    u8::from_str_radix(token, 16).map_err(|_| Error::Malformed)
}

/// Sum bytes into a checksum word, wrapping around on overflow.
pub fn byte_sum<'a, I>(bytes: I) -> u32
    where I: IntoIterator<Item = &'a u8>,
{
    bytes.into_iter().fold(0u32, |sum, &b| sum.wrapping_add(u32::from(b)))
}

/// Formats bytes as space separated, two digit lowercase hex tokens.
#[derive(Clone, Copy, Debug)]
pub struct Bytes<'a>(pub &'a [u8]);

impl fmt::Display for Bytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for byte in self.0 {
            if !first {
                write!(f, "{}", TOKEN)?;
            }
            write!(f, "{:02x}", byte)?;
            first = false;
        }
        Ok(())
    }
}
