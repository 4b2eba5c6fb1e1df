use core::fmt;

use crate::wire::field::{FIELD, GROUP, OCTET};

/// The layer a line of packet text belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// MAC addresses in front, a network packet inside.
    Link,
    /// Dotted IPv4 addresses in front.
    Network,
    /// Only numbers and a payload.
    Transport,
}

/// Decide which layer a line of text belongs to, purely by its separators.
///
/// * Group separators (`:`) in the first two fields mark the MAC addresses of a link frame. A frame
///   must also contain octet separators (`.`) from the addresses of the packet it carries.
/// * Otherwise, octet separators in the first two fields mark the addresses of a network packet.
/// * A text without any address separators but with at least three field separators is a
///   transport packet.
///
/// Everything else, including any text with group separators in an unexpected place, is not
/// recognized.
pub fn classify(text: &str) -> Option<Kind> {
    let mut fields = text.split(FIELD);
    let first = fields.next().unwrap_or("");
    let second = fields.next()?;
    let head_has = |sep: char| first.contains(sep) || second.contains(sep);

    if text.contains(GROUP) {
        if head_has(GROUP) && text.contains(OCTET) {
            return Some(Kind::Link);
        }
        return None;
    }

    if head_has(OCTET) {
        return Some(Kind::Network);
    }

    if !text.contains(OCTET) && text.matches(FIELD).count() >= 3 {
        return Some(Kind::Transport);
    }

    None
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Kind::Link => "link",
            Kind::Network => "network",
            Kind::Transport => "transport",
        })
    }
}
