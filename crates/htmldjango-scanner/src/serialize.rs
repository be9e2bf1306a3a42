//! Bounded snapshot of scanner state between incremental edits.
//!
//! Wire layout, little-endian scalars:
//!
//! ```text
//! u8   verbatim suffix length (0..=255)
//! ...  suffix bytes
//! u16  serialized tag count
//! u16  logical tag count (>= serialized)
//! per serialized tag:
//!     u8  kind
//!     if kind is CUSTOM: u8 name length, then name bytes
//! ```
//!
//! When the buffer cannot hold every tag, trailing tags are dropped but
//! both counts are kept; deserialization restores the missing depth with
//! empty placeholder tags. Depth survives, identity does not.

use crate::scanner::Scanner;
use crate::tags::Tag;
use crate::tags::TagKind;

/// Snapshot buffers must hold at least this many bytes; matches the
/// serialization buffer size of the incremental-parsing runtime.
pub const SERIALIZATION_BUFFER_SIZE: usize = 1024;

/// The suffix length field is a single byte.
pub(crate) const VERBATIM_SUFFIX_MAX: usize = 255;

/// Custom tag names longer than this serialize truncated.
const TAG_NAME_MAX: usize = 255;

impl Scanner {
    /// Write the scanner state into `buffer`, returning the bytes written.
    ///
    /// Tags that do not fit are dropped (the logical count still records
    /// them); a buffer too small for even the header writes nothing.
    pub fn serialize(&self, buffer: &mut [u8]) -> usize {
        let suffix = self.verbatim_suffix.as_bytes();
        let suffix_len = suffix.len().min(VERBATIM_SUFFIX_MAX);
        if buffer.len() < 1 + suffix_len + 4 {
            return 0;
        }

        let mut written = 0;
        buffer[written] = u8::try_from(suffix_len).unwrap_or(u8::MAX);
        written += 1;
        buffer[written..written + suffix_len].copy_from_slice(&suffix[..suffix_len]);
        written += suffix_len;

        let counts_at = written;
        written += 4;

        let logical = u16::try_from(self.stack.len()).unwrap_or(u16::MAX);
        let mut serialized: u16 = 0;
        for tag in self.stack.iter().take(usize::from(logical)) {
            let name = (tag.kind() == TagKind::Custom).then(|| {
                let bytes = tag.name().unwrap_or("").as_bytes();
                &bytes[..bytes.len().min(TAG_NAME_MAX)]
            });
            let needed = name.map_or(1, |name| 2 + name.len());
            if written + needed > buffer.len() {
                break;
            }

            buffer[written] = tag.kind() as u8;
            written += 1;
            if let Some(name) = name {
                buffer[written] = u8::try_from(name.len()).unwrap_or(u8::MAX);
                written += 1;
                buffer[written..written + name.len()].copy_from_slice(name);
                written += name.len();
            }
            serialized += 1;
        }

        buffer[counts_at..counts_at + 2].copy_from_slice(&serialized.to_le_bytes());
        buffer[counts_at + 2..counts_at + 4].copy_from_slice(&logical.to_le_bytes());
        written
    }

    /// Replace the scanner state with the snapshot in `buffer`.
    ///
    /// An empty buffer resets to a fresh scanner. A truncated or malformed
    /// buffer stops cleanly at the damage, keeping whatever was restored up
    /// to that point; missing depth is filled with placeholder tags.
    pub fn deserialize(&mut self, buffer: &[u8]) {
        self.stack.clear();
        self.verbatim_suffix.clear();

        let Some((&suffix_len, rest)) = buffer.split_first() else {
            return;
        };
        let suffix_len = usize::from(suffix_len);
        let Some(suffix) = rest.get(..suffix_len) else {
            return;
        };
        self.verbatim_suffix = String::from_utf8_lossy(suffix).into_owned();
        let rest = &rest[suffix_len..];

        let Some(counts) = rest.get(..4) else {
            return;
        };
        let serialized = usize::from(u16::from_le_bytes([counts[0], counts[1]]));
        let logical = usize::from(u16::from_le_bytes([counts[2], counts[3]]));

        let mut pos = 4;
        for _ in 0..serialized {
            let Some(kind) = rest.get(pos).copied().and_then(TagKind::from_serialized) else {
                break;
            };
            pos += 1;
            if kind == TagKind::Custom {
                let Some(&len) = rest.get(pos) else {
                    break;
                };
                pos += 1;
                let len = usize::from(len);
                let Some(name) = rest.get(pos..pos + len) else {
                    break;
                };
                pos += len;
                self.stack
                    .push(Tag::custom(String::from_utf8_lossy(name).into_owned()));
            } else {
                self.stack.push(Tag::from_kind(kind));
            }
        }

        for _ in self.stack.len()..logical {
            self.stack.push(Tag::from_kind(TagKind::Custom));
        }
    }
}
