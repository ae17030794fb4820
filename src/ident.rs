//! # Image Identifiers
//!
//! Two-letter lowercase identifiers used to name rendered label images by row
//! position: `aa`, `ab`, ..., `az`, `ba`, ..., `zz`. The first letter varies
//! slowest, so row `n` gets `(n / 26, n % 26)`.
//!
//! There are exactly [`CAPACITY`] identifiers. Asking for more is an error,
//! never a wrap-around.
//!
//! ```
//! use labelsmith::ident::identifier;
//!
//! assert_eq!(identifier(0)?.as_str(), "aa");
//! assert_eq!(identifier(27)?.as_str(), "bb");
//! # Ok::<(), labelsmith::LabelError>(())
//! ```

use std::fmt;

use crate::error::LabelError;

const ALPHABET_LEN: usize = 26;

/// Number of distinct identifiers (26 × 26).
pub const CAPACITY: usize = ALPHABET_LEN * ALPHABET_LEN;

/// A two-letter image identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier([u8; 2]);

impl Identifier {
    pub fn as_str(&self) -> &str {
        // Both bytes are in b'a'..=b'z'.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The identifier for row `index`.
pub fn identifier(index: usize) -> Result<Identifier, LabelError> {
    if index >= CAPACITY {
        return Err(LabelError::CapacityExceeded {
            rows: index.saturating_add(1),
            capacity: CAPACITY,
        });
    }
    let first = (index / ALPHABET_LEN) as u8;
    let second = (index % ALPHABET_LEN) as u8;
    Ok(Identifier([b'a' + first, b'a' + second]))
}

/// The full sequence, in row order.
pub fn identifiers() -> impl Iterator<Item = Identifier> {
    (0..CAPACITY).filter_map(|i| identifier(i).ok())
}

/// Fail up front when a batch has more rows than identifiers.
pub fn ensure_capacity(rows: usize) -> Result<(), LabelError> {
    if rows > CAPACITY {
        return Err(LabelError::CapacityExceeded {
            rows,
            capacity: CAPACITY,
        });
    }
    Ok(())
}
