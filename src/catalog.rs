//! The fixed filter catalog and the cursor that walks it.
//!
//! The app exposes a single repeatable "effect" action with no picker, so
//! every press applies the entry under the cursor and moves the cursor one
//! step forward, wrapping after the last entry:
//!
//! ```text
//! 0 mono → 1 chrome → 2 fade → ... → 8 sepia-tone → 0 mono → ...
//! ```

use std::fmt;

/// Filter identifiers in application order. Immutable for the process lifetime.
pub const CATALOG: [&str; 9] = [
    "mono",
    "chrome",
    "fade",
    "instant",
    "noir",
    "process",
    "tonal",
    "transfer",
    "sepia-tone",
];

/// Index of the next catalog entry to apply. Always `< CATALOG.len()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FilterCursor(usize);

impl FilterCursor {
    /// Cursor at `index`, or `None` if it is past the end of the catalog.
    pub fn new(index: usize) -> Option<Self> {
        (index < CATALOG.len()).then_some(Self(index))
    }

    pub fn index(self) -> usize {
        self.0
    }

    /// Identifier under the cursor.
    pub fn filter_name(self) -> &'static str {
        CATALOG[self.0]
    }

    /// The following position, wrapping from the last entry back to 0.
    pub fn next(self) -> Self {
        Self((self.0 + 1) % CATALOG.len())
    }
}

impl fmt::Display for FilterCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.filter_name())
    }
}
