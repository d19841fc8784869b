//! Display-name collation
//!
//! The call window orders tiles by a case-insensitive comparison of display
//! names in which a name that is a strict prefix of another sorts first, even
//! when the longer name continues with a space ("Ann" before "Ann Marie").
//! The key is the lowercased name with a sentinel appended; the sentinel has
//! to rank below every character that can occur in a display name.

use std::cmp::Ordering;

/// Appended to every key. U+001F ranks below U+0020 (space) and above the
/// remaining control characters, none of which survive in display names.
pub const NAME_SENTINEL: char = '\u{1f}';

/// Sort key for a display name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollationKey(String);

impl CollationKey {
    pub fn new(display_name: &str) -> Self {
        let mut key = display_name.to_lowercase();
        key.push(NAME_SENTINEL);
        CollationKey(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialOrd for CollationKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CollationKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // char order equals UTF-8 byte order
        self.0.cmp(&other.0)
    }
}

/// Compare two display names the way the call window does
pub fn compare_names(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}
