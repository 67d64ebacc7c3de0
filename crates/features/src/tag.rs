//! OpenType feature tags.

use std::fmt::{self, Display, Formatter};

use font_types::Tag;

/// A four-byte OpenType feature tag.
///
/// Ordering is byte-wise, so `cv01 < ss01 < ss02`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureTag(Tag);

impl FeatureTag {
    /// Access All Alternates.
    pub const AALT: FeatureTag = FeatureTag(Tag::new(b"aalt"));
    /// Stylistic Alternates.
    pub const SALT: FeatureTag = FeatureTag(Tag::new(b"salt"));

    pub const fn new(bytes: &[u8; 4]) -> Self {
        Self(Tag::new(bytes))
    }

    /// `<prefix>NN`, e.g. `ss01` or `cv12`. `number` must be below 100.
    pub(crate) fn numbered(prefix: &[u8; 2], number: u8) -> Self {
        debug_assert!(number < 100);
        Self::new(&[prefix[0], prefix[1], b'0' + number / 10, b'0' + number % 10])
    }

    pub fn tag(&self) -> Tag {
        self.0
    }
}

impl Display for FeatureTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<FeatureTag> for Tag {
    fn from(FeatureTag(tag): FeatureTag) -> Self {
        tag
    }
}
