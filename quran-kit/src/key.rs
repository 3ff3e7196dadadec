use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::QuranError;

/// Numeric coordinates of a verse, independent of any edition.
///
/// This is what crosses persistence boundaries; entities are rebuilt from it
/// with [`crate::Quran::verse_for_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VerseKey {
    pub sura: u16,
    pub ayah: u16,
}

impl VerseKey {
    pub const fn new(sura: u16, ayah: u16) -> Self {
        Self { sura, ayah }
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.sura, self.ayah)
    }
}

impl FromStr for VerseKey {
    type Err = QuranError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || QuranError::ParseVerseKey(s.to_string());
        let (sura, ayah) = s.trim().split_once(':').ok_or_else(invalid)?;
        let sura = sura.trim().parse().map_err(|_| invalid())?;
        let ayah = ayah.trim().parse().map_err(|_| invalid())?;
        Ok(Self { sura, ayah })
    }
}
