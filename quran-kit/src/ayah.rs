use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{Navigatable, Page, Quran, QuranError, Sura, VerseKey};

/// A verse of one edition.
///
/// Equality, ordering and hashing use `(sura, ayah)` only, so verses rebuilt
/// from stored coordinates compare equal to the originals.
#[derive(Clone, Copy)]
pub struct AyahNumber<'q> {
    quran: &'q Quran,
    key: VerseKey,
}

impl<'q> AyahNumber<'q> {
    pub fn new(quran: &'q Quran, sura: u16, ayah: u16) -> Result<Self, QuranError> {
        let sura_entity = Sura::new(quran, sura)?;
        if ayah == 0 || ayah > sura_entity.number_of_verses() {
            return Err(QuranError::InvalidAyah { sura, ayah });
        }
        Ok(Self::unchecked(quran, VerseKey::new(sura, ayah)))
    }

    pub fn from_key(quran: &'q Quran, key: VerseKey) -> Result<Self, QuranError> {
        Self::new(quran, key.sura, key.ayah)
    }

    pub(crate) fn unchecked(quran: &'q Quran, key: VerseKey) -> Self {
        Self { quran, key }
    }

    pub fn quran(&self) -> &'q Quran {
        self.quran
    }

    pub fn key(&self) -> VerseKey {
        self.key
    }

    pub fn sura(&self) -> Sura<'q> {
        Sura::unchecked(self.quran, self.key.sura)
    }

    pub fn ayah(&self) -> u16 {
        self.key.ayah
    }

    /// Page holding this verse, found by binary search over page openings.
    pub fn page(&self) -> Page<'q> {
        Page::unchecked(self.quran, self.quran.page_number_of(self.key))
    }
}

impl Navigatable for AyahNumber<'_> {
    fn next(&self) -> Option<Self> {
        let sura = self.sura();
        if self.key.ayah < sura.number_of_verses() {
            Some(Self::unchecked(
                self.quran,
                VerseKey::new(self.key.sura, self.key.ayah + 1),
            ))
        } else {
            sura.next().map(|next| next.first_verse())
        }
    }

    fn previous(&self) -> Option<Self> {
        if self.key.ayah > 1 {
            Some(Self::unchecked(
                self.quran,
                VerseKey::new(self.key.sura, self.key.ayah - 1),
            ))
        } else {
            self.sura().previous().map(|previous| previous.last_verse())
        }
    }
}

/// Sura first, then ayah.
pub fn compare_ayahs(lhs: &AyahNumber<'_>, rhs: &AyahNumber<'_>) -> Ordering {
    lhs.key.cmp(&rhs.key)
}

impl PartialEq for AyahNumber<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for AyahNumber<'_> {}

impl PartialOrd for AyahNumber<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AyahNumber<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_ayahs(self, other)
    }
}

impl Hash for AyahNumber<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for AyahNumber<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AyahNumber({})", self.key)
    }
}

impl fmt::Display for AyahNumber<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.key, f)
    }
}

/// A word inside a verse, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word<'q> {
    verse: AyahNumber<'q>,
    word_number: u16,
}

impl<'q> Word<'q> {
    pub fn new(verse: AyahNumber<'q>, word_number: u16) -> Result<Self, QuranError> {
        if word_number == 0 {
            return Err(QuranError::InvalidWord(word_number));
        }
        Ok(Self { verse, word_number })
    }

    pub fn verse(&self) -> AyahNumber<'q> {
        self.verse
    }

    pub fn word_number(&self) -> u16 {
        self.word_number
    }
}
