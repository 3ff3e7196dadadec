use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use quran_kit::{AyahNumber, Quran, VerseKey};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use uuid::Uuid;

use crate::AnnotationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    Red,
    Green,
    Blue,
    #[default]
    Yellow,
    Purple,
}

impl NoteColor {
    pub const ALL: [NoteColor; 5] = [
        NoteColor::Red,
        NoteColor::Green,
        NoteColor::Blue,
        NoteColor::Yellow,
        NoteColor::Purple,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NoteColor::Red => "red",
            NoteColor::Green => "green",
            NoteColor::Blue => "blue",
            NoteColor::Yellow => "yellow",
            NoteColor::Purple => "purple",
        }
    }
}

impl fmt::Display for NoteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NoteColor {
    type Err = AnnotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        NoteColor::ALL
            .into_iter()
            .find(|color| color.name() == wanted)
            .ok_or_else(|| AnnotationError::UnknownColor(s.to_string()))
    }
}

/// A user highlight over one or more verses, optionally with text.
#[derive(Debug, Clone, PartialEq)]
pub struct Note<'q> {
    pub id: Uuid,
    pub verses: BTreeSet<AyahNumber<'q>>,
    pub color: NoteColor,
    pub note: Option<String>,
    pub modified_date: SystemTime,
}

impl<'q> Note<'q> {
    pub fn first_verse(&self) -> Option<AyahNumber<'q>> {
        self.verses.first().copied()
    }

    pub fn has_text(&self) -> bool {
        self.note.as_deref().is_some_and(|text| !text.trim().is_empty())
    }

    pub fn to_record(&self) -> NoteRecord {
        NoteRecord {
            id: self.id,
            verses: self.verses.iter().map(|verse| verse.key()).collect(),
            color: self.color,
            note: self.note.clone(),
            modified_date: self.modified_date,
        }
    }

    /// Rebuilds a note against `quran`; `None` when any verse is not part of it.
    pub fn from_record(quran: &'q Quran, record: &NoteRecord) -> Option<Self> {
        let verses = record
            .verses
            .iter()
            .map(|&key| quran.verse_for_key(key))
            .collect::<Option<BTreeSet<_>>>()?;
        if verses.is_empty() {
            return None;
        }
        Some(Self {
            id: record.id,
            verses,
            color: record.color,
            note: record.note.clone(),
            modified_date: record.modified_date,
        })
    }
}

/// Persisted form of a [`Note`]: coordinates only, no entity references.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: Uuid,
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub verses: Vec<VerseKey>,
    pub color: NoteColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub modified_date: SystemTime,
}
