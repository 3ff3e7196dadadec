use std::collections::HashMap;

use quran_kit::{AyahNumber, Word};
use serde::Serialize;

use crate::{Note, NoteColor};

/// Why a verse is drawn highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightColor {
    Note(NoteColor),
    Reading,
    Search,
    Share,
    Pointed,
}

/// Every transient and persistent highlight of the reading session.
///
/// Never mutated in place once published: replace the whole value and compare
/// the previous and new snapshots with [`QuranHighlights::change_since`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuranHighlights<'q> {
    pub reading_verses: Vec<AyahNumber<'q>>,
    pub share_verses: Vec<AyahNumber<'q>>,
    pub search_verses: Vec<AyahNumber<'q>>,
    pub note_verses: HashMap<AyahNumber<'q>, Note<'q>>,
    pub pointed_word: Option<Word<'q>>,
}

/// What consumers need to react to after a replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightsChange<'q> {
    pub needs_scrolling: bool,
    pub share_changed: bool,
    pub scroll_target: Option<AyahNumber<'q>>,
    pub redraw: bool,
}

impl<'q> QuranHighlights<'q> {
    pub fn is_empty(&self) -> bool {
        self.reading_verses.is_empty()
            && self.share_verses.is_empty()
            && self.search_verses.is_empty()
            && self.note_verses.is_empty()
            && self.pointed_word.is_none()
    }

    /// Color of every highlighted verse. Sources are applied as notes,
    /// reading, search, then share; a later source replaces an earlier color.
    pub fn verses_by_highlights(&self) -> HashMap<AyahNumber<'q>, HighlightColor> {
        let mut colors = HashMap::new();
        for (verse, note) in &self.note_verses {
            colors.insert(*verse, HighlightColor::Note(note.color));
        }
        let ordered = [
            (&self.reading_verses, HighlightColor::Reading),
            (&self.search_verses, HighlightColor::Search),
            (&self.share_verses, HighlightColor::Share),
        ];
        for (verses, color) in ordered {
            for verse in verses {
                colors.insert(*verse, color);
            }
        }
        colors
    }

    /// True when reading or search verses are present and differ in content
    /// from `previous`.
    pub fn needs_scrolling(&self, previous: &QuranHighlights<'q>) -> bool {
        let reading = !self.reading_verses.is_empty() && self.reading_verses != previous.reading_verses;
        let search = !self.search_verses.is_empty() && self.search_verses != previous.search_verses;
        reading || search
    }

    pub fn first_scrolling_verse(&self) -> Option<AyahNumber<'q>> {
        self.reading_verses
            .first()
            .or_else(|| self.search_verses.first())
            .copied()
    }

    pub fn change_since(&self, previous: &QuranHighlights<'q>) -> HighlightsChange<'q> {
        let needs_scrolling = self.needs_scrolling(previous);
        let share_changed = self.share_verses != previous.share_verses;
        let scroll_target = if needs_scrolling {
            self.first_scrolling_verse()
        } else if share_changed {
            self.share_verses.last().copied()
        } else {
            None
        };
        HighlightsChange {
            needs_scrolling,
            share_changed,
            scroll_target,
            redraw: self != previous,
        }
    }
}
