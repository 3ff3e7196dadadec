//! Word frames of a page image and the highlight decorations drawn over them.

use std::collections::BTreeMap;

use quran_kit::{AyahNumber, Page, Quran, VerseKey, Word};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{HighlightColor, QuranHighlights};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in page-image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Rect {
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_y..=self.max_y).contains(&point.y)
    }
}

/// Image-to-view transform supplied by the image layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WordFrameScale {
    pub scale_x: f32,
    pub scale_y: f32,
    pub x_offset: f32,
    pub y_offset: f32,
}

impl Default for WordFrameScale {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            x_offset: 0.0,
            y_offset: 0.0,
        }
    }
}

impl WordFrameScale {
    pub fn apply(&self, rect: Rect) -> Rect {
        Rect {
            min_x: rect.min_x * self.scale_x + self.x_offset,
            min_y: rect.min_y * self.scale_y + self.y_offset,
            max_x: rect.max_x * self.scale_x + self.x_offset,
            max_y: rect.max_y * self.scale_y + self.y_offset,
        }
    }

    /// Maps a view point back into image coordinates for hit-testing.
    pub fn to_image(&self, point: Point) -> Point {
        Point {
            x: (point.x - self.x_offset) / self.scale_x,
            y: (point.y - self.y_offset) / self.scale_y,
        }
    }
}

/// Serialized form of a word frame, as exported by a page-layout database.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WordFrameRecord {
    pub sura: u16,
    pub ayah: u16,
    pub word: u16,
    pub line: u16,
    #[serde(flatten)]
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordFrame<'q> {
    pub word: Word<'q>,
    pub line: u16,
    pub rect: Rect,
}

/// Word frames of one page, ordered by word.
#[derive(Debug, Clone, Default)]
pub struct WordFrameCollection<'q> {
    frames: Vec<WordFrame<'q>>,
}

impl<'q> WordFrameCollection<'q> {
    pub fn new(mut frames: Vec<WordFrame<'q>>) -> Self {
        frames.sort_by(|a, b| a.word.cmp(&b.word));
        Self { frames }
    }

    /// Builds frames against `quran`, dropping records that name no word of it.
    pub fn from_records(quran: &'q Quran, records: &[WordFrameRecord]) -> Self {
        let frames = records
            .iter()
            .filter_map(|record| {
                let word = quran
                    .verse_for_key(VerseKey::new(record.sura, record.ayah))
                    .and_then(|verse| Word::new(verse, record.word).ok());
                if word.is_none() {
                    warn!(
                        sura = record.sura,
                        ayah = record.ayah,
                        word = record.word,
                        "ignoring frame outside this edition"
                    );
                }
                word.map(|word| WordFrame {
                    word,
                    line: record.line,
                    rect: record.rect,
                })
            })
            .collect();
        Self::new(frames)
    }

    pub fn frames(&self) -> &[WordFrame<'q>] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames_for_verse(&self, verse: AyahNumber<'q>) -> &[WordFrame<'q>] {
        let start = self.frames.partition_point(|frame| frame.word.verse() < verse);
        let end = self.frames.partition_point(|frame| frame.word.verse() <= verse);
        &self.frames[start..end]
    }

    pub fn frame_for_word(&self, word: Word<'q>) -> Option<&WordFrame<'q>> {
        self.frames
            .binary_search_by(|frame| frame.word.cmp(&word))
            .ok()
            .map(|index| &self.frames[index])
    }

    /// One bounding box per line covering the verse's words on that line.
    pub fn line_frames_for_verse(&self, verse: AyahNumber<'q>) -> Vec<(u16, Rect)> {
        let mut lines: BTreeMap<u16, Rect> = BTreeMap::new();
        for frame in self.frames_for_verse(verse) {
            lines
                .entry(frame.line)
                .and_modify(|rect| *rect = rect.union(&frame.rect))
                .or_insert(frame.rect);
        }
        lines.into_iter().collect()
    }

    pub fn word_at(&self, point: Point) -> Option<Word<'q>> {
        self.frames
            .iter()
            .find(|frame| frame.rect.contains(point))
            .map(|frame| frame.word)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameGranularity {
    Word,
    /// Merges a verse's words on each line to avoid seams between them.
    #[default]
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration<'q> {
    pub verse: AyahNumber<'q>,
    pub word: Option<Word<'q>>,
    pub line: u16,
    pub rect: Rect,
    pub color: HighlightColor,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageDecorations<'q> {
    pub decorations: Vec<Decoration<'q>>,
}

impl<'q> PageDecorations<'q> {
    pub fn is_empty(&self) -> bool {
        self.decorations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.decorations.len()
    }

    pub fn color_of(&self, verse: AyahNumber<'q>) -> Option<HighlightColor> {
        self.decorations
            .iter()
            .find(|decoration| decoration.verse == verse && decoration.word.is_none())
            .or_else(|| {
                self.decorations
                    .iter()
                    .find(|decoration| decoration.verse == verse)
            })
            .map(|decoration| decoration.color)
    }

    pub fn scaled(&self, scale: &WordFrameScale) -> PageDecorations<'q> {
        PageDecorations {
            decorations: self
                .decorations
                .iter()
                .map(|decoration| Decoration {
                    rect: scale.apply(decoration.rect),
                    ..*decoration
                })
                .collect(),
        }
    }
}

/// Highlight rectangles for `page`, one color per verse after precedence.
///
/// The pointed word, if it lies on the page, is appended last as its own
/// word-level decoration.
pub fn decorate_page<'q>(
    highlights: &QuranHighlights<'q>,
    page: Page<'q>,
    frames: &WordFrameCollection<'q>,
    granularity: FrameGranularity,
) -> PageDecorations<'q> {
    let first = page.first_verse();
    let last = page.last_verse();
    let on_page = |verse: &AyahNumber<'q>| first <= *verse && *verse <= last;

    let mut colored: Vec<(AyahNumber<'q>, HighlightColor)> = highlights
        .verses_by_highlights()
        .into_iter()
        .filter(|(verse, _)| on_page(verse))
        .collect();
    colored.sort_by_key(|(verse, _)| *verse);

    let mut decorations = Vec::new();
    for (verse, color) in colored {
        match granularity {
            FrameGranularity::Word => {
                decorations.extend(frames.frames_for_verse(verse).iter().map(|frame| Decoration {
                    verse,
                    word: Some(frame.word),
                    line: frame.line,
                    rect: frame.rect,
                    color,
                }));
            }
            FrameGranularity::Line => {
                decorations.extend(frames.line_frames_for_verse(verse).into_iter().map(
                    |(line, rect)| Decoration {
                        verse,
                        word: None,
                        line,
                        rect,
                        color,
                    },
                ));
            }
        }
    }

    if let Some(word) = highlights.pointed_word.filter(|word| on_page(&word.verse())) {
        if let Some(frame) = frames.frame_for_word(word) {
            decorations.push(Decoration {
                verse: word.verse(),
                word: Some(word),
                line: frame.line,
                rect: frame.rect,
                color: HighlightColor::Pointed,
            });
        }
    }

    PageDecorations { decorations }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use uuid::Uuid;

    use super::*;
    use crate::{Note, NoteColor};

    fn quran() -> &'static Quran {
        Quran::hafs_madani_1405()
    }

    fn verse(sura: u16, ayah: u16) -> AyahNumber<'static> {
        quran().verse(sura, ayah).unwrap()
    }

    /// Page 2 laid out as three words per verse; 2:2 wraps onto line 2.
    fn page_two_frames() -> WordFrameCollection<'static> {
        let mut records = Vec::new();
        let mut push = |ayah: u16, word: u16, line: u16, x: f32| {
            records.push(WordFrameRecord {
                sura: 2,
                ayah,
                word,
                line,
                rect: Rect::new(x, f32::from(line) * 20.0, x + 8.0, f32::from(line) * 20.0 + 15.0),
            });
        };
        push(1, 1, 1, 0.0);
        push(2, 1, 1, 10.0);
        push(2, 2, 1, 20.0);
        push(2, 3, 2, 0.0);
        push(3, 1, 2, 10.0);
        push(3, 2, 2, 20.0);
        WordFrameCollection::from_records(quran(), &records)
    }

    #[test]
    fn line_granularity_merges_words_per_line() {
        let highlights = QuranHighlights {
            reading_verses: vec![verse(2, 2)],
            ..Default::default()
        };
        let page = quran().page(2).unwrap();
        let decorations = decorate_page(&highlights, page, &page_two_frames(), FrameGranularity::Line);
        assert_eq!(decorations.len(), 2);
        let first_line = decorations.decorations[0];
        assert_eq!(first_line.line, 1);
        assert_eq!(first_line.rect, Rect::new(10.0, 20.0, 28.0, 35.0));
        assert_eq!(first_line.color, HighlightColor::Reading);
        assert_eq!(decorations.decorations[1].rect, Rect::new(0.0, 40.0, 8.0, 55.0));
    }

    #[test]
    fn word_granularity_keeps_every_frame() {
        let highlights = QuranHighlights {
            search_verses: vec![verse(2, 2)],
            ..Default::default()
        };
        let page = quran().page(2).unwrap();
        let decorations = decorate_page(&highlights, page, &page_two_frames(), FrameGranularity::Word);
        assert_eq!(decorations.len(), 3);
        assert!(decorations
            .decorations
            .iter()
            .all(|d| d.word.is_some() && d.color == HighlightColor::Search));
    }

    #[test]
    fn share_wins_over_note_in_rendered_colors() {
        let noted = verse(2, 1);
        let mut highlights = QuranHighlights {
            share_verses: vec![noted],
            ..Default::default()
        };
        highlights.note_verses.insert(
            noted,
            Note {
                id: Uuid::new_v4(),
                verses: [noted].into_iter().collect(),
                color: NoteColor::Red,
                note: None,
                modified_date: SystemTime::UNIX_EPOCH,
            },
        );
        let page = quran().page(2).unwrap();
        let decorations = decorate_page(&highlights, page, &page_two_frames(), FrameGranularity::Line);
        assert_eq!(decorations.color_of(noted), Some(HighlightColor::Share));
    }

    #[test]
    fn verses_of_other_pages_are_skipped() {
        let highlights = QuranHighlights {
            reading_verses: vec![verse(2, 6), verse(2, 3)],
            ..Default::default()
        };
        let page = quran().page(2).unwrap();
        let decorations = decorate_page(&highlights, page, &page_two_frames(), FrameGranularity::Line);
        assert_eq!(decorations.len(), 1);
        assert_eq!(decorations.decorations[0].verse, verse(2, 3));
        assert!(decorations.color_of(verse(2, 6)).is_none());
    }

    #[test]
    fn pointed_word_is_drawn_last() {
        let pointed = Word::new(verse(2, 3), 2).unwrap();
        let highlights = QuranHighlights {
            share_verses: vec![verse(2, 3)],
            pointed_word: Some(pointed),
            ..Default::default()
        };
        let page = quran().page(2).unwrap();
        let decorations = decorate_page(&highlights, page, &page_two_frames(), FrameGranularity::Line);
        let last = decorations.decorations.last().unwrap();
        assert_eq!(last.word, Some(pointed));
        assert_eq!(last.color, HighlightColor::Pointed);
        assert_eq!(decorations.color_of(verse(2, 3)), Some(HighlightColor::Share));
    }

    #[test]
    fn hit_testing_and_scaling() {
        let frames = page_two_frames();
        let hit = frames.word_at(Point::new(12.0, 25.0)).unwrap();
        assert_eq!((hit.verse().key(), hit.word_number()), (VerseKey::new(2, 2), 1));
        assert!(frames.word_at(Point::new(9.0, 25.0)).is_none());

        let scale = WordFrameScale {
            scale_x: 2.0,
            scale_y: 0.5,
            x_offset: 4.0,
            y_offset: 1.0,
        };
        assert_eq!(
            scale.apply(Rect::new(1.0, 2.0, 3.0, 4.0)),
            Rect::new(6.0, 2.0, 10.0, 3.0)
        );
        assert_eq!(scale.to_image(Point::new(6.0, 2.0)), Point::new(1.0, 2.0));
    }

    #[test]
    fn invalid_records_are_dropped() {
        let records = [WordFrameRecord {
            sura: 1,
            ayah: 99,
            word: 1,
            line: 1,
            rect: Rect::new(0.0, 0.0, 1.0, 1.0),
        }];
        assert!(WordFrameCollection::from_records(quran(), &records).is_empty());
    }
}
