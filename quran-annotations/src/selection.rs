use quran_kit::navigation::array_with;
use quran_kit::{compare_ayahs, AyahNumber};
use tracing::debug;

use crate::frames::{Point, WordFrameCollection};
use crate::{HighlightsChange, HighlightsService};

/// Ordered inclusive verses between `start` and `touched`, in either order.
///
/// Runs in time proportional to the range and returns equal lists for equal
/// inputs.
pub fn select_verse_range<'q>(
    start: AyahNumber<'q>,
    touched: AyahNumber<'q>,
) -> Vec<AyahNumber<'q>> {
    let (first, last) = if compare_ayahs(&start, &touched).is_gt() {
        (touched, start)
    } else {
        (start, touched)
    };
    array_with(first, last, compare_ayahs)
}

/// Long-press verse selection driven by pointer events.
///
/// Every change of the selected range replaces `share_verses` on the
/// highlights service. Points that hit no word are ignored.
#[derive(Debug, Default)]
pub struct SelectionGesture<'q> {
    start: Option<AyahNumber<'q>>,
    touched: Option<AyahNumber<'q>>,
}

impl<'q> SelectionGesture<'q> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    pub fn selected_verses(&self) -> Vec<AyahNumber<'q>> {
        match (self.start, self.touched) {
            (Some(start), Some(touched)) => select_verse_range(start, touched),
            _ => Vec::new(),
        }
    }

    pub fn pointer_down(
        &mut self,
        verse: AyahNumber<'q>,
        highlights: &HighlightsService<'q>,
    ) -> HighlightsChange<'q> {
        debug!(%verse, "selection started");
        self.start = Some(verse);
        self.touched = Some(verse);
        self.publish(highlights)
    }

    /// `None` when no selection is active or the touched verse is unchanged.
    pub fn pointer_move(
        &mut self,
        verse: AyahNumber<'q>,
        highlights: &HighlightsService<'q>,
    ) -> Option<HighlightsChange<'q>> {
        if self.start.is_none() || self.touched == Some(verse) {
            return None;
        }
        self.touched = Some(verse);
        Some(self.publish(highlights))
    }

    /// Ends the drag and returns the final range. The range stays in
    /// `share_verses` so a follow-up menu can act on it.
    pub fn pointer_up(&mut self) -> Option<Vec<AyahNumber<'q>>> {
        let verses = self.selected_verses();
        self.start = None;
        self.touched = None;
        (!verses.is_empty()).then_some(verses)
    }

    pub fn pointer_cancel(&mut self, highlights: &HighlightsService<'q>) -> HighlightsChange<'q> {
        self.start = None;
        self.touched = None;
        highlights.update(|current| current.share_verses.clear())
    }

    pub fn pointer_down_at(
        &mut self,
        frames: &WordFrameCollection<'q>,
        point: Point,
        highlights: &HighlightsService<'q>,
    ) -> Option<HighlightsChange<'q>> {
        let word = frames.word_at(point)?;
        Some(self.pointer_down(word.verse(), highlights))
    }

    pub fn pointer_move_at(
        &mut self,
        frames: &WordFrameCollection<'q>,
        point: Point,
        highlights: &HighlightsService<'q>,
    ) -> Option<HighlightsChange<'q>> {
        let word = frames.word_at(point)?;
        self.pointer_move(word.verse(), highlights)
    }

    fn publish(&self, highlights: &HighlightsService<'q>) -> HighlightsChange<'q> {
        let verses = self.selected_verses();
        highlights.update(move |current| current.share_verses = verses)
    }
}
