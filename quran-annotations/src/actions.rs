use std::sync::Arc;

use anyhow::Result;
use quran_kit::AyahNumber;
use tracing::debug;
use uuid::Uuid;

use crate::{
    AnnotationError, ErrorRecorder, HighlightsChange, HighlightsService, Note, NoteColor,
    NoteService, RemovalRequest,
};

/// Annotation commands issued from menus and gestures.
///
/// Nothing here returns an error: failures go to the [`ErrorRecorder`] with
/// a reason and the published state is left as it was.
pub struct AnnotationActions<'q> {
    highlights: HighlightsService<'q>,
    notes: NoteService<'q>,
    recorder: Arc<dyn ErrorRecorder>,
}

impl<'q> AnnotationActions<'q> {
    pub fn new(
        highlights: HighlightsService<'q>,
        notes: NoteService<'q>,
        recorder: Arc<dyn ErrorRecorder>,
    ) -> Self {
        let actions = Self {
            highlights,
            notes,
            recorder,
        };
        actions.refresh_note_highlights();
        actions
    }

    pub fn highlights(&self) -> &HighlightsService<'q> {
        &self.highlights
    }

    pub fn notes(&self) -> &NoteService<'q> {
        &self.notes
    }

    /// Copies the current notes into `note_verses`.
    pub fn refresh_note_highlights(&self) -> HighlightsChange<'q> {
        let verse_notes = self.notes.verse_notes();
        self.highlights
            .update(move |current| current.note_verses = verse_notes)
    }

    /// Turns the current selection into a highlight and clears the selection.
    pub async fn highlight_selection(&self, color: NoteColor) -> Option<Note<'q>> {
        let verses = self.highlights.current().share_verses;
        let note = self
            .capture(
                self.highlight_verses_inner(&verses, color),
                "could not highlight the selected verses",
            )
            .await?;
        self.highlights
            .update(|current| current.share_verses.clear());
        Some(note)
    }

    pub async fn highlight_verses(
        &self,
        verses: &[AyahNumber<'q>],
        color: NoteColor,
    ) -> Option<Note<'q>> {
        self.capture(
            self.highlight_verses_inner(verses, color),
            "could not highlight verses",
        )
        .await
    }

    pub async fn edit_note(
        &self,
        id: Uuid,
        text: Option<String>,
        color: NoteColor,
    ) -> Option<Note<'q>> {
        let result = async {
            let note = self.notes.update_note(id, text, color).await?;
            self.refresh_note_highlights();
            Ok::<_, anyhow::Error>(note)
        };
        self.capture(result, "could not update the note").await
    }

    /// Removes the notes under the selection.
    ///
    /// `confirm` is asked only when one of the notes carries text; returning
    /// `false` keeps them. Returns whether anything was removed.
    pub async fn remove_selection_notes<F>(&self, confirm: F) -> bool
    where
        F: FnOnce(&RemovalRequest<'q>) -> bool,
    {
        let verses = self.highlights.current().share_verses;
        let request = self.notes.removal_request(&verses);
        if request.is_empty() {
            return false;
        }
        let confirmed = request.needs_confirmation && confirm(&request);
        if request.needs_confirmation && !confirmed {
            debug!(count = request.notes.len(), "note removal declined");
            return false;
        }
        let result = async {
            self.notes.remove(&request, confirmed).await?;
            self.refresh_note_highlights();
            Ok::<_, anyhow::Error>(())
        };
        self.capture(result, "could not remove notes").await.is_some()
    }

    async fn highlight_verses_inner(
        &self,
        verses: &[AyahNumber<'q>],
        color: NoteColor,
    ) -> Result<Note<'q>> {
        if verses.is_empty() {
            return Err(AnnotationError::EmptySelection.into());
        }
        let note = self.notes.set_highlight(verses, color).await?;
        self.refresh_note_highlights();
        Ok(note)
    }

    async fn capture<T>(
        &self,
        operation: impl std::future::Future<Output = Result<T>>,
        reason: &str,
    ) -> Option<T> {
        match operation.await {
            Ok(value) => Some(value),
            Err(err) => {
                self.recorder.record_error(&err, reason);
                None
            }
        }
    }
}
