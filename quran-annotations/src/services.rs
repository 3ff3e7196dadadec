use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::SystemTime;

use anyhow::Result;
use quran_kit::{AyahNumber, Quran};
use tokio::sync::watch;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::{
    AnnotationError, HighlightsChange, Note, NoteColor, NotePersistence, NoteRecord,
    QuranHighlights,
};

/// Publishes the current [`QuranHighlights`] to every subscriber.
pub struct HighlightsService<'q> {
    sender: watch::Sender<QuranHighlights<'q>>,
}

impl Default for HighlightsService<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'q> HighlightsService<'q> {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(QuranHighlights::default());
        Self { sender }
    }

    pub fn current(&self) -> QuranHighlights<'q> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<QuranHighlights<'q>> {
        self.sender.subscribe()
    }

    /// Applies `edit` to a copy of the current value and publishes the copy.
    pub fn update<F>(&self, edit: F) -> HighlightsChange<'q>
    where
        F: FnOnce(&mut QuranHighlights<'q>),
    {
        let previous = self.current();
        let mut next = previous.clone();
        edit(&mut next);
        self.replace(next, &previous)
    }

    pub fn set(&self, highlights: QuranHighlights<'q>) -> HighlightsChange<'q> {
        let previous = self.current();
        self.replace(highlights, &previous)
    }

    fn replace(
        &self,
        next: QuranHighlights<'q>,
        previous: &QuranHighlights<'q>,
    ) -> HighlightsChange<'q> {
        let change = next.change_since(previous);
        if change.redraw {
            debug!(
                scroll = ?change.scroll_target.map(|verse| verse.key()),
                share_changed = change.share_changed,
                "highlights replaced"
            );
        }
        self.sender.send_replace(next);
        change
    }
}

/// Notes that a removal would touch, and whether the user must confirm it.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovalRequest<'q> {
    pub notes: Vec<Note<'q>>,
    pub needs_confirmation: bool,
}

impl RemovalRequest<'_> {
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Note CRUD over a [`NotePersistence`], publishing the note list.
///
/// Persistence is written before the published list changes, so a failed
/// save leaves the current notes untouched.
pub struct NoteService<'q> {
    quran: &'q Quran,
    persistence: Arc<dyn NotePersistence>,
    notes: watch::Sender<Vec<Note<'q>>>,
}

impl<'q> NoteService<'q> {
    #[instrument(skip(quran, persistence))]
    pub async fn open(quran: &'q Quran, persistence: Arc<dyn NotePersistence>) -> Result<Self> {
        let records = persistence.load().await?;
        let mut notes: Vec<Note<'q>> = records
            .iter()
            .filter_map(|record| {
                let note = Note::from_record(quran, record);
                if note.is_none() {
                    warn!(id = %record.id, "skipping note with verses outside this edition");
                }
                note
            })
            .collect();
        sort_notes(&mut notes);
        debug!(count = notes.len(), "notes loaded");
        let (sender, _) = watch::channel(notes);
        Ok(Self {
            quran,
            persistence,
            notes: sender,
        })
    }

    pub fn quran(&self) -> &'q Quran {
        self.quran
    }

    pub fn notes(&self) -> Vec<Note<'q>> {
        self.notes.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Note<'q>>> {
        self.notes.subscribe()
    }

    pub fn note(&self, id: Uuid) -> Option<Note<'q>> {
        self.notes.borrow().iter().find(|note| note.id == id).cloned()
    }

    /// Map used as `QuranHighlights::note_verses`.
    pub fn verse_notes(&self) -> HashMap<AyahNumber<'q>, Note<'q>> {
        let notes = self.notes.borrow();
        let mut map = HashMap::new();
        for note in notes.iter() {
            for verse in &note.verses {
                map.insert(*verse, note.clone());
            }
        }
        map
    }

    /// Highlights `verses`, absorbing every note that overlaps them.
    ///
    /// The merged note keeps the id of the earliest overlapping note and
    /// joins their texts with a blank line.
    #[instrument(skip(self, verses), fields(count = verses.len()))]
    pub async fn set_highlight(
        &self,
        verses: &[AyahNumber<'q>],
        color: NoteColor,
    ) -> Result<Note<'q>> {
        if verses.is_empty() {
            return Err(AnnotationError::EmptySelection.into());
        }
        let (overlapping, mut remaining): (Vec<_>, Vec<_>) = self
            .notes()
            .into_iter()
            .partition(|note| verses.iter().any(|verse| note.verses.contains(verse)));

        let mut merged: BTreeSet<AyahNumber<'q>> = verses.iter().copied().collect();
        let mut texts = Vec::new();
        for note in &overlapping {
            merged.extend(note.verses.iter().copied());
            if note.has_text() {
                texts.extend(note.note.clone());
            }
        }
        let note = Note {
            id: overlapping.first().map_or_else(Uuid::new_v4, |note| note.id),
            verses: merged,
            color,
            note: (!texts.is_empty()).then(|| texts.join("\n\n")),
            modified_date: SystemTime::now(),
        };
        debug!(merged = overlapping.len(), id = %note.id, "highlight set");
        remaining.push(note.clone());
        self.commit(remaining).await?;
        Ok(note)
    }

    #[instrument(skip(self, text))]
    pub async fn update_note(
        &self,
        id: Uuid,
        text: Option<String>,
        color: NoteColor,
    ) -> Result<Note<'q>> {
        let mut notes = self.notes();
        let note = notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or(AnnotationError::NoteNotFound(id))?;
        note.note = text.filter(|text| !text.trim().is_empty());
        note.color = color;
        note.modified_date = SystemTime::now();
        let updated = note.clone();
        self.commit(notes).await?;
        Ok(updated)
    }

    pub fn removal_request(&self, verses: &[AyahNumber<'q>]) -> RemovalRequest<'q> {
        let notes: Vec<Note<'q>> = self
            .notes
            .borrow()
            .iter()
            .filter(|note| verses.iter().any(|verse| note.verses.contains(verse)))
            .cloned()
            .collect();
        let needs_confirmation = notes.iter().any(Note::has_text);
        RemovalRequest {
            notes,
            needs_confirmation,
        }
    }

    #[instrument(skip(self, request), fields(count = request.notes.len()))]
    pub async fn remove(&self, request: &RemovalRequest<'q>, confirmed: bool) -> Result<()> {
        if request.needs_confirmation && !confirmed {
            return Err(AnnotationError::ConfirmationRequired.into());
        }
        if request.is_empty() {
            return Ok(());
        }
        let remaining = self
            .notes()
            .into_iter()
            .filter(|note| request.notes.iter().all(|removed| removed.id != note.id))
            .collect();
        self.commit(remaining).await
    }

    async fn commit(&self, mut notes: Vec<Note<'q>>) -> Result<()> {
        sort_notes(&mut notes);
        let records: Vec<NoteRecord> = notes.iter().map(Note::to_record).collect();
        self.persistence.save_all(&records).await?;
        self.notes.send_replace(notes);
        Ok(())
    }
}

fn sort_notes(notes: &mut [Note<'_>]) {
    notes.sort_by(|a, b| a.first_verse().cmp(&b.first_verse()).then(a.id.cmp(&b.id)));
}
