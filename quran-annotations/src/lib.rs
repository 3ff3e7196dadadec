//! Verse selection, highlights and notes on top of `quran-kit`.

mod actions;
mod config;
mod error;
pub mod frames;
mod highlights;
mod last_ayah;
mod notes;
mod persistence;
mod recorder;
mod selection;
mod services;

pub use actions::AnnotationActions;
pub use config::{project_dirs, ReaderConfig};
pub use error::AnnotationError;
pub use frames::{
    decorate_page, Decoration, FrameGranularity, PageDecorations, Point, Rect, WordFrame,
    WordFrameCollection, WordFrameRecord, WordFrameScale,
};
pub use highlights::{HighlightColor, HighlightsChange, QuranHighlights};
pub use last_ayah::{
    AudioEnd, JuzBasedLastAyahFinder, LastAyahFinder, PageBasedLastAyahFinder,
    SuraBasedLastAyahFinder,
};
pub use notes::{Note, NoteColor, NoteRecord};
pub use persistence::{FileNotePersistence, MemoryNotePersistence, NotePersistence};
pub use recorder::{CollectingErrorRecorder, ErrorRecorder, RecordedError, TracingErrorRecorder};
pub use selection::{select_verse_range, SelectionGesture};
pub use services::{HighlightsService, NoteService, RemovalRequest};
