use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use directories::ProjectDirs;
use quran_annotations::{
    decorate_page, project_dirs, select_verse_range, AudioEnd, FileNotePersistence,
    FrameGranularity, HighlightColor, LastAyahFinder, Note, NoteColor, NotePersistence, NoteRecord,
    NoteService, QuranHighlights, ReaderConfig, Rect, WordFrameCollection, WordFrameRecord,
};
use quran_kit::search::binary_search_first;
use quran_kit::{AyahNumber, Juz, Page, Quran, Sura, VerseKey};
use serde::Serialize;
use tracing::{debug, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(
    name = "quran",
    version,
    about = "Navigate the Quran by sura, page and juz, and keep verse notes"
)]
struct Args {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Config file (defaults to config.toml in the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Notes file, overriding `notes_path` from the config
    #[arg(long, global = true)]
    notes: Option<PathBuf>,

    #[command(subcommand)]
    command: CommandKind,
}

#[derive(Debug, Subcommand)]
enum CommandKind {
    /// Where a verse sits among pages, juzs, hizbs and quarters
    Verse { key: VerseKey },
    /// Verses and partitions of a page
    Page { number: u16 },
    /// Summary of a sura
    Sura { number: u16 },
    /// Bounds of a juz
    Juz { number: u16 },
    /// Every verse between two verses, in either order
    Select { from: VerseKey, to: VerseKey },
    /// Where audio playback that starts at a verse stops
    LastAyah {
        key: VerseKey,
        /// Playback range; defaults to `audio_end` from the config
        #[arg(long)]
        scope: Option<AudioEnd>,
    },
    /// Highlight rectangles for a page, from a JSON file of word frames
    Decorate(DecorateArgs),
    /// Manage highlights and notes
    #[command(subcommand)]
    Note(NoteCommand),
}

#[derive(Debug, ClapArgs)]
struct DecorateArgs {
    #[arg(long)]
    page: u16,

    /// JSON array of `{sura, ayah, word, line, min_x, min_y, max_x, max_y}`
    #[arg(long)]
    frames: PathBuf,

    #[arg(long, value_delimiter = ',')]
    reading: Vec<VerseKey>,

    #[arg(long, value_delimiter = ',')]
    search: Vec<VerseKey>,

    #[arg(long, value_delimiter = ',')]
    share: Vec<VerseKey>,

    /// One rectangle per verse and line
    #[arg(long, conflicts_with = "words")]
    lines: bool,

    /// One rectangle per word
    #[arg(long)]
    words: bool,
}

#[derive(Debug, Subcommand)]
enum NoteCommand {
    /// Highlight a verse range, merging notes it overlaps
    Add {
        from: VerseKey,
        to: Option<VerseKey>,
        #[arg(long, default_value_t = NoteColor::default())]
        color: NoteColor,
        #[arg(long)]
        text: Option<String>,
    },
    /// List stored notes
    List,
    /// Remove the notes touching a verse range
    Remove {
        from: VerseKey,
        to: Option<VerseKey>,
        /// Also remove notes that carry text
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let dirs = project_dirs().ok();
    let _log_guard = init_logging(dirs.as_ref())?;

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => ReaderConfig::default_path()?,
    };
    let config = ReaderConfig::load_or_default(&config_path)?;
    let quran = config.reading.quran();
    debug!(reading = ?config.reading, "edition selected");

    match &args.command {
        CommandKind::Verse { key } => {
            let info = VerseInfo::new(AyahNumber::from_key(quran, *key)?);
            emit(args.json, &info, |info| info.to_text())
        }
        CommandKind::Page { number } => {
            let info = PageInfo::new(Page::new(quran, *number)?);
            emit(args.json, &info, |info| info.to_text())
        }
        CommandKind::Sura { number } => {
            let info = SuraInfo::new(Sura::new(quran, *number)?);
            emit(args.json, &info, |info| info.to_text())
        }
        CommandKind::Juz { number } => {
            let info = JuzInfo::new(Juz::new(quran, *number)?);
            emit(args.json, &info, |info| info.to_text())
        }
        CommandKind::Select { from, to } => {
            let verses = verse_range(quran, *from, Some(*to))?;
            let keys: Vec<String> = verses.iter().map(ToString::to_string).collect();
            emit(args.json, &keys, |keys| keys.join("\n"))
        }
        CommandKind::LastAyah { key, scope } => {
            let verse = AyahNumber::from_key(quran, *key)?;
            let scope = scope.unwrap_or(config.audio_end);
            let last = scope.finder().find_last_ayah(verse);
            let info = LastAyahInfo {
                from: verse.to_string(),
                scope: scope.name(),
                last: last.to_string(),
            };
            emit(args.json, &info, |info| info.last.clone())
        }
        CommandKind::Decorate(decorate) => {
            let notes = open_notes(quran, &args, &config).await?;
            let granularity = if decorate.words {
                FrameGranularity::Word
            } else if decorate.lines {
                FrameGranularity::Line
            } else {
                config.highlight_granularity
            };
            let rows = run_decorate(quran, decorate, &notes, granularity)?;
            emit(args.json, &rows, |rows| {
                rows.iter().map(DecorationRow::to_text).collect::<Vec<_>>().join("\n")
            })
        }
        CommandKind::Note(command) => {
            let notes = open_notes(quran, &args, &config).await?;
            run_note(quran, command, &notes, args.json).await
        }
    }
}

fn init_logging(project_dirs: Option<&ProjectDirs>) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);

    let log_dir = project_dirs.map(|dirs| dirs.data_local_dir().join("logs"));
    let (file_layer, guard) = match log_dir {
        Some(log_dir) if fs::create_dir_all(&log_dir).is_ok() => {
            let file_appender = tracing_appender::rolling::never(log_dir, "quran.log");
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer);
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|err| anyhow!(err))?;

    Ok(guard)
}

fn emit<T, F>(json: bool, value: &T, text: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text(value));
    }
    Ok(())
}

fn verse_range(quran: &Quran, from: VerseKey, to: Option<VerseKey>) -> Result<Vec<AyahNumber<'_>>> {
    let start = AyahNumber::from_key(quran, from)?;
    let end = match to {
        Some(to) => AyahNumber::from_key(quran, to)?,
        None => start,
    };
    Ok(select_verse_range(start, end))
}

fn span(first: AyahNumber<'_>, last: AyahNumber<'_>) -> String {
    if first == last {
        first.to_string()
    } else {
        format!("{first}-{last}")
    }
}

#[derive(Debug, Serialize)]
struct VerseInfo {
    key: String,
    sura: u16,
    ayah: u16,
    page: u16,
    juz: u16,
    hizb: u16,
    quarter: u16,
}

impl VerseInfo {
    fn new(verse: AyahNumber<'_>) -> Self {
        let quarters = verse.quran().quarters();
        let quarter = *binary_search_first(&quarters, |quarter| quarter.first_verse() <= verse);
        Self {
            key: verse.to_string(),
            sura: verse.sura().sura_number(),
            ayah: verse.ayah(),
            page: verse.page().page_number(),
            juz: quarter.juz().juz_number(),
            hizb: quarter.hizb().hizb_number(),
            quarter: quarter.quarter_number(),
        }
    }

    fn to_text(&self) -> String {
        format!(
            "{}\npage: {}\njuz: {}\nhizb: {}\nquarter: {}",
            self.key, self.page, self.juz, self.hizb, self.quarter
        )
    }
}

#[derive(Debug, Serialize)]
struct PageInfo {
    page: u16,
    first: String,
    last: String,
    suras: Vec<u16>,
    juz: u16,
    quarter: Option<u16>,
}

impl PageInfo {
    fn new(page: Page<'_>) -> Self {
        Self {
            page: page.page_number(),
            first: page.first_verse().to_string(),
            last: page.last_verse().to_string(),
            suras: page.suras().iter().map(|sura| sura.sura_number()).collect(),
            juz: page.start_juz().juz_number(),
            quarter: page.quarter().map(|quarter| quarter.quarter_number()),
        }
    }

    fn to_text(&self) -> String {
        let suras: Vec<String> = self.suras.iter().map(ToString::to_string).collect();
        let quarter = self
            .quarter
            .map_or_else(|| "-".to_string(), |quarter| quarter.to_string());
        format!(
            "page {}\nverses: {}-{}\nsuras: {}\njuz: {}\nquarter: {}",
            self.page,
            self.first,
            self.last,
            suras.join(", "),
            self.juz,
            quarter
        )
    }
}

#[derive(Debug, Serialize)]
struct SuraInfo {
    sura: u16,
    verses: u16,
    makki: bool,
    besmallah: bool,
    page: u16,
    first: String,
    last: String,
}

impl SuraInfo {
    fn new(sura: Sura<'_>) -> Self {
        Self {
            sura: sura.sura_number(),
            verses: sura.number_of_verses(),
            makki: sura.is_makki(),
            besmallah: sura.starts_with_besmallah(),
            page: sura.page().page_number(),
            first: sura.first_verse().to_string(),
            last: sura.last_verse().to_string(),
        }
    }

    fn to_text(&self) -> String {
        format!(
            "sura {}\nverses: {}\nrevelation: {}\nbesmallah: {}\npage: {}",
            self.sura,
            self.verses,
            if self.makki { "makki" } else { "madani" },
            if self.besmallah { "yes" } else { "no" },
            self.page
        )
    }
}

#[derive(Debug, Serialize)]
struct JuzInfo {
    juz: u16,
    first: String,
    last: String,
    page: u16,
    hizbs: Vec<u16>,
}

impl JuzInfo {
    fn new(juz: Juz<'_>) -> Self {
        Self {
            juz: juz.juz_number(),
            first: juz.first_verse().to_string(),
            last: juz.last_verse().to_string(),
            page: juz.page().page_number(),
            hizbs: juz.hizbs().iter().map(|hizb| hizb.hizb_number()).collect(),
        }
    }

    fn to_text(&self) -> String {
        let hizbs: Vec<String> = self.hizbs.iter().map(ToString::to_string).collect();
        format!(
            "juz {}\nverses: {}-{}\npage: {}\nhizbs: {}",
            self.juz,
            self.first,
            self.last,
            self.page,
            hizbs.join(", ")
        )
    }
}

#[derive(Debug, Serialize)]
struct LastAyahInfo {
    from: String,
    scope: &'static str,
    last: String,
}

#[derive(Debug, Serialize)]
struct DecorationRow {
    verse: String,
    word: Option<u16>,
    line: u16,
    color: HighlightColor,
    rect: Rect,
}

impl DecorationRow {
    fn to_text(&self) -> String {
        let color = match self.color {
            HighlightColor::Note(color) => format!("note:{color}"),
            HighlightColor::Reading => "reading".to_string(),
            HighlightColor::Search => "search".to_string(),
            HighlightColor::Share => "share".to_string(),
            HighlightColor::Pointed => "pointed".to_string(),
        };
        let target = match self.word {
            Some(word) => format!("{} word {}", self.verse, word),
            None => self.verse.clone(),
        };
        let Rect {
            min_x,
            min_y,
            max_x,
            max_y,
        } = self.rect;
        format!("{target} line {} {color} [{min_x}, {min_y}, {max_x}, {max_y}]", self.line)
    }
}

fn run_decorate<'q>(
    quran: &'q Quran,
    args: &DecorateArgs,
    notes: &NoteService<'q>,
    granularity: FrameGranularity,
) -> Result<Vec<DecorationRow>> {
    let page = Page::new(quran, args.page)?;
    let records = read_frames(&args.frames)?;
    let frames = WordFrameCollection::from_records(quran, &records);
    if frames.is_empty() {
        warn!(path = ?args.frames, "no usable word frames");
    }

    let resolve = |keys: &[VerseKey]| -> Result<Vec<AyahNumber<'q>>> {
        keys.iter()
            .map(|key| AyahNumber::from_key(quran, *key).map_err(Into::into))
            .collect()
    };
    let highlights = QuranHighlights {
        reading_verses: resolve(&args.reading)?,
        search_verses: resolve(&args.search)?,
        share_verses: resolve(&args.share)?,
        note_verses: notes.verse_notes(),
        pointed_word: None,
    };

    let decorations = decorate_page(&highlights, page, &frames, granularity);
    Ok(decorations
        .decorations
        .iter()
        .map(|decoration| DecorationRow {
            verse: decoration.verse.to_string(),
            word: decoration.word.map(|word| word.word_number()),
            line: decoration.line,
            color: decoration.color,
            rect: decoration.rect,
        })
        .collect())
}

fn read_frames(path: &Path) -> Result<Vec<WordFrameRecord>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read frames {:?}", path))?;
    serde_json::from_str(&contents).with_context(|| format!("failed to decode frames {:?}", path))
}

async fn open_notes<'q>(
    quran: &'q Quran,
    args: &Args,
    config: &ReaderConfig,
) -> Result<NoteService<'q>> {
    let path = match &args.notes {
        Some(path) => path.clone(),
        None => config.notes_path()?,
    };
    let persistence: Arc<dyn NotePersistence> = Arc::new(FileNotePersistence::new(path)?);
    NoteService::open(quran, persistence).await
}

fn note_text(note: &Note<'_>) -> String {
    let verses = match (note.verses.first(), note.verses.last()) {
        (Some(first), Some(last)) => span(*first, *last),
        _ => String::new(),
    };
    match &note.note {
        Some(text) => format!("{} {} {} {:?}", note.id, verses, note.color, text),
        None => format!("{} {} {}", note.id, verses, note.color),
    }
}

async fn run_note<'q>(
    quran: &'q Quran,
    command: &NoteCommand,
    notes: &NoteService<'q>,
    json: bool,
) -> Result<()> {
    match command {
        NoteCommand::Add {
            from,
            to,
            color,
            text,
        } => {
            let verses = verse_range(quran, *from, *to)?;
            let mut note = notes.set_highlight(&verses, *color).await?;
            if let Some(text) = text {
                let combined = match &note.note {
                    Some(existing) => format!("{existing}\n\n{text}"),
                    None => text.clone(),
                };
                note = notes.update_note(note.id, Some(combined), *color).await?;
            }
            emit(json, &note.to_record(), |_| note_text(&note))
        }
        NoteCommand::List => {
            let all = notes.notes();
            let records: Vec<NoteRecord> = all.iter().map(Note::to_record).collect();
            emit(json, &records, |_| {
                all.iter().map(note_text).collect::<Vec<_>>().join("\n")
            })
        }
        NoteCommand::Remove { from, to, yes } => {
            let verses = verse_range(quran, *from, *to)?;
            let request = notes.removal_request(&verses);
            notes.remove(&request, *yes).await?;
            let removed: Vec<String> = request.notes.iter().map(|note| note.id.to_string()).collect();
            emit(json, &removed, |removed| format!("removed {} notes", removed.len()))
        }
    }
}
