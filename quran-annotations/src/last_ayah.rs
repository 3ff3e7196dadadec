//! Where audio playback stops when the user asks for "until the end".

use quran_kit::AyahNumber;
use serde::{Deserialize, Serialize};

pub trait LastAyahFinder: Send + Sync {
    fn find_last_ayah<'q>(&self, verse: AyahNumber<'q>) -> AyahNumber<'q>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SuraBasedLastAyahFinder;

impl LastAyahFinder for SuraBasedLastAyahFinder {
    fn find_last_ayah<'q>(&self, verse: AyahNumber<'q>) -> AyahNumber<'q> {
        verse.sura().last_verse()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PageBasedLastAyahFinder;

impl LastAyahFinder for PageBasedLastAyahFinder {
    fn find_last_ayah<'q>(&self, verse: AyahNumber<'q>) -> AyahNumber<'q> {
        verse.page().last_verse()
    }
}

/// Ends at the last verse of the juz that starts on or before the verse's page.
#[derive(Debug, Clone, Copy, Default)]
pub struct JuzBasedLastAyahFinder;

impl LastAyahFinder for JuzBasedLastAyahFinder {
    fn find_last_ayah<'q>(&self, verse: AyahNumber<'q>) -> AyahNumber<'q> {
        verse.page().start_juz().last_verse()
    }
}

/// Audio playback range preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioEnd {
    Sura,
    Page,
    #[default]
    Juz,
}

impl AudioEnd {
    pub const ALL: [AudioEnd; 3] = [AudioEnd::Sura, AudioEnd::Page, AudioEnd::Juz];

    pub fn finder(self) -> Box<dyn LastAyahFinder> {
        match self {
            AudioEnd::Sura => Box::new(SuraBasedLastAyahFinder),
            AudioEnd::Page => Box::new(PageBasedLastAyahFinder),
            AudioEnd::Juz => Box::new(JuzBasedLastAyahFinder),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AudioEnd::Sura => "sura",
            AudioEnd::Page => "page",
            AudioEnd::Juz => "juz",
        }
    }
}

impl std::str::FromStr for AudioEnd {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AudioEnd::ALL
            .into_iter()
            .find(|end| end.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown audio end `{s}` (expected sura, page or juz)"))
    }
}
