use serde::{Deserialize, Serialize};

use crate::{QuranError, VerseKey};

/// Numbering tables of a single print edition.
///
/// Tables are trusted input. [`RawReadingData::check_shape`] only verifies
/// lengths and that every anchor points at an existing verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReadingData {
    pub start_page_of_sura: Vec<u16>,
    pub start_sura_of_page: Vec<u16>,
    pub start_ayah_of_page: Vec<u16>,
    pub number_of_ayahs_in_sura: Vec<u16>,
    pub is_makki: Vec<bool>,
    pub quarters: Vec<VerseKey>,
}

impl RawReadingData {
    pub fn from_json_str(payload: &str) -> Result<Self, QuranError> {
        serde_json::from_str(payload).map_err(|err| QuranError::MalformedTables(err.to_string()))
    }

    pub fn check_shape(&self) -> Result<(), QuranError> {
        let suras = self.number_of_ayahs_in_sura.len();
        let pages = self.start_sura_of_page.len();
        let malformed = |reason: String| Err(QuranError::MalformedTables(reason));

        if suras == 0 || pages == 0 || self.quarters.is_empty() {
            return malformed("suras, pages and quarters must not be empty".into());
        }
        if suras > usize::from(u16::MAX) || pages > usize::from(u16::MAX) {
            return malformed("too many suras or pages".into());
        }
        if self.start_page_of_sura.len() != suras || self.is_makki.len() != suras {
            return malformed(format!(
                "sura tables disagree: {} counts, {} start pages, {} makki flags",
                suras,
                self.start_page_of_sura.len(),
                self.is_makki.len()
            ));
        }
        if self.start_ayah_of_page.len() != pages {
            return malformed(format!(
                "page tables disagree: {} start suras, {} start ayahs",
                pages,
                self.start_ayah_of_page.len()
            ));
        }
        if self.quarters.len() % 8 != 0 {
            return malformed(format!(
                "{} quarters do not divide into juzs of 8",
                self.quarters.len()
            ));
        }
        if self.number_of_ayahs_in_sura.contains(&0) {
            return malformed("every sura needs at least one ayah".into());
        }
        if let Some(page) = self
            .start_page_of_sura
            .iter()
            .find(|&&page| page == 0 || usize::from(page) > pages)
        {
            return malformed(format!("sura start page {page} is outside 1..={pages}"));
        }

        let page_starts = self
            .start_sura_of_page
            .iter()
            .zip(&self.start_ayah_of_page)
            .map(|(&sura, &ayah)| VerseKey::new(sura, ayah));
        for key in page_starts.chain(self.quarters.iter().copied()) {
            if !self.contains(key) {
                return malformed(format!("anchor {key} is not a verse of this edition"));
            }
        }
        Ok(())
    }

    pub(crate) fn contains(&self, key: VerseKey) -> bool {
        key.sura >= 1
            && key.ayah >= 1
            && self
                .number_of_ayahs_in_sura
                .get(usize::from(key.sura) - 1)
                .is_some_and(|&count| key.ayah <= count)
    }
}
