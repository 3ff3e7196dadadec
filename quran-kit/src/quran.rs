use std::fmt;

use once_cell::sync::{Lazy, OnceCell};
use tracing::debug;

use crate::search::binary_search_first_position;
use crate::{
    data, AyahNumber, Hizb, Juz, Page, Quarter, QuranError, RawReadingData, Sura, VerseKey,
};

static HAFS_MADANI_1405: Lazy<Quran> = Lazy::new(|| {
    Quran::new(data::hafs_madani_1405()).expect("built-in Hafs 1405 tables are well formed")
});

/// One print edition of the text and the root of every entity.
///
/// Entities are `(&Quran, number)` handles. Everything they expose is derived
/// from the raw tables or from the arrays memoized here on first access.
pub struct Quran {
    raw: RawReadingData,
    verses: OnceCell<Vec<VerseKey>>,
    page_first_verses: OnceCell<Vec<VerseKey>>,
    quarter_pages: OnceCell<Vec<u16>>,
    juz_pages: OnceCell<Vec<u16>>,
}

impl fmt::Debug for Quran {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quran")
            .field("suras", &self.number_of_suras())
            .field("pages", &self.number_of_pages())
            .field("quarters", &self.number_of_quarters())
            .finish()
    }
}

impl Quran {
    pub fn new(raw: RawReadingData) -> Result<Self, QuranError> {
        raw.check_shape()?;
        let first_page = VerseKey::new(raw.start_sura_of_page[0], raw.start_ayah_of_page[0]);
        if first_page != VerseKey::new(1, 1) {
            return Err(QuranError::MalformedTables(format!(
                "page 1 starts at {first_page} instead of 1:1"
            )));
        }
        debug!(
            suras = raw.number_of_ayahs_in_sura.len(),
            pages = raw.start_sura_of_page.len(),
            quarters = raw.quarters.len(),
            "loaded numbering tables"
        );
        Ok(Self {
            raw,
            verses: OnceCell::new(),
            page_first_verses: OnceCell::new(),
            quarter_pages: OnceCell::new(),
            juz_pages: OnceCell::new(),
        })
    }

    /// The 604-page Madani print of the Hafs reading.
    pub fn hafs_madani_1405() -> &'static Quran {
        &HAFS_MADANI_1405
    }

    pub fn raw(&self) -> &RawReadingData {
        &self.raw
    }

    pub fn number_of_suras(&self) -> u16 {
        self.raw.number_of_ayahs_in_sura.len() as u16
    }

    pub fn number_of_pages(&self) -> u16 {
        self.raw.start_sura_of_page.len() as u16
    }

    pub fn number_of_quarters(&self) -> u16 {
        self.raw.quarters.len() as u16
    }

    pub fn number_of_hizbs(&self) -> u16 {
        self.number_of_quarters() / 4
    }

    pub fn number_of_juzs(&self) -> u16 {
        self.number_of_quarters() / 8
    }

    pub fn suras(&self) -> Vec<Sura<'_>> {
        (1..=self.number_of_suras())
            .map(|number| Sura::unchecked(self, number))
            .collect()
    }

    pub fn pages(&self) -> Vec<Page<'_>> {
        (1..=self.number_of_pages())
            .map(|number| Page::unchecked(self, number))
            .collect()
    }

    pub fn juzs(&self) -> Vec<Juz<'_>> {
        (1..=self.number_of_juzs())
            .map(|number| Juz::unchecked(self, number))
            .collect()
    }

    pub fn hizbs(&self) -> Vec<Hizb<'_>> {
        (1..=self.number_of_hizbs())
            .map(|number| Hizb::unchecked(self, number))
            .collect()
    }

    pub fn quarters(&self) -> Vec<Quarter<'_>> {
        (1..=self.number_of_quarters())
            .map(|number| Quarter::unchecked(self, number))
            .collect()
    }

    /// Every verse in reading order.
    pub fn verses(&self) -> Vec<AyahNumber<'_>> {
        self.verse_keys()
            .iter()
            .map(|&key| AyahNumber::unchecked(self, key))
            .collect()
    }

    pub fn first_verse(&self) -> AyahNumber<'_> {
        AyahNumber::unchecked(self, VerseKey::new(1, 1))
    }

    pub fn last_verse(&self) -> AyahNumber<'_> {
        let sura = self.number_of_suras();
        let ayah = self.raw.number_of_ayahs_in_sura[usize::from(sura) - 1];
        AyahNumber::unchecked(self, VerseKey::new(sura, ayah))
    }

    pub fn sura(&self, number: u16) -> Option<Sura<'_>> {
        Sura::new(self, number).ok()
    }

    pub fn page(&self, number: u16) -> Option<Page<'_>> {
        Page::new(self, number).ok()
    }

    pub fn juz(&self, number: u16) -> Option<Juz<'_>> {
        Juz::new(self, number).ok()
    }

    pub fn hizb(&self, number: u16) -> Option<Hizb<'_>> {
        Hizb::new(self, number).ok()
    }

    pub fn quarter(&self, number: u16) -> Option<Quarter<'_>> {
        Quarter::new(self, number).ok()
    }

    /// Non-failing verse factory: `None` outside the edition.
    pub fn verse(&self, sura: u16, ayah: u16) -> Option<AyahNumber<'_>> {
        AyahNumber::new(self, sura, ayah).ok()
    }

    pub fn verse_for_key(&self, key: VerseKey) -> Option<AyahNumber<'_>> {
        self.raw
            .contains(key)
            .then(|| AyahNumber::unchecked(self, key))
    }

    pub(crate) fn verse_keys(&self) -> &[VerseKey] {
        self.verses.get_or_init(|| {
            self.raw
                .number_of_ayahs_in_sura
                .iter()
                .zip(1u16..)
                .flat_map(|(&count, sura)| (1..=count).map(move |ayah| VerseKey::new(sura, ayah)))
                .collect()
        })
    }

    pub(crate) fn page_first_verses(&self) -> &[VerseKey] {
        self.page_first_verses.get_or_init(|| {
            self.raw
                .start_sura_of_page
                .iter()
                .zip(&self.raw.start_ayah_of_page)
                .map(|(&sura, &ayah)| VerseKey::new(sura, ayah))
                .collect()
        })
    }

    pub(crate) fn quarter_pages(&self) -> &[u16] {
        self.quarter_pages.get_or_init(|| {
            self.raw
                .quarters
                .iter()
                .map(|&key| self.page_number_of(key))
                .collect()
        })
    }

    pub(crate) fn juz_pages(&self) -> &[u16] {
        self.juz_pages
            .get_or_init(|| self.quarter_pages().iter().step_by(8).copied().collect())
    }

    pub(crate) fn page_number_of(&self, key: VerseKey) -> u16 {
        let position = binary_search_first_position(self.page_first_verses(), |first| *first <= key);
        position as u16 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Navigatable;

    /// Three suras (3, 5 and 4 ayahs) over four pages and one juz.
    fn tiny_quran() -> Quran {
        let key = VerseKey::new;
        Quran::new(RawReadingData {
            start_page_of_sura: vec![1, 2, 4],
            start_sura_of_page: vec![1, 2, 2, 3],
            start_ayah_of_page: vec![1, 1, 4, 1],
            number_of_ayahs_in_sura: vec![3, 5, 4],
            is_makki: vec![true, false, true],
            quarters: vec![
                key(1, 1),
                key(1, 3),
                key(2, 1),
                key(2, 2),
                key(2, 4),
                key(3, 1),
                key(3, 2),
                key(3, 3),
            ],
        })
        .unwrap()
    }

    #[test]
    fn hafs_collections_have_expected_sizes() {
        let quran = Quran::hafs_madani_1405();
        assert_eq!(quran.suras().len(), 114);
        assert_eq!(quran.pages().len(), 604);
        assert_eq!(quran.juzs().len(), 30);
        assert_eq!(quran.hizbs().len(), 60);
        assert_eq!(quran.quarters().len(), 240);
        assert_eq!(quran.verses().len(), 6236);
    }

    #[test]
    fn collections_are_contiguous_and_one_indexed() {
        let quran = Quran::hafs_madani_1405();
        for (index, sura) in quran.suras().iter().enumerate() {
            assert_eq!(usize::from(sura.sura_number()), index + 1);
        }
        for (index, page) in quran.pages().iter().enumerate() {
            assert_eq!(usize::from(page.page_number()), index + 1);
        }
        let verses = quran.verses();
        assert_eq!(verses.first(), Some(&quran.first_verse()));
        assert_eq!(verses.last(), Some(&quran.last_verse()));
        for pair in verses.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].next(), Some(pair[1]));
        }
    }

    #[test]
    fn juz_partitions_into_hizbs_and_quarters() {
        let quran = Quran::hafs_madani_1405();
        for juz in quran.juzs() {
            let hizbs = juz.hizbs();
            assert_eq!(hizbs.len(), 2);
            let from_hizbs: Vec<_> = hizbs.iter().flat_map(|hizb| hizb.verses()).collect();
            assert_eq!(juz.verses(), from_hizbs, "juz {}", juz.juz_number());
            for hizb in hizbs {
                let quarters = hizb.quarters();
                assert_eq!(quarters.len(), 4);
                let from_quarters: Vec<_> =
                    quarters.iter().flat_map(|quarter| quarter.verses()).collect();
                assert_eq!(hizb.verses(), from_quarters, "hizb {}", hizb.hizb_number());
            }
        }
        let total: usize = quran.juzs().iter().map(|juz| juz.verses().len()).sum();
        assert_eq!(total, 6236);
    }

    #[test]
    fn rejects_first_page_not_starting_at_opening() {
        let mut raw = tiny_quran().raw().clone();
        raw.start_ayah_of_page[0] = 2;
        assert!(matches!(
            Quran::new(raw),
            Err(QuranError::MalformedTables(_))
        ));
    }

    #[test]
    fn factories_return_none_outside_edition() {
        let quran = Quran::hafs_madani_1405();
        assert!(quran.sura(0).is_none());
        assert!(quran.sura(115).is_none());
        assert!(quran.page(605).is_none());
        assert!(quran.juz(31).is_none());
        assert!(quran.hizb(61).is_none());
        assert!(quran.quarter(241).is_none());
        assert!(quran.verse(1, 8).is_none());
        assert!(quran.verse_for_key(VerseKey::new(0, 1)).is_none());
        assert!(quran.verse(114, 6).is_some());
    }

    #[test]
    fn tiny_edition_maps_verses_to_its_own_pages() {
        let quran = tiny_quran();
        assert_eq!(quran.verses().len(), 12);
        assert_eq!(quran.verse(2, 1).unwrap().page().page_number(), 2);
        assert_eq!(quran.verse(2, 5).unwrap().page().page_number(), 3);
        assert_eq!(quran.verse(3, 4).unwrap().page().page_number(), 4);
        assert_eq!(quran.number_of_juzs(), 1);
        assert_eq!(quran.juz(1).unwrap().last_verse(), quran.last_verse());
    }

    #[test]
    fn memoized_lookups_are_shared_across_threads() {
        let quran = Quran::hafs_madani_1405();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(move || {
                    quran
                        .verses()
                        .iter()
                        .map(|verse| u32::from(verse.page().page_number()))
                        .sum::<u32>()
                })
            })
            .collect();
        let sums: Vec<u32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(sums.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
