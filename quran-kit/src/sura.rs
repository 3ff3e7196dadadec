use crate::navigation::array;
use crate::{AyahNumber, Navigatable, Page, Quran, QuranError, VerseKey};

#[derive(Clone, Copy)]
pub struct Sura<'q> {
    quran: &'q Quran,
    number: u16,
}

numbered_entity!(Sura, "Sura");

impl<'q> Sura<'q> {
    pub fn new(quran: &'q Quran, number: u16) -> Result<Self, QuranError> {
        if (1..=quran.number_of_suras()).contains(&number) {
            Ok(Self::unchecked(quran, number))
        } else {
            Err(QuranError::InvalidSura(number))
        }
    }

    pub(crate) fn unchecked(quran: &'q Quran, number: u16) -> Self {
        Self { quran, number }
    }

    pub fn quran(&self) -> &'q Quran {
        self.quran
    }

    pub fn sura_number(&self) -> u16 {
        self.number
    }

    fn index(&self) -> usize {
        usize::from(self.number) - 1
    }

    pub fn number_of_verses(&self) -> u16 {
        self.quran.raw().number_of_ayahs_in_sura[self.index()]
    }

    pub fn is_makki(&self) -> bool {
        self.quran.raw().is_makki[self.index()]
    }

    /// Whether recitation opens with the besmallah before the first ayah.
    ///
    /// Al-Fatiha carries it as its own first ayah and At-Tawbah has none.
    pub fn starts_with_besmallah(&self) -> bool {
        self.number != 1 && self.number != 9
    }

    pub fn first_verse(&self) -> AyahNumber<'q> {
        AyahNumber::unchecked(self.quran, VerseKey::new(self.number, 1))
    }

    pub fn last_verse(&self) -> AyahNumber<'q> {
        AyahNumber::unchecked(
            self.quran,
            VerseKey::new(self.number, self.number_of_verses()),
        )
    }

    pub fn verses(&self) -> Vec<AyahNumber<'q>> {
        array(self.first_verse(), self.last_verse())
    }

    /// The page this sura starts on.
    pub fn page(&self) -> Page<'q> {
        Page::unchecked(self.quran, self.quran.raw().start_page_of_sura[self.index()])
    }
}

impl Navigatable for Sura<'_> {
    fn next(&self) -> Option<Self> {
        Sura::new(self.quran, self.number + 1).ok()
    }

    fn previous(&self) -> Option<Self> {
        Sura::new(self.quran, self.number - 1).ok()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Navigatable, Quran};

    #[test]
    fn besmallah_is_skipped_for_opening_and_repentance() {
        let quran = Quran::hafs_madani_1405();
        assert!(!quran.sura(1).unwrap().starts_with_besmallah());
        assert!(quran.sura(2).unwrap().starts_with_besmallah());
        assert!(!quran.sura(9).unwrap().starts_with_besmallah());
        assert!(quran.sura(114).unwrap().starts_with_besmallah());
    }

    #[test]
    fn sura_bounds_and_pages() {
        let quran = Quran::hafs_madani_1405();
        let baqarah = quran.sura(2).unwrap();
        assert_eq!(baqarah.number_of_verses(), 286);
        assert_eq!(baqarah.page().page_number(), 2);
        assert_eq!(baqarah.first_verse().ayah(), 1);
        assert_eq!(baqarah.last_verse().ayah(), 286);
        assert_eq!(baqarah.verses().len(), 286);
        assert!(!baqarah.is_makki());
        assert!(quran.sura(1).unwrap().is_makki());
        assert_eq!(quran.sura(114).unwrap().page().page_number(), 604);
    }

    #[test]
    fn every_sura_starts_on_the_page_of_its_first_verse() {
        let quran = Quran::hafs_madani_1405();
        for sura in quran.suras() {
            assert_eq!(sura.page(), sura.first_verse().page(), "{sura:?}");
        }
    }

    #[test]
    fn verse_counts_add_up() {
        let quran = Quran::hafs_madani_1405();
        let total: u32 = quran
            .suras()
            .iter()
            .map(|sura| u32::from(sura.number_of_verses()))
            .sum();
        assert_eq!(total, 6236);
    }

    #[test]
    fn neighbours_stop_at_the_extremes() {
        let quran = Quran::hafs_madani_1405();
        assert!(quran.sura(1).unwrap().previous().is_none());
        assert!(quran.sura(114).unwrap().next().is_none());
        assert_eq!(
            quran.sura(1).unwrap().next().map(|s| s.sura_number()),
            Some(2)
        );
    }
}
