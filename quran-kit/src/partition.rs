//! The juz / hizb / quarter partition. One juz holds two hizbs, one hizb
//! holds four quarters, and every boundary comes from the quarter anchors.

use crate::navigation::array;
use crate::{AyahNumber, Navigatable, Page, Quran, QuranError};

fn quarter_anchor(quran: &Quran, quarter_index: usize) -> AyahNumber<'_> {
    AyahNumber::unchecked(quran, quran.raw().quarters[quarter_index])
}

fn last_verse_before<'q>(quran: &'q Quran, next_first: Option<AyahNumber<'q>>) -> AyahNumber<'q> {
    next_first
        .and_then(|first| first.previous())
        .unwrap_or_else(|| quran.last_verse())
}

#[derive(Clone, Copy)]
pub struct Juz<'q> {
    quran: &'q Quran,
    number: u16,
}

numbered_entity!(Juz, "Juz");

impl<'q> Juz<'q> {
    pub fn new(quran: &'q Quran, number: u16) -> Result<Self, QuranError> {
        if (1..=quran.number_of_juzs()).contains(&number) {
            Ok(Self::unchecked(quran, number))
        } else {
            Err(QuranError::InvalidJuz(number))
        }
    }

    pub(crate) fn unchecked(quran: &'q Quran, number: u16) -> Self {
        Self { quran, number }
    }

    pub fn quran(&self) -> &'q Quran {
        self.quran
    }

    pub fn juz_number(&self) -> u16 {
        self.number
    }

    pub fn first_verse(&self) -> AyahNumber<'q> {
        quarter_anchor(self.quran, usize::from(self.number - 1) * 8)
    }

    pub fn last_verse(&self) -> AyahNumber<'q> {
        last_verse_before(self.quran, self.next().map(|juz| juz.first_verse()))
    }

    pub fn verses(&self) -> Vec<AyahNumber<'q>> {
        array(self.first_verse(), self.last_verse())
    }

    pub fn page(&self) -> Page<'q> {
        Page::unchecked(self.quran, self.quran.juz_pages()[usize::from(self.number - 1)])
    }

    pub fn hizbs(&self) -> Vec<Hizb<'q>> {
        let first = (self.number - 1) * 2 + 1;
        (first..first + 2)
            .map(|number| Hizb::unchecked(self.quran, number))
            .collect()
    }

    pub fn quarters(&self) -> Vec<Quarter<'q>> {
        let first = (self.number - 1) * 8 + 1;
        (first..first + 8)
            .map(|number| Quarter::unchecked(self.quran, number))
            .collect()
    }
}

impl Navigatable for Juz<'_> {
    fn next(&self) -> Option<Self> {
        Juz::new(self.quran, self.number + 1).ok()
    }

    fn previous(&self) -> Option<Self> {
        Juz::new(self.quran, self.number - 1).ok()
    }
}

#[derive(Clone, Copy)]
pub struct Hizb<'q> {
    quran: &'q Quran,
    number: u16,
}

numbered_entity!(Hizb, "Hizb");

impl<'q> Hizb<'q> {
    pub fn new(quran: &'q Quran, number: u16) -> Result<Self, QuranError> {
        if (1..=quran.number_of_hizbs()).contains(&number) {
            Ok(Self::unchecked(quran, number))
        } else {
            Err(QuranError::InvalidHizb(number))
        }
    }

    pub(crate) fn unchecked(quran: &'q Quran, number: u16) -> Self {
        Self { quran, number }
    }

    pub fn hizb_number(&self) -> u16 {
        self.number
    }

    pub fn juz(&self) -> Juz<'q> {
        Juz::unchecked(self.quran, (self.number - 1) / 2 + 1)
    }

    pub fn first_verse(&self) -> AyahNumber<'q> {
        quarter_anchor(self.quran, usize::from(self.number - 1) * 4)
    }

    pub fn last_verse(&self) -> AyahNumber<'q> {
        last_verse_before(self.quran, self.next().map(|hizb| hizb.first_verse()))
    }

    pub fn verses(&self) -> Vec<AyahNumber<'q>> {
        array(self.first_verse(), self.last_verse())
    }

    pub fn page(&self) -> Page<'q> {
        self.quarters()[0].page()
    }

    pub fn quarters(&self) -> Vec<Quarter<'q>> {
        let first = (self.number - 1) * 4 + 1;
        (first..first + 4)
            .map(|number| Quarter::unchecked(self.quran, number))
            .collect()
    }
}

impl Navigatable for Hizb<'_> {
    fn next(&self) -> Option<Self> {
        Hizb::new(self.quran, self.number + 1).ok()
    }

    fn previous(&self) -> Option<Self> {
        Hizb::new(self.quran, self.number - 1).ok()
    }
}

#[derive(Clone, Copy)]
pub struct Quarter<'q> {
    quran: &'q Quran,
    number: u16,
}

numbered_entity!(Quarter, "Quarter");

impl<'q> Quarter<'q> {
    pub fn new(quran: &'q Quran, number: u16) -> Result<Self, QuranError> {
        if (1..=quran.number_of_quarters()).contains(&number) {
            Ok(Self::unchecked(quran, number))
        } else {
            Err(QuranError::InvalidQuarter(number))
        }
    }

    pub(crate) fn unchecked(quran: &'q Quran, number: u16) -> Self {
        Self { quran, number }
    }

    pub fn quarter_number(&self) -> u16 {
        self.number
    }

    pub fn hizb(&self) -> Hizb<'q> {
        Hizb::unchecked(self.quran, (self.number - 1) / 4 + 1)
    }

    pub fn juz(&self) -> Juz<'q> {
        Juz::unchecked(self.quran, (self.number - 1) / 8 + 1)
    }

    pub fn first_verse(&self) -> AyahNumber<'q> {
        quarter_anchor(self.quran, usize::from(self.number - 1))
    }

    pub fn last_verse(&self) -> AyahNumber<'q> {
        last_verse_before(self.quran, self.next().map(|quarter| quarter.first_verse()))
    }

    pub fn verses(&self) -> Vec<AyahNumber<'q>> {
        array(self.first_verse(), self.last_verse())
    }

    pub fn page(&self) -> Page<'q> {
        Page::unchecked(
            self.quran,
            self.quran.quarter_pages()[usize::from(self.number - 1)],
        )
    }
}

impl Navigatable for Quarter<'_> {
    fn next(&self) -> Option<Self> {
        Quarter::new(self.quran, self.number + 1).ok()
    }

    fn previous(&self) -> Option<Self> {
        Quarter::new(self.quran, self.number - 1).ok()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Navigatable, Quran, VerseKey};

    #[test]
    fn juz_boundaries_follow_quarter_anchors() {
        let quran = Quran::hafs_madani_1405();
        let second = quran.juz(2).unwrap();
        assert_eq!(second.first_verse().key(), VerseKey::new(2, 142));
        assert_eq!(second.last_verse().key(), VerseKey::new(2, 252));
        assert_eq!(second.page().page_number(), 22);
        let last = quran.juz(30).unwrap();
        assert_eq!(last.first_verse().key(), VerseKey::new(78, 1));
        assert_eq!(last.last_verse(), quran.last_verse());
        assert_eq!(last.page().page_number(), 582);
    }

    #[test]
    fn parents_and_children_agree() {
        let quran = Quran::hafs_madani_1405();
        for quarter in quran.quarters() {
            assert!(quarter.hizb().quarters().contains(&quarter));
            assert!(quarter.juz().quarters().contains(&quarter));
            assert_eq!(quarter.hizb().juz(), quarter.juz());
        }
        for hizb in quran.hizbs() {
            assert!(hizb.juz().hizbs().contains(&hizb));
            assert_eq!(hizb.page(), hizb.first_verse().page());
        }
    }

    #[test]
    fn partition_counts_are_consistent() {
        let quran = Quran::hafs_madani_1405();
        assert_eq!(quran.quarters().len(), quran.hizbs().len() * 4);
        assert_eq!(quran.quarters().len(), quran.juzs().len() * 8);
        assert!(quran.quarter(240).unwrap().next().is_none());
        assert!(quran.hizb(1).unwrap().previous().is_none());
    }
}
