use crate::navigation::array;
use crate::search::{binary_search_first_position, binary_search_index};
use crate::{AyahNumber, Juz, Navigatable, Quarter, Quran, QuranError, Sura};

#[derive(Clone, Copy)]
pub struct Page<'q> {
    quran: &'q Quran,
    number: u16,
}

numbered_entity!(Page, "Page");

impl<'q> Page<'q> {
    pub fn new(quran: &'q Quran, number: u16) -> Result<Self, QuranError> {
        if (1..=quran.number_of_pages()).contains(&number) {
            Ok(Self::unchecked(quran, number))
        } else {
            Err(QuranError::InvalidPage(number))
        }
    }

    pub(crate) fn unchecked(quran: &'q Quran, number: u16) -> Self {
        Self { quran, number }
    }

    pub fn quran(&self) -> &'q Quran {
        self.quran
    }

    pub fn page_number(&self) -> u16 {
        self.number
    }

    fn index(&self) -> usize {
        usize::from(self.number) - 1
    }

    pub fn start_sura(&self) -> Sura<'q> {
        Sura::unchecked(self.quran, self.quran.raw().start_sura_of_page[self.index()])
    }

    pub fn first_verse(&self) -> AyahNumber<'q> {
        AyahNumber::unchecked(self.quran, self.quran.page_first_verses()[self.index()])
    }

    pub fn last_verse(&self) -> AyahNumber<'q> {
        self.next()
            .and_then(|next| next.first_verse().previous())
            .unwrap_or_else(|| self.quran.last_verse())
    }

    pub fn verses(&self) -> Vec<AyahNumber<'q>> {
        array(self.first_verse(), self.last_verse())
    }

    /// Suras with at least one verse on this page.
    pub fn suras(&self) -> Vec<Sura<'q>> {
        array(self.start_sura(), self.last_verse().sura())
    }

    /// The juz that starts on or before this page.
    pub fn start_juz(&self) -> Juz<'q> {
        let position = binary_search_first_position(self.quran.juz_pages(), |&start| {
            start <= self.number
        });
        Juz::unchecked(self.quran, position as u16 + 1)
    }

    /// The first quarter whose opening verse sits on this page, if any.
    pub fn quarter(&self) -> Option<Quarter<'q>> {
        let pages = self.quran.quarter_pages();
        let position = binary_search_index(pages, |&start| start < self.number);
        pages
            .get(position)
            .filter(|&&start| start == self.number)
            .map(|_| Quarter::unchecked(self.quran, position as u16 + 1))
    }
}

impl Navigatable for Page<'_> {
    fn next(&self) -> Option<Self> {
        Page::new(self.quran, self.number + 1).ok()
    }

    fn previous(&self) -> Option<Self> {
        Page::new(self.quran, self.number - 1).ok()
    }
}
