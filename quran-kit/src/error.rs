use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuranError {
    #[error("sura {0} does not exist")]
    InvalidSura(u16),
    #[error("ayah {ayah} is out of range for sura {sura}")]
    InvalidAyah { sura: u16, ayah: u16 },
    #[error("page {0} does not exist")]
    InvalidPage(u16),
    #[error("juz {0} does not exist")]
    InvalidJuz(u16),
    #[error("hizb {0} does not exist")]
    InvalidHizb(u16),
    #[error("quarter {0} does not exist")]
    InvalidQuarter(u16),
    #[error("word numbers start at 1, got {0}")]
    InvalidWord(u16),
    #[error("malformed numbering tables: {0}")]
    MalformedTables(String),
    #[error("cannot parse verse key {0:?}, expected `sura:ayah`")]
    ParseVerseKey(String),
}
