//! Navigational model of the Quran text: suras, pages, juzs, hizbs, quarters,
//! verses and words of a print edition, with the lookups that tie them
//! together.

macro_rules! numbered_entity {
    ($name:ident, $label:literal) => {
        impl PartialEq for $name<'_> {
            fn eq(&self, other: &Self) -> bool {
                self.number == other.number
            }
        }

        impl Eq for $name<'_> {}

        impl PartialOrd for $name<'_> {
            fn partial_cmp(&self, other: &Self) -> Option<::std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name<'_> {
            fn cmp(&self, other: &Self) -> ::std::cmp::Ordering {
                self.number.cmp(&other.number)
            }
        }

        impl ::std::hash::Hash for $name<'_> {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                ::std::hash::Hash::hash(&self.number, state);
            }
        }

        impl ::std::fmt::Debug for $name<'_> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, concat!($label, "({})"), self.number)
            }
        }

        impl ::std::fmt::Display for $name<'_> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, concat!($label, " {}"), self.number)
            }
        }
    };
}

mod ayah;
mod data;
mod error;
mod key;
pub mod navigation;
mod page;
mod partition;
mod quran;
mod raw;
mod reading;
pub mod search;
mod sura;

pub use ayah::{compare_ayahs, AyahNumber, Word};
pub use error::QuranError;
pub use key::VerseKey;
pub use navigation::Navigatable;
pub use page::Page;
pub use partition::{Hizb, Juz, Quarter};
pub use quran::Quran;
pub use raw::RawReadingData;
pub use reading::Reading;
pub use sura::Sura;
