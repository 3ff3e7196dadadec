mod hafs_1405;

use crate::{RawReadingData, VerseKey};

pub(crate) fn hafs_madani_1405() -> RawReadingData {
    RawReadingData {
        start_page_of_sura: hafs_1405::START_PAGE_OF_SURA.to_vec(),
        start_sura_of_page: hafs_1405::START_SURA_OF_PAGE.to_vec(),
        start_ayah_of_page: hafs_1405::START_AYAH_OF_PAGE.to_vec(),
        number_of_ayahs_in_sura: hafs_1405::NUMBER_OF_AYAHS_IN_SURA.to_vec(),
        is_makki: hafs_1405::IS_MAKKI.to_vec(),
        quarters: hafs_1405::QUARTERS
            .iter()
            .map(|&(sura, ayah)| VerseKey::new(sura, ayah))
            .collect(),
    }
}
