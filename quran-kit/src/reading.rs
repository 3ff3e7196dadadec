use serde::{Deserialize, Serialize};

use crate::Quran;

/// Print editions shipped with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Reading {
    #[default]
    #[serde(rename = "hafs_madani_1405")]
    HafsMadani1405,
}

impl Reading {
    pub const ALL: [Reading; 1] = [Reading::HafsMadani1405];

    pub fn quran(self) -> &'static Quran {
        match self {
            Reading::HafsMadani1405 => Quran::hafs_madani_1405(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_the_same_instance_every_time() {
        let first = Reading::HafsMadani1405.quran();
        let second = Reading::default().quran();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn serializes_with_edition_name() {
        let encoded = serde_json::to_string(&Reading::HafsMadani1405).unwrap();
        assert_eq!(encoded, "\"hafs_madani_1405\"");
        let decoded: Reading = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, Reading::HafsMadani1405);
    }
}
