use crate::error::EntryError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Where an entry is in its lifecycle.
///
/// Variants are declared in lifecycle order, so the derived `Ord` is the forward direction:
/// `Pending < Collected < ProcessedAndPacked < Delivered`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum EntryStatus {
    #[default]
    Pending,
    Collected,
    ProcessedAndPacked,
    Delivered,
}

impl EntryStatus {
    pub const ALL: [EntryStatus; 4] = [
        EntryStatus::Pending,
        EntryStatus::Collected,
        EntryStatus::ProcessedAndPacked,
        EntryStatus::Delivered,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntryStatus::Pending => "pending",
            EntryStatus::Collected => "collected",
            EntryStatus::ProcessedAndPacked => "processedAndPacked",
            EntryStatus::Delivered => "delivered",
        }
    }
}

impl Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryStatus {
    type Err = EntryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        EntryStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == raw.trim())
            .ok_or_else(|| EntryError::InvalidStatus(format!("unknown status {raw:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_and_unknown() {
        assert_eq!(
            "processedAndPacked".parse::<EntryStatus>().unwrap(),
            EntryStatus::ProcessedAndPacked
        );
        assert!(matches!(
            "shipped".parse::<EntryStatus>(),
            Err(EntryError::InvalidStatus(_))
        ));
        // Wire values are case-sensitive.
        assert!("Delivered".parse::<EntryStatus>().is_err());
    }

    #[test]
    fn test_order_is_lifecycle_order() {
        let mut shuffled = [
            EntryStatus::Delivered,
            EntryStatus::Pending,
            EntryStatus::ProcessedAndPacked,
            EntryStatus::Collected,
        ];
        shuffled.sort();
        assert_eq!(shuffled, EntryStatus::ALL);
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&EntryStatus::ProcessedAndPacked).unwrap();
        assert_eq!(json, "\"processedAndPacked\"");
    }
}
