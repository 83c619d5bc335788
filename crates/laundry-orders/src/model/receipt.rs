use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Default display width for receipt numbers.
pub const DEFAULT_RECEIPT_WIDTH: usize = 4;

/// A receipt number handed out by the sequence allocator.
///
/// Stored as a plain integer. The `Display` form is zero-padded to
/// [`DEFAULT_RECEIPT_WIDTH`] and never truncated: `41` shows as `0041`, `123456` as `123456`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptNumber(pub u64);

impl ReceiptNumber {
    pub fn padded(self, width: usize) -> String {
        format!("{:0width$}", self.0, width = width)
    }
}

impl From<u64> for ReceiptNumber {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

impl Display for ReceiptNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:0width$}", self.0, width = DEFAULT_RECEIPT_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_without_truncating() {
        assert_eq!(ReceiptNumber(41).to_string(), "0041");
        assert_eq!(ReceiptNumber(0).to_string(), "0000");
        assert_eq!(ReceiptNumber(123_456).to_string(), "123456");
        assert_eq!(ReceiptNumber(7).padded(6), "000007");
    }
}
