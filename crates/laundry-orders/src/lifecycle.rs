//! # Entry Lifecycle
//!
//! ```text
//! pending ──> collected ──> processedAndPacked ──> delivered
//!    └────────────┴──────────────┴─────────────────────┘ (forward skips allowed)
//! ```
//!
//! Entering a state stamps its date once:
//!
//! | Target | Date field |
//! |---|---|
//! | `collected` | `pickup_date` |
//! | `processedAndPacked` | `processed_and_packed_date` |
//! | `delivered` | `delivery_date` |
//!
//! A date that is already set is never overwritten or cleared, skipped states are not
//! back-filled, and moving backwards is rejected.

use crate::error::EntryError;
use crate::model::{
    Charges, CustomerRef, Entry, EntryStatus, LineItem, NewEntry, NewEntryRequest,
    PickupAndDelivery, ReceiptNumber,
};
use chrono::{DateTime, Utc};

/// Parses a wire status value, rejecting unknown ones with [`EntryError::InvalidStatus`].
pub fn parse_status(raw: &str) -> Result<EntryStatus, EntryError> {
    raw.parse()
}

/// Returns `entry` moved to `status`, with the target's date stamped at `now` if unset.
///
/// Re-applying the current status is a no-op. The input is left untouched on error.
pub fn apply_status(
    entry: &Entry,
    status: EntryStatus,
    now: DateTime<Utc>,
) -> Result<Entry, EntryError> {
    if status < entry.status {
        return Err(EntryError::InvalidStatus(format!(
            "{} cannot move back from {} to {}",
            entry.id, entry.status, status
        )));
    }

    let mut next = entry.clone();
    next.status = status;
    let logistics = &mut next.pickup_and_delivery;
    let slot = match status {
        EntryStatus::Pending => None,
        EntryStatus::Collected => Some(&mut logistics.pickup_date),
        EntryStatus::ProcessedAndPacked => Some(&mut logistics.processed_and_packed_date),
        EntryStatus::Delivered => Some(&mut logistics.delivery_date),
    };
    if let Some(date) = slot {
        date.get_or_insert(now);
    }
    Ok(next)
}

/// Builds the insert payload for a new entry: `pending`, visible, taxes defaulted to zero.
pub fn initial_entry(
    request: NewEntryRequest,
    receipt_no: ReceiptNumber,
) -> Result<NewEntry, EntryError> {
    let entry = assemble(request, receipt_no)?;
    entry.validate()?;
    Ok(entry)
}

/// Runs every check [`initial_entry`] would, without a receipt number.
///
/// A request that passes here can only fail later on storage errors, so callers run it
/// before reserving a number.
pub fn check_creation_request(request: &NewEntryRequest) -> Result<(), EntryError> {
    // Validation never looks at the receipt number.
    assemble(request.clone(), ReceiptNumber(0))?.validate()
}

fn assemble(request: NewEntryRequest, receipt_no: ReceiptNumber) -> Result<NewEntry, EntryError> {
    let NewEntryRequest {
        customer,
        products,
        charges,
        pickup_address,
        delivery_address,
        pickup_type,
        delivery_type,
        expected_delivery_date,
    } = request;

    if customer.name.trim().is_empty() {
        return Err(EntryError::ValidationFailed("customer name is required".into()));
    }
    if customer.id.trim().is_empty() {
        return Err(EntryError::ValidationFailed("customer id is required".into()));
    }
    let expected_delivery_date = expected_delivery_date.ok_or_else(|| {
        EntryError::ValidationFailed("expectedDeliveryDate is required".into())
    })?;

    Ok(NewEntry {
        customer: CustomerRef {
            id: customer.id.trim().to_string(),
            name: customer.name.trim().to_string(),
            phone: customer.phone,
        },
        receipt_no,
        status: EntryStatus::Pending,
        visible: true,
        products: products.into_iter().map(LineItem::from).collect(),
        charges: Charges::from(charges),
        pickup_and_delivery: PickupAndDelivery {
            pickup_address,
            delivery_address,
            pickup_type,
            delivery_type,
            pickup_date: None,
            processed_and_packed_date: None,
            expected_delivery_date,
            delivery_date: None,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChargesRequest, EntryId, HandlingType, LineItemRequest};
    use chrono::{TimeDelta, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 5, 0, 0).unwrap()
    }

    fn request() -> NewEntryRequest {
        NewEntryRequest {
            customer: CustomerRef {
                id: "cust_7".into(),
                name: " Meera Iyer ".into(),
                phone: None,
            },
            products: vec![LineItemRequest {
                product_name: "Silk saree".into(),
                quantity: 1,
                unit_price: 250.0,
                amount: 250.0,
                tax: None,
            }],
            charges: ChargesRequest {
                subtotal: 250.0,
                tax_amount: None,
                total_amount: 250.0,
            },
            pickup_address: "4 Park Street".into(),
            delivery_address: "4 Park Street".into(),
            pickup_type: HandlingType::Agent,
            delivery_type: HandlingType::SelfService,
            expected_delivery_date: Some(t0() + TimeDelta::days(2)),
        }
    }

    fn stored(status: EntryStatus) -> Entry {
        let mut new = initial_entry(request(), ReceiptNumber(9)).unwrap();
        new.status = status;
        Entry::from_new(EntryId(1), new, t0())
    }

    #[test]
    fn test_initial_entry_defaults() {
        let new = initial_entry(request(), ReceiptNumber(41)).unwrap();
        assert_eq!(new.status, EntryStatus::Pending);
        assert!(new.visible);
        assert_eq!(new.customer.name, "Meera Iyer");
        assert_eq!(new.products[0].tax, 0.0);
        assert_eq!(new.charges.tax_amount, 0.0);
        assert!(new.pickup_and_delivery.pickup_date.is_none());
        assert!(new.pickup_and_delivery.delivery_date.is_none());
    }

    #[test]
    fn test_missing_required_fields() {
        let mut no_name = request();
        no_name.customer.name = "  ".into();
        assert!(matches!(
            initial_entry(no_name, ReceiptNumber(1)),
            Err(EntryError::ValidationFailed(_))
        ));

        let mut no_date = request();
        no_date.expected_delivery_date = None;
        assert!(matches!(
            check_creation_request(&no_date),
            Err(EntryError::ValidationFailed(_))
        ));

        let mut negative = request();
        negative.charges.total_amount = -1.0;
        assert!(matches!(
            initial_entry(negative, ReceiptNumber(1)),
            Err(EntryError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_creation_check_covers_every_field() {
        let mut blank_address = request();
        blank_address.delivery_address = " ".into();
        assert!(matches!(
            check_creation_request(&blank_address),
            Err(EntryError::ValidationFailed(_))
        ));

        let mut bad_price = request();
        bad_price.products[0].unit_price = f64::NAN;
        assert!(matches!(
            check_creation_request(&bad_price),
            Err(EntryError::ValidationFailed(_))
        ));

        let mut negative_total = request();
        negative_total.charges.total_amount = -5.0;
        assert!(matches!(
            check_creation_request(&negative_total),
            Err(EntryError::ValidationFailed(_))
        ));

        assert_eq!(check_creation_request(&request()), Ok(()));
    }

    #[test]
    fn test_each_state_stamps_its_own_date() {
        let now = t0() + TimeDelta::hours(3);
        let collected = apply_status(&stored(EntryStatus::Pending), EntryStatus::Collected, now)
            .unwrap();
        assert_eq!(collected.pickup_and_delivery.pickup_date, Some(now));

        let packed = apply_status(&collected, EntryStatus::ProcessedAndPacked, now).unwrap();
        assert_eq!(packed.pickup_and_delivery.processed_and_packed_date, Some(now));
        assert_eq!(packed.pickup_and_delivery.delivery_date, None);
    }

    #[test]
    fn test_delivered_twice_stamps_once() {
        let first = t0() + TimeDelta::hours(1);
        let second = t0() + TimeDelta::hours(5);
        let once = apply_status(&stored(EntryStatus::Collected), EntryStatus::Delivered, first)
            .unwrap();
        let twice = apply_status(&once, EntryStatus::Delivered, second).unwrap();
        assert_eq!(twice.pickup_and_delivery.delivery_date, Some(first));
        assert_eq!(twice, once);
    }

    #[test]
    fn test_skipping_does_not_back_fill() {
        let now = t0() + TimeDelta::hours(1);
        let delivered = apply_status(&stored(EntryStatus::Pending), EntryStatus::Delivered, now)
            .unwrap();
        let logistics = &delivered.pickup_and_delivery;
        assert_eq!(logistics.delivery_date, Some(now));
        assert_eq!(logistics.pickup_date, None);
        assert_eq!(logistics.processed_and_packed_date, None);
    }

    #[test]
    fn test_backward_move_is_rejected() {
        let entry = stored(EntryStatus::Delivered);
        let err = apply_status(&entry, EntryStatus::Pending, t0()).unwrap_err();
        assert!(matches!(err, EntryError::InvalidStatus(_)));
        assert_eq!(entry.status, EntryStatus::Delivered);
    }

    #[test]
    fn test_parse_status_rejects_unknown() {
        assert_eq!(parse_status("collected").unwrap(), EntryStatus::Collected);
        assert!(matches!(
            parse_status("lost"),
            Err(EntryError::InvalidStatus(_))
        ));
    }
}
