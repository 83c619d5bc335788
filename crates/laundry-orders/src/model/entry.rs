//! Laundry orders ("entries").
//!
//! `Entry` implements [`StoredEntity`](store_actor::StoredEntity) (see
//! [`entry_actor`](crate::entry_actor)), so it is owned by a
//! [`ResourceActor`](store_actor::ResourceActor) and reached through
//! [`EntryClient`](crate::clients::EntryClient).
//!
//! - Creation payload: [`NewEntry`]
//! - Patches: [`EntryPatch`]

use crate::error::EntryError;
use crate::model::{EntryStatus, ReceiptNumber};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for entries, assigned by the entry store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(pub u32);

impl From<u32> for EntryId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entry_{}", self.0)
    }
}

/// Denormalized customer reference kept on every entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRef {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub amount: f64,
    #[serde(default)]
    pub tax: f64,
}

/// Order totals as entered. Not recomputed from line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charges {
    pub subtotal: f64,
    #[serde(default)]
    pub tax_amount: f64,
    pub total_amount: f64,
}

/// Who moves the garments for pickup or delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandlingType {
    #[serde(rename = "Self")]
    SelfService,
    Agent,
    Courier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupAndDelivery {
    pub pickup_address: String,
    pub delivery_address: String,
    pub pickup_type: HandlingType,
    pub delivery_type: HandlingType,
    pub pickup_date: Option<DateTime<Utc>>,
    pub processed_and_packed_date: Option<DateTime<Utc>>,
    pub expected_delivery_date: DateTime<Utc>,
    pub delivery_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub customer: CustomerRef,
    pub receipt_no: ReceiptNumber,
    pub status: EntryStatus,
    pub visible: bool,
    pub products: Vec<LineItem>,
    pub charges: Charges,
    pub pickup_and_delivery: PickupAndDelivery,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Bumped by every store write; conditional updates compare against it.
    pub revision: u64,
}

/// Payload for inserting a new entry. The store assigns `id`, timestamps and `revision`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub customer: CustomerRef,
    pub receipt_no: ReceiptNumber,
    pub status: EntryStatus,
    pub visible: bool,
    pub products: Vec<LineItem>,
    pub charges: Charges,
    pub pickup_and_delivery: PickupAndDelivery,
}

/// Patch applied by the entry store.
#[derive(Debug, Clone)]
pub enum EntryPatch {
    /// Overwrite the mutable fields, but only if the stored revision still equals
    /// `expected_revision`. `id`, `created_at` and `revision` are kept by the store.
    Replace {
        expected_revision: u64,
        entry: Box<Entry>,
    },
    /// Flip the `visible` flag.
    ToggleVisibility,
}

fn check_amount(field: &str, value: f64) -> Result<(), EntryError> {
    if !value.is_finite() || value < 0.0 {
        return Err(EntryError::ValidationFailed(format!(
            "{field} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

fn check_text(field: &str, value: &str) -> Result<(), EntryError> {
    if value.trim().is_empty() {
        return Err(EntryError::ValidationFailed(format!("{field} is required")));
    }
    Ok(())
}

/// Field-level checks applied on every insert and replace.
pub(crate) fn validate_fields(
    customer: &CustomerRef,
    products: &[LineItem],
    charges: &Charges,
    logistics: &PickupAndDelivery,
) -> Result<(), EntryError> {
    check_text("customer.name", &customer.name)?;
    check_text("customer.id", &customer.id)?;
    check_text("pickupAddress", &logistics.pickup_address)?;
    check_text("deliveryAddress", &logistics.delivery_address)?;

    for (i, item) in products.iter().enumerate() {
        check_text(&format!("products[{i}].productName"), &item.product_name)?;
        check_amount(&format!("products[{i}].unitPrice"), item.unit_price)?;
        check_amount(&format!("products[{i}].amount"), item.amount)?;
        check_amount(&format!("products[{i}].tax"), item.tax)?;
    }

    check_amount("charges.subtotal", charges.subtotal)?;
    check_amount("charges.taxAmount", charges.tax_amount)?;
    check_amount("charges.totalAmount", charges.total_amount)?;
    Ok(())
}

impl NewEntry {
    pub fn validate(&self) -> Result<(), EntryError> {
        validate_fields(
            &self.customer,
            &self.products,
            &self.charges,
            &self.pickup_and_delivery,
        )
    }
}

impl Entry {
    pub fn validate(&self) -> Result<(), EntryError> {
        validate_fields(
            &self.customer,
            &self.products,
            &self.charges,
            &self.pickup_and_delivery,
        )
    }

    /// Builds the stored document from an insert payload.
    pub fn from_new(id: EntryId, new: NewEntry, now: DateTime<Utc>) -> Self {
        Self {
            id,
            customer: new.customer,
            receipt_no: new.receipt_no,
            status: new.status,
            visible: new.visible,
            products: new.products,
            charges: new.charges,
            pickup_and_delivery: new.pickup_and_delivery,
            created_at: now,
            updated_at: now,
            revision: 0,
        }
    }

    /// Case-insensitive substring match on the customer name. `needle` must be lowercase.
    pub fn customer_matches(&self, needle: &str) -> bool {
        self.customer.name.to_lowercase().contains(needle)
    }
}
