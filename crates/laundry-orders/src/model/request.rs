//! Inputs accepted by [`EntryService`](crate::service::EntryService).
//!
//! Requests mirror the JSON bodies of the order API: optional tax fields, an optional status
//! string that is parsed (and may be rejected) by the service.

use crate::model::{Charges, CustomerRef, Entry, HandlingType, LineItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub amount: f64,
    #[serde(default)]
    pub tax: Option<f64>,
}

impl From<LineItemRequest> for LineItem {
    fn from(item: LineItemRequest) -> Self {
        Self {
            product_name: item.product_name,
            quantity: item.quantity,
            unit_price: item.unit_price,
            amount: item.amount,
            tax: item.tax.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargesRequest {
    pub subtotal: f64,
    #[serde(default)]
    pub tax_amount: Option<f64>,
    pub total_amount: f64,
}

impl From<ChargesRequest> for Charges {
    fn from(charges: ChargesRequest) -> Self {
        Self {
            subtotal: charges.subtotal,
            tax_amount: charges.tax_amount.unwrap_or(0.0),
            total_amount: charges.total_amount,
        }
    }
}

/// Body of a create call. `expected_delivery_date` is optional here only so that its
/// absence can be reported as a validation error rather than a decode error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntryRequest {
    pub customer: CustomerRef,
    #[serde(default)]
    pub products: Vec<LineItemRequest>,
    pub charges: ChargesRequest,
    pub pickup_address: String,
    pub delivery_address: String,
    pub pickup_type: HandlingType,
    pub delivery_type: HandlingType,
    #[serde(default)]
    pub expected_delivery_date: Option<DateTime<Utc>>,
}

/// Body of an update call; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryUpdateRequest {
    pub status: Option<String>,
    pub customer: Option<CustomerRef>,
    pub products: Option<Vec<LineItemRequest>>,
    pub charges: Option<ChargesRequest>,
    pub pickup_address: Option<String>,
    pub delivery_address: Option<String>,
    pub pickup_type: Option<HandlingType>,
    pub delivery_type: Option<HandlingType>,
    pub expected_delivery_date: Option<DateTime<Utc>>,
}

impl EntryUpdateRequest {
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Default::default()
        }
    }

    /// Copies every non-status field that is set onto `entry`.
    pub(crate) fn apply_fields(&self, entry: &mut Entry) {
        if let Some(customer) = &self.customer {
            entry.customer = customer.clone();
        }
        if let Some(products) = &self.products {
            entry.products = products.iter().cloned().map(LineItem::from).collect();
        }
        if let Some(charges) = &self.charges {
            entry.charges = charges.clone().into();
        }

        let logistics = &mut entry.pickup_and_delivery;
        if let Some(address) = &self.pickup_address {
            logistics.pickup_address = address.clone();
        }
        if let Some(address) = &self.delivery_address {
            logistics.delivery_address = address.clone();
        }
        if let Some(kind) = self.pickup_type {
            logistics.pickup_type = kind;
        }
        if let Some(kind) = self.delivery_type {
            logistics.delivery_type = kind;
        }
        if let Some(date) = self.expected_delivery_date {
            logistics.expected_delivery_date = date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_taxes_default_to_zero() {
        let json = r#"{
            "customer": { "id": "c1", "name": "Meera" },
            "products": [{ "productName": "Saree", "quantity": 2, "unitPrice": 150.0, "amount": 300.0 }],
            "charges": { "subtotal": 300.0, "totalAmount": 300.0 },
            "pickupAddress": "12 MG Road",
            "deliveryAddress": "12 MG Road",
            "pickupType": "Self",
            "deliveryType": "Courier",
            "expectedDeliveryDate": "2024-03-05T06:30:00Z"
        }"#;
        let request: NewEntryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.pickup_type, HandlingType::SelfService);

        let item = LineItem::from(request.products[0].clone());
        assert_eq!(item.tax, 0.0);
        let charges = Charges::from(request.charges);
        assert_eq!(charges.tax_amount, 0.0);
    }
}
