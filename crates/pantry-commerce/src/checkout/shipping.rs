//! Shipping details captured at checkout.

use serde::{Deserialize, Serialize};

/// Shipping address as typed into the checkout form.
///
/// Pure data capture: no field is required or validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub country: String,
    pub city: String,
    pub zip_code: String,
    pub address1: String,
    pub address2: String,
}

impl ShippingDetails {
    /// Form field names, in form order.
    pub const FIELDS: [&'static str; 10] = [
        "firstName",
        "lastName",
        "email",
        "phone",
        "company",
        "country",
        "city",
        "zipCode",
        "address1",
        "address2",
    ];

    /// Update a field by its form name. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        let slot = match name {
            "firstName" => &mut self.first_name,
            "lastName" => &mut self.last_name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "company" => &mut self.company,
            "country" => &mut self.country,
            "city" => &mut self.city,
            "zipCode" => &mut self.zip_code,
            "address1" => &mut self.address1,
            "address2" => &mut self.address2,
            _ => return false,
        };
        *slot = value.into();
        true
    }

    /// Read a field by its form name.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "firstName" => &self.first_name,
            "lastName" => &self.last_name,
            "email" => &self.email,
            "phone" => &self.phone,
            "company" => &self.company,
            "country" => &self.country,
            "city" => &self.city,
            "zipCode" => &self.zip_code,
            "address1" => &self.address1,
            "address2" => &self.address2,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Get full name.
    pub fn full_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Format the non-empty address parts as a single line.
    pub fn one_line(&self) -> String {
        [
            &self.address1,
            &self.address2,
            &self.city,
            &self.zip_code,
            &self.country,
        ]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// Check if nothing has been entered.
    pub fn is_blank(&self) -> bool {
        Self::FIELDS
            .iter()
            .all(|f| self.field(f).is_some_and(|v| v.trim().is_empty()))
    }
}
