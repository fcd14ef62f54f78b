//! Shipping address and its typed form fields.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub country: String,
}

/// One editable field of an [`Address`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    Street,
    City,
    State,
    ZipCode,
    Country,
}

impl AddressField {
    pub const ALL: [AddressField; 5] = [
        AddressField::Street,
        AddressField::City,
        AddressField::State,
        AddressField::ZipCode,
        AddressField::Country,
    ];
}

impl Display for AddressField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AddressField::Street => "street",
            AddressField::City => "city",
            AddressField::State => "state",
            AddressField::ZipCode => "zipCode",
            AddressField::Country => "country",
        };
        f.write_str(label)
    }
}

impl Address {
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::Street => &self.street,
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::ZipCode => &self.zip_code,
            AddressField::Country => &self.country,
        }
    }

    pub fn set(&mut self, field: AddressField, value: impl Into<String>) {
        let value = value.into();
        match field {
            AddressField::Street => self.street = value,
            AddressField::City => self.city = value,
            AddressField::State => self.state = value,
            AddressField::ZipCode => self.zip_code = value,
            AddressField::Country => self.country = value,
        }
    }

    /// Required fields that are empty or whitespace only, in form order.
    pub fn missing_fields(&self) -> Vec<AddressField> {
        AddressField::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_in_form_order() {
        let mut address = Address::default();
        address.set(AddressField::City, "Lahore");
        address.set(AddressField::Country, "   ");

        assert_eq!(
            address.missing_fields(),
            vec![
                AddressField::Street,
                AddressField::State,
                AddressField::ZipCode,
                AddressField::Country
            ]
        );
        assert!(!address.is_complete());
    }

    #[test]
    fn test_serializes_zip_code_in_camel_case() {
        let address = Address {
            zip_code: "54000".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&address).unwrap();
        assert_eq!(json["zipCode"], "54000");
    }
}
