use async_trait::async_trait;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt::{self, Debug};

#[cfg(any(test, feature = "mocks"))]
use mockall::{automock, predicate::*};

/// Errors raised by a [`ProductRepository`]. The message is meant for the logs,
/// callers of the API only ever see a generic failure.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("store request failed: {0}")]
    Store(String),
    #[error("stored item is malformed: {0}")]
    Malformed(String),
}

/// The single-table key-value store holding the inventory, keyed by `productId`.
#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait ProductRepository: Debug {
    /// `Ok(None)` when no item is stored under `product_id`.
    async fn get_product(&self, product_id: &str) -> Result<Option<Product>, RepositoryError>;
    /// Unconditional overwrite.
    async fn save_product(&self, product: Product) -> Result<(), RepositoryError>;
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError>;
    /// Sets name, brand and quantity, creating the item when it does not exist.
    async fn update_product(&self, product: Product) -> Result<(), RepositoryError>;
    /// Deleting a missing key is not an error.
    async fn delete_product(&self, product_id: &str) -> Result<(), RepositoryError>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Product {
    #[serde(rename = "productId", skip_serializing_if = "String::is_empty")]
    pub product_id: String,
    #[serde(rename = "Name", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(
        rename = "Quantity",
        skip_serializing_if = "is_zero",
        serialize_with = "serialize_quantity",
        deserialize_with = "deserialize_quantity"
    )]
    pub quantity: i64,
    #[serde(rename = "Brand", skip_serializing_if = "String::is_empty")]
    pub brand: String,
}

impl Product {
    pub fn new(product_id: String, name: String, brand: String, quantity: i64) -> Self {
        Self {
            product_id,
            name,
            brand,
            quantity,
        }
    }

    /// Best-effort decode of a request body. Fields that are missing, mistyped or
    /// unreadable come back as their zero value; this never fails.
    ///
    /// Keys are applied in document order and matched case-insensitively, so with
    /// `{"Name": "a", "name": "b"}` the later key wins. A value of the wrong type
    /// leaves the field as it was. `Quantity` only accepts a quoted integer.
    pub fn from_body(body: &[u8]) -> Self {
        let fields = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => {
                tracing::warn!("Request body is not a JSON object: {}", other);
                return Self::default();
            }
            Err(e) => {
                tracing::warn!("Request body is not valid JSON: {}", e);
                return Self::default();
            }
        };

        let mut product = Self::default();
        for (key, value) in fields {
            let target = match key.to_ascii_lowercase().as_str() {
                "productid" => &mut product.product_id,
                "name" => &mut product.name,
                "brand" => &mut product.brand,
                "quantity" => {
                    match value.as_str().and_then(parse_quantity) {
                        Some(quantity) => product.quantity = quantity,
                        None => tracing::warn!("Ignoring unreadable {}: {}", key, value),
                    }
                    continue;
                }
                _ => continue,
            };
            match value {
                Value::String(text) => *target = text,
                other => tracing::warn!("Ignoring mistyped {}: {}", key, other),
            }
        }
        product
    }

    /// The plain-text block returned when a single product is fetched.
    pub fn summary(&self) -> String {
        format!(
            "ID: {}\nName: {}\nBrand: {}\nQuantity: {}",
            self.product_id, self.name, self.brand, self.quantity
        )
    }
}

// Same rules as a quoted JSON integer: no sign prefix other than `-`, no padding.
fn parse_quantity(s: &str) -> Option<i64> {
    if s.starts_with('+') || s.trim() != s {
        return None;
    }
    s.parse::<i64>().ok()
}

fn is_zero(quantity: &i64) -> bool {
    *quantity == 0
}

// Quantity travels as a JSON string, e.g. "Quantity": "5".
fn serialize_quantity<S: Serializer>(quantity: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&quantity.to_string())
}

fn deserialize_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    struct QuantityVisitor;

    impl de::Visitor<'_> for QuantityVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an integer encoded as a string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            v.trim().parse::<i64>().map_err(E::custom)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(E::custom)
        }
    }

    deserializer.deserialize_any(QuantityVisitor)
}
