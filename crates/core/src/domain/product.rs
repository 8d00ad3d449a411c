use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl ProductId {
    pub const FIRST: ProductId = ProductId(1);

    /// `None` once the id space is used up.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
}

impl Product {
    pub fn new(id: i64, name: impl Into<String>, price: Decimal) -> Self {
        Self { id: ProductId(id), name: name.into(), price }
    }

    /// Overwrites name and price; the id is never touched.
    pub fn apply(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.price = draft.price;
    }
}

/// Client-supplied product fields for create and update.
///
/// No validation happens here: empty names and negative prices are accepted,
/// missing or `null` fields fall back to `""` and `0`, and any `id` sent by the
/// client is dropped because the collection owns identifier assignment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ProductDraft {
    #[serde(default, deserialize_with = "name_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "price_or_zero")]
    pub price: Decimal,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self { name: name.into(), price }
    }

    pub fn into_product(self, id: ProductId) -> Product {
        Product { id, name: self.name, price: self.price }
    }
}

fn name_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn price_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let price = rust_decimal::serde::arbitrary_precision_option::deserialize(deserializer)?;
    Ok(price.unwrap_or_default())
}
