use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::category::category_label;

/// Upper bound on rating icons emitted for one rating value.
pub const MAX_RATING_ICONS: usize = 1000;

/// A catalog item exactly as the remote API returns it.
///
/// The record is held as raw JSON and serialises back byte-for-byte
/// equivalent, `null`s and unknown fields included. Nothing is checked on
/// the way in: accessors read a field when it has a displayable type and
/// fall back to the display default (empty string, zero, empty list)
/// otherwise, so one odd record never rejects a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product {
    raw: Value,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            raw: Value::Object(serde_json::Map::new()),
        }
    }
}

impl From<Value> for Product {
    fn from(raw: Value) -> Self {
        Self { raw }
    }
}

impl Product {
    /// The API record, untouched.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.raw
    }

    /// Raw field lookup; `None` when absent or when the record is not an object.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    /// `_id` as a string: strings as-is, numbers in their JSON form. Empty or
    /// any other type is `None`.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        let id = match self.field("_id")? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        (!id.is_empty()).then_some(id)
    }

    #[must_use]
    pub fn name(&self) -> Cow<'_, str> {
        self.text("name")
    }

    /// Raw category slug; see [`category_label`] for the display form.
    #[must_use]
    pub fn category(&self) -> Cow<'_, str> {
        self.text("category")
    }

    #[must_use]
    pub fn category_label(&self) -> &'static str {
        category_label(&self.category())
    }

    /// The price as displayed: strings verbatim, numbers in their JSON form,
    /// anything else empty.
    #[must_use]
    pub fn price_text(&self) -> String {
        self.text("price").into_owned()
    }

    #[must_use]
    pub fn description(&self) -> Cow<'_, str> {
        self.text("description")
    }

    /// `"inStock"` shows as in stock; anything else, of any type, does not.
    #[must_use]
    pub fn status(&self) -> StockStatus {
        StockStatus::from_raw(&self.text("status"))
    }

    /// Number of star icons drawn for `rating`.
    #[must_use]
    pub fn rating_icons(&self) -> usize {
        icon_count(self.field("rating"))
    }

    /// Number of star icons drawn for `averageRating`.
    #[must_use]
    pub fn average_rating_icons(&self) -> usize {
        icon_count(self.field("averageRating"))
    }

    /// `keyFeatures` in order, each entry in its display form. A value that
    /// is not an array yields no features.
    #[must_use]
    pub fn key_features(&self) -> Vec<Cow<'_, str>> {
        match self.field("keyFeatures") {
            Some(Value::Array(features)) => features.iter().map(display_text).collect(),
            _ => Vec::new(),
        }
    }

    /// Review entries are owned by the review widget; their shape is opaque here.
    #[must_use]
    pub fn reviews(&self) -> &[Value] {
        match self.field("reviews") {
            Some(Value::Array(reviews)) => reviews.as_slice(),
            _ => &[],
        }
    }

    #[must_use]
    pub fn image(&self) -> Cow<'_, str> {
        self.text("image")
    }

    fn text(&self, key: &str) -> Cow<'_, str> {
        self.field(key).map_or(Cow::Borrowed(""), display_text)
    }
}

/// Display form of a scalar: strings verbatim, numbers in their JSON form,
/// everything else (`null`, booleans, arrays, objects) empty.
fn display_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        _ => Cow::Borrowed(""),
    }
}

/// Stock state shown on cards and detail pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    /// Every status other than `"inStock"`, including a missing one.
    OutOfStock,
}

impl StockStatus {
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        if raw == "inStock" {
            StockStatus::InStock
        } else {
            StockStatus::OutOfStock
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StockStatus::InStock => "In stock",
            StockStatus::OutOfStock => "Out of stock",
        }
    }

    /// Inverse of [`StockStatus::label`].
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "In stock" => Some(StockStatus::InStock),
            "Out of stock" => Some(StockStatus::OutOfStock),
            _ => None,
        }
    }
}

/// Coerces a rating value into a repeat count the way an array length is
/// derived from an arbitrary value: integers as-is, fractions truncated,
/// numeric strings parsed, `true` as one, everything else zero.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn icon_count(value: Option<&Value>) -> usize {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(0.0)
            }
        }
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    };

    if n.is_nan() || n < 1.0 {
        return 0;
    }
    n.trunc().min(MAX_RATING_ICONS as f64) as usize
}
