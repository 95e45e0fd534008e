//! Record shapes and their scalar values.
//!
//! Every generated record is one of a closed set of fixed-shape structs.
//! The only kind-agnostic view of a record is [`Fields::fields`], which
//! enumerates `(column, value)` pairs in column order and is what the
//! statement renderer consumes.

use crate::kinds::EntityKind;
use serde::{Deserialize, Serialize};

/// Sales tax applied to every order subtotal.
pub const TAX_RATE: f64 = 0.08;

/// Round to two decimal places (cents).
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scalar value of a single record column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Null value
    Null,

    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit floating point
    Float(f64),

    /// String value
    Text(String),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

/// Ordered column enumeration shared by all record shapes.
pub trait Fields {
    /// `(column, value)` pairs in column order.
    fn fields(&self) -> Vec<(&'static str, FieldValue)>;

    /// Look up a single column by name.
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.fields()
            .into_iter()
            .find(|(column, _)| *column == name)
            .map(|(_, value)| value)
    }
}

/// A user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Fields for User {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("id", self.id.as_str().into()),
            ("username", self.username.as_str().into()),
            ("email", self.email.as_str().into()),
            ("first_name", self.first_name.as_str().into()),
            ("last_name", self.last_name.as_str().into()),
            ("phone", self.phone.as_str().into()),
            ("city", self.city.as_str().into()),
            ("state", self.state.as_str().into()),
            ("country", self.country.as_str().into()),
            ("is_active", self.is_active.into()),
            ("created_at", self.created_at.as_str().into()),
            ("updated_at", self.updated_at.as_str().into()),
        ]
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock_quantity: i64,
    pub is_available: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Fields for Product {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("id", self.id.as_str().into()),
            ("sku", self.sku.as_str().into()),
            ("name", self.name.as_str().into()),
            ("category", self.category.as_str().into()),
            ("price", self.price.into()),
            ("stock_quantity", self.stock_quantity.into()),
            ("is_available", self.is_available.into()),
            ("created_at", self.created_at.as_str().into()),
            ("updated_at", self.updated_at.as_str().into()),
        ]
    }
}

/// A single-line order.
///
/// `subtotal`, `tax` and `total` are always derived from `quantity` and
/// `unit_price`; build orders through [`Order::amounts`] to keep them so.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub user_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub payment_method: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Order {
    /// Compute `(subtotal, tax, total)` for an order line.
    pub fn amounts(quantity: i64, unit_price: f64) -> (f64, f64, f64) {
        let subtotal = round_cents(quantity as f64 * unit_price);
        let tax = round_cents(subtotal * TAX_RATE);
        let total = round_cents(subtotal + tax);
        (subtotal, tax, total)
    }

    /// Whether the derived amounts match `quantity` and `unit_price`.
    pub fn amounts_consistent(&self) -> bool {
        Self::amounts(self.quantity, self.unit_price) == (self.subtotal, self.tax, self.total)
    }
}

impl Fields for Order {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("id", self.id.as_str().into()),
            ("order_number", self.order_number.as_str().into()),
            ("user_id", self.user_id.as_str().into()),
            ("product_id", self.product_id.as_str().into()),
            ("quantity", self.quantity.into()),
            ("unit_price", self.unit_price.into()),
            ("subtotal", self.subtotal.into()),
            ("tax", self.tax.into()),
            ("total", self.total.into()),
            ("payment_method", self.payment_method.as_str().into()),
            ("status", self.status.as_str().into()),
            ("created_at", self.created_at.as_str().into()),
            ("updated_at", self.updated_at.as_str().into()),
        ]
    }
}

/// Any generated record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    User(User),
    Product(Product),
    Order(Order),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::User(_) => EntityKind::User,
            Record::Product(_) => EntityKind::Product,
            Record::Order(_) => EntityKind::Order,
        }
    }

    /// The record's uuid identifier.
    pub fn id(&self) -> &str {
        match self {
            Record::User(u) => &u.id,
            Record::Product(p) => &p.id,
            Record::Order(o) => &o.id,
        }
    }
}

impl Fields for Record {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        match self {
            Record::User(u) => u.fields(),
            Record::Product(p) => p.fields(),
            Record::Order(o) => o.fields(),
        }
    }
}

impl From<User> for Record {
    fn from(value: User) -> Self {
        Record::User(value)
    }
}

impl From<Product> for Record {
    fn from(value: Product) -> Self {
        Record::Product(value)
    }
}

impl From<Order> for Record {
    fn from(value: Order) -> Self {
        Record::Order(value)
    }
}
