//! Order and checkout data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Customer snapshot captured at checkout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// One order line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub course_id: String,
    pub quantity: u32,
    pub price: f64,
}

/// Order lifecycle status as reported by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    #[serde(other)]
    Unknown,
}

/// An order as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub customer_info: Option<CustomerInfo>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub shipping: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default = "default_status")]
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_status() -> OrderStatus {
    OrderStatus::Pending
}

/// Where the items of a checkout draft came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutSource {
    /// Staged buy-now payload; takes precedence over the server cart
    BuyNow,
    /// The user's server-side cart
    Cart,
}

/// A locally built order, ready to be created on the backend
#[derive(Debug, Clone)]
pub struct CheckoutDraft {
    pub customer: CustomerInfo,
    pub items: Vec<OrderItem>,
    pub source: CheckoutSource,
    pub subtotal: f64,
    pub shipping: f64,
    pub tax: f64,
    pub total: f64,
}

/// Outcome of parsing the hosted-payment return URL
#[derive(Debug, Clone)]
pub enum CheckoutReturn {
    /// The user cancelled on the payment page; the order remains unpaid
    Cancelled,
    /// Payment verified; the finalized order
    Verified(Order),
}
