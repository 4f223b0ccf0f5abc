// SPDX-FileCopyrightText: 2026 Cartrec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record types served by the recovery API.
//!
//! Customer and product data is reference data. Carts are created in bulk at
//! startup and only their `status` and `recovery_attempts` change afterwards.
//! Attempts, messages and notifications are append-only. Customer fields are
//! copied onto child records when those records are created.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Attempt type used when a caller does not provide one.
pub const DEFAULT_ATTEMPT_TYPE: &str = "whatsapp";

/// Attempt types the front end knows how to render.
pub const KNOWN_ATTEMPT_TYPES: [&str; 3] = ["whatsapp", "call", "email"];

/// Carts above this value are high priority.
pub const HIGH_PRIORITY_THRESHOLD: u64 = 5000;

/// Carts above this value (and not high) are medium priority.
pub const MEDIUM_PRIORITY_THRESHOLD: u64 = 2000;

/// A shopper from the sample customer catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: u32,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub location: String,
    pub total_orders: u32,
    pub avg_order_value: u64,
}

/// A product from the static catalog. Prices are whole rupees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price: u64,
    pub category: String,
}

/// Recovery status of an abandoned cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartStatus {
    Pending,
    Recovered,
    Lost,
}

impl CartStatus {
    pub const ALL: [CartStatus; 3] = [CartStatus::Pending, CartStatus::Recovered, CartStatus::Lost];

    pub fn as_str(self) -> &'static str {
        match self {
            CartStatus::Pending => "pending",
            CartStatus::Recovered => "recovered",
            CartStatus::Lost => "lost",
        }
    }
}

impl fmt::Display for CartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Follow-up urgency derived from cart value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Classify a cart value: `> 5000` is high, `> 2000` is medium, else low.
    pub fn from_cart_value(value: u64) -> Self {
        if value > HIGH_PRIORITY_THRESHOLD {
            Priority::High
        } else if value > MEDIUM_PRIORITY_THRESHOLD {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cart the customer left without checking out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbandonedCart {
    pub id: u64,
    pub customer_id: u32,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub cart_items: Vec<Product>,
    /// Sum of `cart_items` prices, fixed at creation.
    pub cart_value: u64,
    pub abandoned_at: DateTime<Utc>,
    pub status: CartStatus,
    /// Number of recovery attempts recorded against this cart.
    pub recovery_attempts: u32,
    /// Derived from `cart_value` at creation and never recomputed.
    pub priority: Priority,
}

impl AbandonedCart {
    /// Build a cart for `customer`, deriving value and priority from `items`.
    pub fn new(
        id: u64,
        customer: &Customer,
        items: Vec<Product>,
        abandoned_at: DateTime<Utc>,
        status: CartStatus,
    ) -> Self {
        let cart_value = items.iter().map(|p| p.price).sum();
        Self {
            id,
            customer_id: customer.id,
            customer_name: customer.name.clone(),
            customer_phone: customer.phone.clone(),
            customer_email: customer.email.clone(),
            cart_items: items,
            cart_value,
            abandoned_at,
            status,
            recovery_attempts: 0,
            priority: Priority::from_cart_value(cart_value),
        }
    }
}

/// Status of a recovery attempt. Attempts are recorded once they are done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptStatus {
    Completed,
}

/// One outreach action against a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryAttempt {
    pub id: u64,
    pub cart_id: u64,
    /// Free-form channel name, usually one of [`KNOWN_ATTEMPT_TYPES`].
    #[serde(rename = "type")]
    pub attempt_type: String,
    pub customer_name: String,
    pub created_at: DateTime<Utc>,
    pub status: AttemptStatus,
}

/// Delivery status of a simulated WhatsApp message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Sent,
}

/// A simulated WhatsApp reminder sent to the cart owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatsAppMessage {
    pub id: u64,
    pub cart_id: u64,
    pub customer_phone: String,
    pub customer_name: String,
    pub message: String,
    pub sent_at: DateTime<Utc>,
    pub status: MessageStatus,
}

/// Lifecycle of a calling-team notification. Only `pending` is ever issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Pending,
}

/// A lead handed to the sales calling team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallingTeamNotification {
    pub id: u64,
    pub cart_id: u64,
    pub customer_name: String,
    pub customer_phone: String,
    pub cart_value: u64,
    pub priority: Priority,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub status: NotificationStatus,
}

/// Aggregate numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_abandoned_carts: usize,
    pub recovered_carts: usize,
    pub pending_carts: usize,
    /// Percentage rounded to one decimal; 0 when there are no carts.
    pub recovery_rate: f64,
    pub total_cart_value: u64,
    pub recovered_value: u64,
    pub potential_revenue: u64,
    pub whatsapp_messages_sent: usize,
    pub calling_team_notifications: usize,
}

/// Result of a simulated end-to-end recovery run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryOutcome {
    pub recovery_success: bool,
    pub cart_status: CartStatus,
}
