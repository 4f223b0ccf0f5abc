// SPDX-FileCopyrightText: 2026 Cartrec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core domain for the cartrec cart abandonment recovery demo.
//!
//! Holds the record types served by the API, the static sample catalog,
//! seeded generation of abandoned carts, and the [`RecoveryStore`] that owns
//! every mutable collection for the lifetime of the process.

pub mod catalog;
pub mod error;
pub mod seed;
pub mod store;
pub mod types;

pub use error::RecoveryError;
pub use seed::SeedData;
pub use store::{RecoveryStore, StoreOptions};
pub use types::{
    AbandonedCart, CallingTeamNotification, CartStatus, Customer, DashboardStats, Priority,
    Product, RecoveryAttempt, RecoveryOutcome, WhatsAppMessage,
};
