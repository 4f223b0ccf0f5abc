// SPDX-FileCopyrightText: 2026 Cartrec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for recovery store operations.

use thiserror::Error;

/// Errors returned by [`RecoveryStore`](crate::RecoveryStore) operations.
///
/// A failed lookup never mutates any collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecoveryError {
    /// The referenced cart id does not exist.
    #[error("cart {cart_id} not found")]
    CartNotFound { cart_id: u64 },
}
