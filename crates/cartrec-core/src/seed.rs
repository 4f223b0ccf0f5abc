// SPDX-FileCopyrightText: 2026 Cartrec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Randomized generation of the startup cart data.
//!
//! Generation is driven by a caller-supplied RNG and clock so a fixed seed
//! reproduces the same carts.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::{sample_customers, sample_products};
use crate::types::{AbandonedCart, CartStatus, Customer};

/// Number of carts generated when no count is configured.
pub const DEFAULT_CART_COUNT: usize = 8;

/// Carts were abandoned between these many minutes before `now`.
const ABANDONED_MINUTES: std::ops::RangeInclusive<i64> = 5..=30;

/// Carts contain between one and three distinct products.
const ITEMS_PER_CART: std::ops::RangeInclusive<usize> = 1..=3;

/// Carts and customer records produced at startup.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub carts: Vec<AbandonedCart>,
    /// One entry per cart, in cart order. Not deduplicated.
    pub customers: Vec<Customer>,
}

/// Generate `cart_count` abandoned carts relative to `now`.
///
/// Cart ids run from 1 to `cart_count`. Each cart picks a random customer,
/// 1-3 distinct products, an abandonment time 5-30 minutes ago and a random
/// status. Attempt counters start at zero.
pub fn generate<R: Rng>(rng: &mut R, cart_count: usize, now: DateTime<Utc>) -> SeedData {
    let customers = sample_customers();
    let products = sample_products();
    let mut data = SeedData {
        carts: Vec::with_capacity(cart_count),
        customers: Vec::with_capacity(cart_count),
    };

    for i in 0..cart_count {
        let customer = &customers[rng.gen_range(0..customers.len())];
        let item_count = rng.gen_range(ITEMS_PER_CART);
        let items = products.choose_multiple(&mut *rng, item_count).cloned().collect();
        let abandoned_at = now - Duration::minutes(rng.gen_range(ABANDONED_MINUTES));
        let status = CartStatus::ALL[rng.gen_range(0..CartStatus::ALL.len())];

        data.carts.push(AbandonedCart::new(
            i as u64 + 1,
            customer,
            items,
            abandoned_at,
            status,
        ));
        data.customers.push(customer.clone());
    }

    data
}
