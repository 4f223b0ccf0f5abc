// SPDX-FileCopyrightText: 2026 Cartrec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory recovery store.
//!
//! The store owns all five collections plus the RNG behind a single
//! [`tokio::sync::Mutex`]. Every operation takes the lock once, so record ids
//! (`collection length + 1`) and cart attempt counters stay consistent when
//! the HTTP layer serves requests concurrently. Collections are append-only.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::RecoveryError;
use crate::seed::{self, SeedData};
use crate::types::{
    AbandonedCart, AttemptStatus, CallingTeamNotification, CartStatus, Customer, DashboardStats,
    DEFAULT_ATTEMPT_TYPE, KNOWN_ATTEMPT_TYPES, MessageStatus, NotificationStatus,
    RecoveryAttempt, RecoveryOutcome, WhatsAppMessage,
};

/// Tunables for the simulated side effects.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Simulated latency of the WhatsApp provider.
    pub whatsapp_delay: Duration,
    /// Probability that a simulated recovery converts the cart.
    pub success_rate: f64,
    /// Base URL for the cart link embedded in WhatsApp messages.
    pub cart_link_base: String,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            whatsapp_delay: Duration::from_secs(1),
            success_rate: 0.7,
            cart_link_base: "https://example.com/cart".to_string(),
        }
    }
}

struct StoreState {
    carts: Vec<AbandonedCart>,
    customers: Vec<Customer>,
    recovery_attempts: Vec<RecoveryAttempt>,
    whatsapp_messages: Vec<WhatsAppMessage>,
    notifications: Vec<CallingTeamNotification>,
    rng: StdRng,
}

impl StoreState {
    fn cart_index(&self, cart_id: u64) -> Result<usize, RecoveryError> {
        self.carts
            .iter()
            .position(|c| c.id == cart_id)
            .ok_or(RecoveryError::CartNotFound { cart_id })
    }

    fn push_whatsapp(&mut self, idx: usize, link_base: &str, now: DateTime<Utc>) -> WhatsAppMessage {
        let cart = &self.carts[idx];
        let link = format!("{}/{}", link_base.trim_end_matches('/'), cart.id);
        let message = WhatsAppMessage {
            id: self.whatsapp_messages.len() as u64 + 1,
            cart_id: cart.id,
            customer_phone: cart.customer_phone.clone(),
            customer_name: cart.customer_name.clone(),
            message: format!(
                "Hi {}! You left some great items worth \u{20b9}{} in your cart. \
                 Complete your purchase now and save 10%! View Cart: {link}",
                cart.customer_name, cart.cart_value
            ),
            sent_at: now,
            status: MessageStatus::Sent,
        };
        self.whatsapp_messages.push(message.clone());
        message
    }

    fn push_notification(&mut self, idx: usize, now: DateTime<Utc>) -> CallingTeamNotification {
        let cart = &self.carts[idx];
        let notification = CallingTeamNotification {
            id: self.notifications.len() as u64 + 1,
            cart_id: cart.id,
            customer_name: cart.customer_name.clone(),
            customer_phone: cart.customer_phone.clone(),
            cart_value: cart.cart_value,
            priority: cart.priority,
            message: format!(
                "New lead: {} - \u{20b9}{} cart value - {} priority - Call within 30 minutes",
                cart.customer_name, cart.cart_value, cart.priority
            ),
            created_at: now,
            status: NotificationStatus::Pending,
        };
        self.notifications.push(notification.clone());
        notification
    }

    fn push_attempt(&mut self, idx: usize, attempt_type: &str, now: DateTime<Utc>) -> RecoveryAttempt {
        let cart = &mut self.carts[idx];
        cart.recovery_attempts += 1;
        let attempt = RecoveryAttempt {
            id: self.recovery_attempts.len() as u64 + 1,
            cart_id: cart.id,
            attempt_type: attempt_type.to_string(),
            customer_name: cart.customer_name.clone(),
            created_at: now,
            status: AttemptStatus::Completed,
        };
        self.recovery_attempts.push(attempt.clone());
        attempt
    }
}

/// Process-wide cart recovery state.
///
/// Construct one per server (or per test) and share it behind an `Arc`.
pub struct RecoveryStore {
    state: Mutex<StoreState>,
    options: StoreOptions,
}

impl RecoveryStore {
    /// Create a store from explicit seed data. `rng` drives the simulated
    /// recovery outcome.
    pub fn new(data: SeedData, rng: StdRng, options: StoreOptions) -> Self {
        Self {
            state: Mutex::new(StoreState {
                carts: data.carts,
                customers: data.customers,
                recovery_attempts: Vec::new(),
                whatsapp_messages: Vec::new(),
                notifications: Vec::new(),
                rng,
            }),
            options,
        }
    }

    /// Create a store with `cart_count` generated carts.
    ///
    /// A fixed `seed` makes both the generated data and every later
    /// recovery draw reproducible; `None` seeds from OS entropy.
    pub fn seeded(cart_count: usize, seed: Option<u64>, options: StoreOptions) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let data = seed::generate(&mut rng, cart_count, Utc::now());
        info!(carts = data.carts.len(), seed = ?seed, "recovery store seeded");
        Self::new(data, rng, options)
    }

    /// All carts in insertion order.
    pub async fn list_abandoned_carts(&self) -> Vec<AbandonedCart> {
        self.state.lock().await.carts.clone()
    }

    /// All customer records, one per generated cart.
    pub async fn list_customers(&self) -> Vec<Customer> {
        self.state.lock().await.customers.clone()
    }

    pub async fn recovery_attempts(&self) -> Vec<RecoveryAttempt> {
        self.state.lock().await.recovery_attempts.clone()
    }

    pub async fn whatsapp_messages(&self) -> Vec<WhatsAppMessage> {
        self.state.lock().await.whatsapp_messages.clone()
    }

    pub async fn calling_team_notifications(&self) -> Vec<CallingTeamNotification> {
        self.state.lock().await.notifications.clone()
    }

    /// Aggregate statistics over the current state.
    pub async fn dashboard_stats(&self) -> DashboardStats {
        let state = self.state.lock().await;

        let total = state.carts.len();
        let recovered = state
            .carts
            .iter()
            .filter(|c| c.status == CartStatus::Recovered)
            .count();
        let pending = state
            .carts
            .iter()
            .filter(|c| c.status == CartStatus::Pending)
            .count();
        let total_value: u64 = state.carts.iter().map(|c| c.cart_value).sum();
        let recovered_value: u64 = state
            .carts
            .iter()
            .filter(|c| c.status == CartStatus::Recovered)
            .map(|c| c.cart_value)
            .sum();

        DashboardStats {
            total_abandoned_carts: total,
            recovered_carts: recovered,
            pending_carts: pending,
            recovery_rate: recovery_rate(recovered, total),
            total_cart_value: total_value,
            recovered_value,
            potential_revenue: total_value - recovered_value,
            whatsapp_messages_sent: state.whatsapp_messages.len(),
            calling_team_notifications: state.notifications.len(),
        }
    }

    /// Send a simulated WhatsApp reminder for a cart.
    ///
    /// The message is recorded immediately; the call then waits for the
    /// configured provider delay before returning.
    pub async fn send_whatsapp(&self, cart_id: u64) -> Result<WhatsAppMessage, RecoveryError> {
        let message = {
            let mut state = self.state.lock().await;
            let idx = state.cart_index(cart_id)?;
            state.push_whatsapp(idx, &self.options.cart_link_base, Utc::now())
        };
        debug!(cart_id, message_id = message.id, "whatsapp message recorded");

        self.provider_delay().await;
        Ok(message)
    }

    /// Hand a cart to the calling team.
    pub async fn notify_calling_team(
        &self,
        cart_id: u64,
    ) -> Result<CallingTeamNotification, RecoveryError> {
        let mut state = self.state.lock().await;
        let idx = state.cart_index(cart_id)?;
        let notification = state.push_notification(idx, Utc::now());
        debug!(
            cart_id,
            notification_id = notification.id,
            priority = %notification.priority,
            "calling team notified"
        );
        Ok(notification)
    }

    /// Record a recovery attempt and bump the cart's attempt counter.
    ///
    /// `attempt_type` defaults to `"whatsapp"`. Any string is accepted.
    pub async fn create_recovery_attempt(
        &self,
        cart_id: u64,
        attempt_type: Option<&str>,
    ) -> Result<RecoveryAttempt, RecoveryError> {
        let attempt_type = resolve_attempt_type(cart_id, attempt_type);
        let mut state = self.state.lock().await;
        let idx = state.cart_index(cart_id)?;
        let attempt = state.push_attempt(idx, attempt_type, Utc::now());
        debug!(cart_id, attempt_id = attempt.id, "recovery attempt recorded");
        Ok(attempt)
    }

    /// Run the full recovery pipeline for a cart.
    ///
    /// Records a WhatsApp message, a calling-team notification and a
    /// recovery attempt of `attempt_type` (default `whatsapp`), then draws
    /// the outcome. A successful draw marks the cart recovered; otherwise its
    /// status is left as it was.
    pub async fn simulate_recovery(
        &self,
        cart_id: u64,
        attempt_type: Option<&str>,
    ) -> Result<RecoveryOutcome, RecoveryError> {
        let attempt_type = resolve_attempt_type(cart_id, attempt_type);
        let outcome = {
            let mut state = self.state.lock().await;
            let idx = state.cart_index(cart_id)?;
            let now = Utc::now();

            state.push_whatsapp(idx, &self.options.cart_link_base, now);
            state.push_notification(idx, now);
            state.push_attempt(idx, attempt_type, now);

            let recovery_success = state.rng.gen_bool(self.options.success_rate);
            if recovery_success {
                state.carts[idx].status = CartStatus::Recovered;
            }
            RecoveryOutcome {
                recovery_success,
                cart_status: state.carts[idx].status,
            }
        };
        info!(
            cart_id,
            recovery_success = outcome.recovery_success,
            cart_status = %outcome.cart_status,
            "recovery simulated"
        );

        self.provider_delay().await;
        Ok(outcome)
    }

    async fn provider_delay(&self) {
        if !self.options.whatsapp_delay.is_zero() {
            tokio::time::sleep(self.options.whatsapp_delay).await;
        }
    }
}

fn resolve_attempt_type(cart_id: u64, attempt_type: Option<&str>) -> &str {
    let attempt_type = attempt_type.unwrap_or(DEFAULT_ATTEMPT_TYPE);
    if !KNOWN_ATTEMPT_TYPES.contains(&attempt_type) {
        debug!(cart_id, attempt_type, "recording attempt with unrecognized type");
    }
    attempt_type
}

/// `recovered / total * 100` rounded to one decimal, or 0 for an empty store.
fn recovery_rate(recovered: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let rate = recovered as f64 / total as f64 * 100.0;
    (rate * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Priority, Product};

    fn customer(id: u32, name: &str) -> Customer {
        Customer {
            id,
            name: name.to_string(),
            phone: format!("+91-98765432{id:02}"),
            email: format!("customer{id}@email.com"),
            location: "Mumbai, Maharashtra".to_string(),
            total_orders: 1,
            avg_order_value: 1000,
        }
    }

    fn product(id: u32, price: u64) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            price,
            category: "Test".to_string(),
        }
    }

    fn options(success_rate: f64) -> StoreOptions {
        StoreOptions {
            whatsapp_delay: Duration::ZERO,
            success_rate,
            ..StoreOptions::default()
        }
    }

    /// Three carts: 6000 (pending), 2500 (recovered), 1000 (lost).
    fn fixture_data() -> SeedData {
        let a = customer(1, "Rajesh Kumar");
        let b = customer(2, "Priya Sharma");
        let now = Utc::now();
        let carts = vec![
            AbandonedCart::new(1, &a, vec![product(1, 6000)], now, CartStatus::Pending),
            AbandonedCart::new(2, &b, vec![product(2, 2500)], now, CartStatus::Recovered),
            AbandonedCart::new(3, &a, vec![product(3, 1000)], now, CartStatus::Lost),
        ];
        SeedData {
            carts,
            customers: vec![a.clone(), b, a],
        }
    }

    fn fixture_store(success_rate: f64) -> RecoveryStore {
        RecoveryStore::new(fixture_data(), StdRng::seed_from_u64(5), options(success_rate))
    }

    async fn record_counts(store: &RecoveryStore) -> (usize, usize, usize) {
        (
            store.whatsapp_messages().await.len(),
            store.calling_team_notifications().await.len(),
            store.recovery_attempts().await.len(),
        )
    }

    #[test]
    fn recovery_rate_rounds_to_one_decimal() {
        assert_eq!(recovery_rate(0, 0), 0.0);
        assert_eq!(recovery_rate(1, 3), 33.3);
        assert_eq!(recovery_rate(2, 3), 66.7);
        assert_eq!(recovery_rate(3, 8), 37.5);
        assert_eq!(recovery_rate(8, 8), 100.0);
    }

    #[tokio::test]
    async fn lists_return_seeded_records_in_order() {
        let store = fixture_store(0.7);
        let carts = store.list_abandoned_carts().await;
        assert_eq!(carts.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        let customers = store.list_customers().await;
        assert_eq!(customers.len(), 3);
        assert_eq!(customers[0], customers[2]);
    }

    #[tokio::test]
    async fn dashboard_stats_aggregates_cart_values() {
        let store = fixture_store(0.7);
        let stats = store.dashboard_stats().await;
        assert_eq!(stats.total_abandoned_carts, 3);
        assert_eq!(stats.recovered_carts, 1);
        assert_eq!(stats.pending_carts, 1);
        assert_eq!(stats.recovery_rate, 33.3);
        assert_eq!(stats.total_cart_value, 9500);
        assert_eq!(stats.recovered_value, 2500);
        assert_eq!(stats.potential_revenue, 7000);
        assert_eq!(stats.whatsapp_messages_sent, 0);
        assert_eq!(stats.calling_team_notifications, 0);
    }

    #[tokio::test]
    async fn dashboard_stats_on_empty_store_is_zero() {
        let store = RecoveryStore::new(SeedData::default(), StdRng::seed_from_u64(1), options(0.7));
        let stats = store.dashboard_stats().await;
        assert_eq!(stats.total_abandoned_carts, 0);
        assert_eq!(stats.recovery_rate, 0.0);
        assert_eq!(stats.potential_revenue, 0);
    }

    #[tokio::test]
    async fn send_whatsapp_appends_message_with_value_and_link() {
        let store = fixture_store(0.7);
        let first = store.send_whatsapp(1).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.cart_id, 1);
        assert_eq!(first.customer_name, "Rajesh Kumar");
        assert!(first.message.contains("6000"));
        assert!(first.message.contains("https://example.com/cart/1"));
        assert_eq!(first.status, MessageStatus::Sent);

        let second = store.send_whatsapp(2).await.unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(store.whatsapp_messages().await.len(), 2);

        let cart = &store.list_abandoned_carts().await[0];
        assert_eq!(cart.recovery_attempts, 0);
        assert_eq!(cart.status, CartStatus::Pending);
    }

    #[tokio::test(start_paused = true)]
    async fn send_whatsapp_waits_for_provider_delay() {
        let store =
            RecoveryStore::new(fixture_data(), StdRng::seed_from_u64(5), StoreOptions::default());
        let started = tokio::time::Instant::now();
        store.send_whatsapp(1).await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test]
    async fn notify_calling_team_carries_priority() {
        let store = fixture_store(0.7);
        let n = store.notify_calling_team(1).await.unwrap();
        assert_eq!(n.id, 1);
        assert_eq!(n.cart_value, 6000);
        assert_eq!(n.priority, Priority::High);
        assert_eq!(n.status, NotificationStatus::Pending);
        assert!(n.message.contains("high priority"));
        assert!(n.message.ends_with("Call within 30 minutes"));
    }

    #[tokio::test]
    async fn recovery_attempts_increment_counter() {
        let store = fixture_store(0.7);
        for _ in 0..3 {
            store.create_recovery_attempt(2, Some("call")).await.unwrap();
        }
        let cart = store
            .list_abandoned_carts()
            .await
            .into_iter()
            .find(|c| c.id == 2)
            .unwrap();
        assert_eq!(cart.recovery_attempts, 3);

        let attempts = store.recovery_attempts().await;
        assert_eq!(attempts.len(), 3);
        assert!(attempts.iter().all(|a| a.cart_id == 2 && a.attempt_type == "call"));
        assert_eq!(attempts.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn attempt_type_defaults_to_whatsapp() {
        let store = fixture_store(0.7);
        let attempt = store.create_recovery_attempt(1, None).await.unwrap();
        assert_eq!(attempt.attempt_type, "whatsapp");
        assert_eq!(attempt.status, AttemptStatus::Completed);
    }

    #[tokio::test]
    async fn attempt_type_outside_known_set_is_accepted() {
        let store = fixture_store(0.7);
        let attempt = store.create_recovery_attempt(1, Some("carrier-pigeon")).await.unwrap();
        assert_eq!(attempt.attempt_type, "carrier-pigeon");
    }

    #[tokio::test]
    async fn unknown_cart_mutates_nothing() {
        let store = fixture_store(1.0);
        let missing = RecoveryError::CartNotFound { cart_id: 9999 };

        assert_eq!(store.send_whatsapp(9999).await.unwrap_err(), missing);
        assert_eq!(store.notify_calling_team(9999).await.unwrap_err(), missing);
        assert_eq!(store.create_recovery_attempt(9999, None).await.unwrap_err(), missing);
        assert_eq!(store.simulate_recovery(9999, None).await.unwrap_err(), missing);

        assert_eq!(record_counts(&store).await, (0, 0, 0));
        let carts = store.list_abandoned_carts().await;
        assert!(carts.iter().all(|c| c.recovery_attempts == 0));
        assert_eq!(carts[0].status, CartStatus::Pending);
    }

    #[tokio::test]
    async fn simulate_recovery_appends_one_record_per_collection() {
        let store = fixture_store(0.7);
        store.simulate_recovery(3, None).await.unwrap();
        assert_eq!(record_counts(&store).await, (1, 1, 1));
        store.simulate_recovery(3, None).await.unwrap();
        assert_eq!(record_counts(&store).await, (2, 2, 2));

        let cart = &store.list_abandoned_carts().await[2];
        assert_eq!(cart.recovery_attempts, 2);
        assert!(matches!(cart.status, CartStatus::Lost | CartStatus::Recovered));
    }

    #[tokio::test]
    async fn simulate_recovery_records_requested_attempt_type() {
        let store = fixture_store(0.0);
        store.simulate_recovery(2, Some("call")).await.unwrap();
        store.simulate_recovery(2, None).await.unwrap();

        let types: Vec<String> = store
            .recovery_attempts()
            .await
            .into_iter()
            .map(|a| a.attempt_type)
            .collect();
        assert_eq!(types, ["call", "whatsapp"]);
    }

    #[tokio::test]
    async fn simulate_recovery_success_marks_cart_recovered() {
        let store = fixture_store(1.0);
        let outcome = store.simulate_recovery(3, None).await.unwrap();
        assert!(outcome.recovery_success);
        assert_eq!(outcome.cart_status, CartStatus::Recovered);
        assert_eq!(store.list_abandoned_carts().await[2].status, CartStatus::Recovered);
    }

    #[tokio::test]
    async fn simulate_recovery_failure_leaves_status() {
        let store = fixture_store(0.0);
        let outcome = store.simulate_recovery(1, None).await.unwrap();
        assert!(!outcome.recovery_success);
        assert_eq!(outcome.cart_status, CartStatus::Pending);
        let outcome = store.simulate_recovery(3, None).await.unwrap();
        assert_eq!(outcome.cart_status, CartStatus::Lost);
    }

    #[tokio::test]
    async fn high_value_cart_scenario() {
        let store = fixture_store(0.7);
        assert_eq!(store.list_abandoned_carts().await[0].priority, Priority::High);

        store.create_recovery_attempt(1, None).await.unwrap();
        store.create_recovery_attempt(1, None).await.unwrap();
        assert_eq!(store.list_abandoned_carts().await[0].recovery_attempts, 2);

        let stats = store.dashboard_stats().await;
        assert!(stats.total_abandoned_carts >= 1);
        assert_eq!(
            stats.potential_revenue,
            stats.total_cart_value - stats.recovered_value
        );
    }

    #[tokio::test]
    async fn seeded_store_is_reproducible() {
        let a = RecoveryStore::seeded(8, Some(21), options(0.7));
        let b = RecoveryStore::seeded(8, Some(21), options(0.7));
        let carts_a = a.list_abandoned_carts().await;
        let carts_b = b.list_abandoned_carts().await;
        assert_eq!(carts_a.len(), 8);
        let strip = |c: &AbandonedCart| (c.id, c.customer_id, c.cart_value, c.status);
        assert_eq!(
            carts_a.iter().map(strip).collect::<Vec<_>>(),
            carts_b.iter().map(strip).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn concurrent_attempts_keep_ids_unique() {
        let store = std::sync::Arc::new(fixture_store(0.7));
        let mut handles = Vec::new();
        for _ in 0..20 {
            let store = std::sync::Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.create_recovery_attempt(1, None).await.unwrap()
            }));
        }
        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().id);
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=20).collect::<Vec<u64>>());
        assert_eq!(store.list_abandoned_carts().await[0].recovery_attempts, 20);
    }
}
