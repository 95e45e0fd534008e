//! Seeded record generator.

use crate::generators::contact::{generate_email, generate_phone, generate_username};
use crate::generators::numeric::{
    generate_int_range, generate_money, generate_order_number, generate_sku,
};
use crate::generators::pools::{
    CITIES, COUNTRIES, FIRST_NAMES, LAST_NAMES, ORDER_STATUSES, PAYMENT_METHODS,
    PRODUCT_ADJECTIVES, PRODUCT_CATEGORIES, PRODUCT_NOUNS, STATES,
};
use crate::generators::timestamp::{anchor_now, format_timestamp, generate_between, generate_in_window};
use crate::generators::{pick, uuid::generate_uuid_v4};
use chrono::NaiveDateTime;
use datagen_core::{EntityKind, Order, Product, Record, User};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Record generator that produces deterministic fake records.
///
/// Every instance owns its own seeded random stream, so two generators never
/// interfere with each other. Given the same seed and the same anchor, two
/// generators invoked with the same sequence of calls produce identical
/// records.
///
/// Not thread-safe: generation mutates the stream, so each worker builds its
/// own generator.
pub struct RecordGenerator {
    /// Seed the stream was created from
    seed: u64,
    /// Seeded random number generator for reproducibility
    rng: StdRng,
    /// Upper bound of the timestamp window
    anchor: NaiveDateTime,
    /// Records produced so far
    generated: u64,
}

impl RecordGenerator {
    /// Create a generator with the given seed, anchored at the current time.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            anchor: anchor_now(),
            generated: 0,
        }
    }

    /// Pin the end of the timestamp window.
    ///
    /// Timestamps are drawn from the 365 days before the anchor. Pinning it
    /// makes output independent of wall-clock time.
    pub fn with_anchor(mut self, anchor: NaiveDateTime) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn anchor(&self) -> NaiveDateTime {
        self.anchor
    }

    /// Number of records generated so far.
    pub fn generated_count(&self) -> u64 {
        self.generated
    }

    /// Generate one record of the given kind.
    pub fn generate(&mut self, kind: EntityKind) -> Record {
        match kind {
            EntityKind::User => self.user().into(),
            EntityKind::Product => self.product().into(),
            EntityKind::Order => self.order().into(),
        }
    }

    pub fn user(&mut self) -> User {
        let first_name = pick(&mut self.rng, FIRST_NAMES);
        let last_name = pick(&mut self.rng, LAST_NAMES);
        let (created_at, updated_at) = self.timestamps();

        let user = User {
            id: generate_uuid_v4(&mut self.rng),
            username: generate_username(&mut self.rng, first_name, last_name),
            email: generate_email(&mut self.rng, first_name, last_name),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone: generate_phone(&mut self.rng),
            city: pick(&mut self.rng, CITIES).to_string(),
            state: pick(&mut self.rng, STATES).to_string(),
            country: pick(&mut self.rng, COUNTRIES).to_string(),
            is_active: self.rng.random_bool(0.5),
            created_at,
            updated_at,
        };
        self.generated += 1;
        user
    }

    pub fn product(&mut self) -> Product {
        let (created_at, updated_at) = self.timestamps();
        let name = format!(
            "{} {}",
            pick(&mut self.rng, PRODUCT_ADJECTIVES),
            pick(&mut self.rng, PRODUCT_NOUNS)
        );

        let product = Product {
            id: generate_uuid_v4(&mut self.rng),
            sku: generate_sku(&mut self.rng),
            name,
            category: pick(&mut self.rng, PRODUCT_CATEGORIES).to_string(),
            price: generate_money(&mut self.rng, 10.0, 1000.0),
            stock_quantity: generate_int_range(&mut self.rng, 0, 1000),
            is_available: self.rng.random_bool(0.5),
            created_at,
            updated_at,
        };
        self.generated += 1;
        product
    }

    pub fn order(&mut self) -> Order {
        let quantity = generate_int_range(&mut self.rng, 1, 10);
        let unit_price = generate_money(&mut self.rng, 10.0, 500.0);
        let (subtotal, tax, total) = Order::amounts(quantity, unit_price);
        let (created_at, updated_at) = self.timestamps();

        let order = Order {
            id: generate_uuid_v4(&mut self.rng),
            order_number: generate_order_number(&mut self.rng),
            user_id: generate_uuid_v4(&mut self.rng),
            product_id: generate_uuid_v4(&mut self.rng),
            quantity,
            unit_price,
            subtotal,
            tax,
            total,
            payment_method: pick(&mut self.rng, PAYMENT_METHODS).to_string(),
            status: pick(&mut self.rng, ORDER_STATUSES).to_string(),
            created_at,
            updated_at,
        };
        self.generated += 1;
        order
    }

    /// Access the underlying stream, for choices that must stay on the same
    /// deterministic sequence as the records (e.g. random-mix operations).
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// `(created_at, updated_at)` with `updated_at` never before `created_at`.
    fn timestamps(&mut self) -> (String, String) {
        let created = generate_in_window(&mut self.rng, self.anchor);
        let updated = generate_between(&mut self.rng, created, self.anchor);
        (format_timestamp(created), format_timestamp(updated))
    }
}
