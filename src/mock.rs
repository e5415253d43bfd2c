//! Fixture data for the pages that have no upstream endpoint.
//!
//! Randomised collections come from a [`MockGenerator`], which is seeded so
//! tests (and demos with `mock.seed` set) see the same data on every run.
//! The floor plan and kitchen queue are fixed.

use crate::config::MockConfig;
use crate::domain::{
    Customer, CustomerStatus, DiningTable, InventoryItem, KitchenOrder, KitchenStatus, OrderLine,
    Priority, TableStatus,
};
use chrono::{DateTime, Days, Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const STREETS: &[&str] = &[
    "Sukhumvit Rd",
    "Silom Rd",
    "Rama IV Rd",
    "Phahonyothin Rd",
    "Charoen Krung Rd",
    "Ratchadaphisek Rd",
];

const STOCK_LINES: &[(&str, &str)] = &[
    ("Jasmine Rice 5kg", "Rice"),
    ("Sticky Rice 2kg", "Rice"),
    ("Rice Noodles", "Noodles"),
    ("Egg Noodles", "Noodles"),
    ("Fish Sauce", "Sauces"),
    ("Oyster Sauce", "Sauces"),
    ("Green Curry Paste", "Sauces"),
    ("Coconut Milk", "Pantry"),
    ("Palm Sugar", "Pantry"),
    ("Tiger Prawns 1kg", "Seafood"),
    ("Blue Crab Meat", "Seafood"),
    ("Thai Iced Tea Mix", "Beverages"),
    ("Mixed Fruit Juice", "Beverages"),
    ("Mango", "Produce"),
    ("Thai Basil", "Produce"),
];

/// Seedable source of mock records.
///
/// ```rust
/// use posboard::mock::MockGenerator;
///
/// let a = MockGenerator::seeded(7).customers(3);
/// let b = MockGenerator::seeded(7).customers(3);
/// assert_eq!(a, b);
/// assert_eq!(a[2].name, "Customer 3");
/// ```
#[derive(Debug, Clone)]
pub struct MockGenerator {
    rng: StdRng,
}

impl MockGenerator {
    /// A generator that always produces the same data for `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A generator seeded from the OS.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when the configuration fixes a seed, random otherwise.
    pub fn from_config(config: &MockConfig) -> Self {
        match config.seed {
            Some(seed) => Self::seeded(seed),
            None => Self::random(),
        }
    }

    /// `n` customers named `Customer 1` to `Customer n`, with ids 1 to `n`,
    /// joined during 2024; about four in five are active.
    pub fn customers(&mut self, n: u32) -> Vec<Customer> {
        let new_year = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN);
        (1..=n)
            .map(|i| {
                let joined = new_year
                    .checked_add_days(Days::new(self.rng.gen_range(0..366)))
                    .unwrap_or(new_year);
                let street = STREETS[self.rng.gen_range(0..STREETS.len())];
                Customer {
                    id: i,
                    name: format!("Customer {}", i),
                    email: format!("customer{}@example.com", i),
                    phone: format!("08{:08}", self.rng.gen_range(0..100_000_000u32)),
                    address: format!("{} {}, Bangkok", self.rng.gen_range(1..=999), street),
                    total_orders: self.rng.gen_range(1..=50),
                    total_spent: f64::from(self.rng.gen_range(1_000..=51_000u32)),
                    join_date: joined,
                    status: if self.rng.gen_bool(0.8) {
                        CustomerStatus::Active
                    } else {
                        CustomerStatus::Inactive
                    },
                }
            })
            .collect()
    }

    /// `n` stock lines cycling through a small catalogue. Roughly one in
    /// eight is out of stock.
    pub fn inventory(&mut self, n: u32) -> Vec<InventoryItem> {
        (1..=n)
            .map(|i| {
                let (name, category) = STOCK_LINES[(i as usize - 1) % STOCK_LINES.len()];
                let quantity = if self.rng.gen_ratio(1, 8) {
                    0
                } else {
                    self.rng.gen_range(1..=120)
                };
                InventoryItem {
                    id: i,
                    sku: format!("SKU-{:04}", i),
                    name: name.to_string(),
                    category: category.to_string(),
                    quantity,
                    reorder_level: self.rng.gen_range(10..=30),
                    unit_cost: f64::from(self.rng.gen_range(20..=500u32)),
                }
            })
            .collect()
    }

    /// The twelve tables of the restaurant in zones A to C.
    pub fn floor_plan() -> Vec<DiningTable> {
        let layout: [(&str, u8); 12] = [
            ("A1", 2),
            ("A2", 4),
            ("A3", 4),
            ("A4", 6),
            ("B1", 2),
            ("B2", 4),
            ("B3", 8),
            ("B4", 4),
            ("C1", 2),
            ("C2", 6),
            ("C3", 4),
            ("C4", 4),
        ];
        let mut tables: Vec<DiningTable> = layout
            .iter()
            .zip(1..)
            .map(|(&(number, capacity), id)| DiningTable::new(id, number, capacity))
            .collect();

        let occupied = [
            ("A2", 850.0, 45, "Khun Somchai"),
            ("B1", 450.0, 20, "Khun Wichai"),
            ("B4", 1250.0, 60, "Khun Manee"),
            ("C4", 680.0, 30, "Khun Prasit"),
        ];
        let reserved = [("A4", "Khun Somying"), ("C2", "Khun Suda")];

        for table in &mut tables {
            if let Some(&(_, bill, minutes, guest)) =
                occupied.iter().find(|(n, ..)| *n == table.number)
            {
                table.status = TableStatus::Occupied;
                table.current_bill = Some(bill);
                table.occupied_minutes = Some(minutes);
                table.customer_name = Some(guest.to_string());
            } else if let Some(&(_, guest)) = reserved.iter().find(|(n, _)| *n == table.number) {
                table.status = TableStatus::Reserved;
                table.customer_name = Some(guest.to_string());
            }
        }
        tables
    }

    /// Four open orders, placed relative to `now`.
    pub fn kitchen_queue(now: DateTime<Utc>) -> Vec<KitchenOrder> {
        let order = |id, table: &str, status, minutes, priority, items| KitchenOrder {
            id,
            table_number: table.to_string(),
            items,
            status,
            placed_at: now - Duration::minutes(minutes),
            priority,
        };
        vec![
            order(
                1,
                "A2",
                KitchenStatus::Pending,
                5,
                Priority::High,
                vec![
                    OrderLine::new("Pad Thai with Prawns", 2),
                    OrderLine::new("Tom Yum Goong", 1).with_notes("mild"),
                ],
            ),
            order(
                2,
                "B1",
                KitchenStatus::Preparing,
                12,
                Priority::Normal,
                vec![
                    OrderLine::new("Crab Fried Rice", 1),
                    OrderLine::new("Mixed Fruit Juice", 2),
                ],
            ),
            order(
                3,
                "C3",
                KitchenStatus::Preparing,
                8,
                Priority::Normal,
                vec![
                    OrderLine::new("Som Tam", 1).with_notes("no peanuts"),
                    OrderLine::new("Grilled Chicken", 1),
                    OrderLine::new("Sticky Rice", 2),
                ],
            ),
            order(
                4,
                "A4",
                KitchenStatus::Ready,
                15,
                Priority::Normal,
                vec![OrderLine::new("Seafood Tom Yum", 1).with_notes("extra spicy")],
            ),
        ]
    }
}
