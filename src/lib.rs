#![warn(missing_docs)]

//! # posboard
//!
//! The list views of a point-of-sale back office (products, sales,
//! customers, staff, inventory, tables and the kitchen display) as
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs) components.
//!
//! ## Overview
//!
//! Every page of the dashboard is the same component over a different record
//! type: a [`ListView`] owning an in-memory collection, narrowed by a
//! [`filter::Criteria`] and windowed by the [`paginator`]. The collection is
//! seeded once, from the [`mock`] generator or a one-shot fetch against the
//! demo JSON API ([`source`]), and then changed locally through
//! add/update/remove.
//!
//! - **Filtering**: case-insensitive substring (or fuzzy) search over each
//!   record's search fields, plus exact `key = value` constraints.
//! - **Pagination**: clamped page numbers, ellipsis-compressed page lists and
//!   a "Showing 1-10 of 25" summary.
//! - **Mutations**: validated drafts, patches, removal, aggregate stats over
//!   the unfiltered collection.
//! - **Loading**: fetches run as bubbletea commands; stale responses are
//!   dropped and failed ones can be retried.
//!
//! ## Quick start
//!
//! ```rust
//! use posboard::prelude::*;
//!
//! let mut customers = ListView::new(MockGenerator::seeded(1).customers(25), 10)
//!     .with_title("Customers")
//!     .with_item_name("customer", "customers");
//! assert_eq!(customers.total_pages(), 3);
//!
//! customers.set_search("customer2");
//! assert_eq!(customers.len(), 7);
//! assert_eq!(customers.summary(), "Showing 1-7 of 7 customers");
//!
//! let id = customers
//!     .add_item(CustomerDraft {
//!         name: "Walk-in Guest".into(),
//!         email: "guest@example.com".into(),
//!         phone: "0812345678".into(),
//!         ..CustomerDraft::default()
//!     })
//!     .unwrap();
//! assert_eq!(id, 26);
//! assert_eq!(customers.stats().total, 26);
//! ```
//!
//! ## Running a view
//!
//! `ListView<T>` implements `bubbletea_rs::Model`, so it can be embedded in
//! an application model and fed its messages:
//!
//! ```rust
//! use posboard::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     tables: ListView<DiningTable>,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let tables = ListView::new(MockGenerator::floor_plan(), 10).with_title("Tables");
//!         (Self { tables }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(scroll) = msg.downcast_ref::<ScrollToTopMsg>() {
//!             let _ = scroll.page;
//!             return None;
//!         }
//!         self.tables.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.tables.view()
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! The crate logs through `tracing` and never installs a subscriber.

pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod format;
pub mod help;
pub mod key;
pub mod list;
pub mod menu;
pub mod mock;
pub mod paginator;
pub mod session;
pub mod source;

pub use config::DashboardConfig;
pub use error::{ConfigError, FetchError, SessionError, ValidationError};
pub use filter::{Criteria, Filterable, MatchMode};
pub use list::{ListView, Record};
pub use paginator::{PageToken, PageWindow};
pub use session::{Role, Session};

/// Everything a dashboard page needs in one import.
///
/// ```rust
/// use posboard::prelude::*;
///
/// let view = ListView::new(MockGenerator::seeded(2).inventory(30), 10);
/// assert_eq!(view.page_numbers().len(), 3);
/// ```
pub mod prelude {
    pub use crate::config::DashboardConfig;
    pub use crate::domain::{
        ApiUser, Cart, Customer, CustomerDraft, Dashboard, DiningTable, InventoryDraft,
        InventoryItem, InventorySummary, KitchenOrder, Product, ProductDraft, Restock, Sale,
        SaleSource, StockLevel, TableStats, Urgency,
    };
    pub use crate::error::{ConfigError, FetchError, SessionError, ValidationError};
    pub use crate::filter::{Criteria, Filterable, MatchMode};
    pub use crate::help::Model as HelpModel;
    pub use crate::key::{Binding, KeyMap, KeyPress};
    pub use crate::list::{
        DefaultDelegate, Draft, FilterState, InsertPosition, ItemDelegate, ListKeyMap, ListStyles,
        ListView, LoadedMsg, Patch, Record, ScrollToTopMsg, Stats,
    };
    pub use crate::menu::{default_menu, visible_entries, NavEntry};
    pub use crate::mock::MockGenerator;
    pub use crate::paginator::{Model as Paginator, PageToken, PageWindow};
    pub use crate::session::{FileStore, MemoryStore, Role, Session, SessionStore, SessionUser};
    pub use crate::source::{ApiClient, DataSource, Paged, ResourceSource, StaticSource};
}
