//! Filtering, sorting and baseline comparison over a static vehicle catalog.
//!
//! The presentation layer owns all state; it passes a [`FilterConfig`],
//! [`SortConfig`] and [`Context`] into the pure functions here and gets
//! back an ordered list of borrowed vehicles or formatted strings.
//!
//! ```
//! use vehicle_catalog::{Catalog, Context, FilterConfig, SortConfig, SortDirection};
//!
//! let catalog = Catalog::from_json_str("[]").unwrap();
//! let filter = FilterConfig { max_price: Some(40_000.0), ..Default::default() };
//! let sort = SortConfig::new("safetyRating", SortDirection::Desc);
//! let rows = catalog.view(&filter, &sort, &Context::default());
//! assert!(rows.is_empty());
//! ```

pub mod catalog;
pub mod config;
pub mod delta;
pub mod error;
pub mod export;
pub mod fields;
pub mod filter;
pub mod format;
pub mod models;
pub mod ranks;
pub mod sort;

pub use catalog::Catalog;
pub use delta::{delta, Delta, DeltaPolarity};
pub use error::{CatalogError, Result};
pub use fields::{effective_value, Context, Field, FieldKind, FieldValue, Polarity, WidthFilterType};
pub use filter::filter;
pub use models::{FilterConfig, SortConfig, SortDirection, Vehicle, ViewState};
pub use sort::sort;
