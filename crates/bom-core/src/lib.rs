//! BoM Studio Core
//!
//! Framework-free layer behind the configurator UI:
//! - catalog: category tree processing (flat BoM + display tree)
//! - table: search, pagination and CSV export of parts
//! - session: wizard state, per-field fetch state and reducers
//! - scenario: economic-shock form and its validation
//! - api: backend endpoints and wire types
//! - chat / notify: assistant transcript and toast queue

pub mod api;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod notify;
pub mod scenario;
pub mod session;
pub mod table;

pub use catalog::{CategoryMap, CategoryNode, CategoryTreeItem, PartItem, TopLevelFilter};
pub use config::AppConfig;
pub use error::{AppError, AppResult, CatalogError};
pub use session::{Action, Effect, Remote, Session};
