pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{cli::LocalStorage, toml_config::DirectoryConfig};
pub use crate::core::links::{LinkBases, MapLinks};
pub use crate::core::loader::{CatalogLoader, LoadOutcome};
pub use crate::core::projection::project;
pub use crate::core::selection::{Selection, Session};
pub use crate::domain::model::{Catalog, DirectoryKind, Merchant, ProjectedItem, Restaurant, Selector};
pub use crate::utils::error::{DirectoryError, LoadFailure, Result};
