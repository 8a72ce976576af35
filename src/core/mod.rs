pub mod links;
pub mod loader;
pub mod projection;
pub mod selection;

pub use crate::domain::model::{
    Catalog, CategoryEntry, DirectoryKind, Merchant, ProjectedItem, RegionEntry, Restaurant,
    Selector,
};
pub use crate::domain::ports::{ConfigProvider, Listing, Storage};
pub use crate::utils::error::Result;
