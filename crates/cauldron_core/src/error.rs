use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config syntax")]
    Parse(#[from] toml::de::Error),
    #[error("item `{0}` is declared more than once")]
    DuplicateItem(String),
    #[error("{context} references unknown item `{name}`")]
    UnknownItem { context: String, name: String },
    #[error("recipe for `{0}` has no ingredients")]
    EmptyRecipe(String),
    #[error("invalid setting `{field}`: {reason}")]
    InvalidSetting {
        field: &'static str,
        reason: &'static str,
    },
}

/// Returned by [`crate::Inventory::add_item`] when every slot is taken.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("inventory is full ({capacity} slots), `{item}` was not added")]
pub struct InventoryFull {
    pub capacity: usize,
    pub item: String,
}
