use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Opaque reference to an image asset. The core never loads it; hosts map it
/// to whatever their renderer understands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageRef(Arc<str>);

impl ImageRef {
    pub fn new(path: impl AsRef<str>) -> Self {
        Self(Arc::from(path.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    #[default]
    Ingredient,
    FinishedProduct,
}

/// Immutable item descriptor. Clones share the same name and image storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    name: Arc<str>,
    image: ImageRef,
    kind: ItemKind,
}

impl Item {
    pub fn new(name: impl AsRef<str>, image: ImageRef, kind: ItemKind) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            image,
            kind,
        }
    }

    pub fn ingredient(name: impl AsRef<str>, image: impl AsRef<str>) -> Self {
        Self::new(name, ImageRef::new(image), ItemKind::Ingredient)
    }

    pub fn finished_product(name: impl AsRef<str>, image: impl AsRef<str>) -> Self {
        Self::new(name, ImageRef::new(image), ItemKind::FinishedProduct)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Recipe identity: two items are interchangeable when their names match,
    /// regardless of image or kind.
    pub fn same_name(&self, other: &Item) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Read-only lookup of every item known to the game, in declaration order.
#[derive(Debug, Default, Clone)]
pub struct ItemCatalog {
    items: Vec<Item>,
    by_name: HashMap<Arc<str>, usize>,
}

impl ItemCatalog {
    /// Returns `None` when `item` reuses a name already in the catalog.
    pub(crate) fn insert(&mut self, item: Item) -> Option<&Item> {
        if self.by_name.contains_key(&item.name) {
            return None;
        }
        let idx = self.items.len();
        self.by_name.insert(item.name.clone(), idx);
        self.items.push(item);
        self.items.get(idx)
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.by_name.get(name).and_then(|idx| self.items.get(*idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
