use tracing::{info, warn};

use crate::drag::DragSession;
use crate::error::InventoryFull;
use crate::item::Item;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Slot {
    item: Option<Item>,
}

impl Slot {
    pub fn item(&self) -> Option<&Item> {
        self.item.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }
}

/// Fixed number of slots backed by an ordered item list. Items always occupy
/// the leading slots in list order.
#[derive(Debug, Clone)]
pub struct Inventory {
    items: Vec<Item>,
    slots: Vec<Slot>,
}

impl Inventory {
    pub fn new(slot_count: usize) -> Self {
        Self {
            items: Vec::with_capacity(slot_count),
            slots: vec![Slot::default(); slot_count],
        }
    }

    /// Builds an inventory from `items`; anything past capacity is dropped.
    pub fn with_items(slot_count: usize, items: impl IntoIterator<Item = Item>) -> Self {
        let mut inventory = Self::new(slot_count);
        for item in items {
            // Overflow is logged by add_item.
            inventory.add_item(item).ok();
        }
        inventory
    }

    /// Appends `item`, returning the slot it landed in.
    pub fn add_item(&mut self, item: Item) -> Result<usize, InventoryFull> {
        if self.items.len() >= self.slots.len() {
            warn!(
                target: "cauldron.inventory",
                item = %item,
                capacity = self.slots.len(),
                "inventory full, item dropped"
            );
            return Err(InventoryFull {
                capacity: self.slots.len(),
                item: item.name().to_string(),
            });
        }
        info!(target: "cauldron.inventory", item = %item, "item added");
        self.items.push(item);
        self.refresh_slots();
        Ok(self.items.len() - 1)
    }

    /// Recomputes every slot from the backing list.
    pub fn refresh_slots(&mut self) {
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            slot.item = self.items.get(idx).cloned();
        }
    }

    /// Starts a drag carrying the slot's item. Empty or unknown slots yield
    /// nothing. The item stays in the inventory.
    pub fn on_slot_clicked(&self, index: usize) -> Option<DragSession> {
        let item = self.slots.get(index)?.item()?.clone();
        Some(DragSession {
            item,
            source_slot: Some(index),
        })
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
