//! Engine-agnostic brewing logic: items, recipes, the drag state machine,
//! the pot, the inventory and the per-frame workbench that drives them.

pub mod config;
pub mod drag;
pub mod error;
pub mod event;
pub mod geometry;
pub mod indicator;
pub mod input;
pub mod inventory;
pub mod item;
pub mod launch;
pub mod pot;
pub mod recipe;
pub mod reveal;
pub mod scene;
pub mod workbench;

pub use config::{BrewConfig, BrewSettings, BrewSetup, Placement};
pub use drag::{DragSession, DragState, DropOutcome};
pub use error::{ConfigError, InventoryFull};
pub use event::WorkbenchEvent;
pub use indicator::{Canvas, CanvasMode};
pub use input::PointerSample;
pub use inventory::{Inventory, Slot};
pub use item::{ImageRef, Item, ItemCatalog, ItemKind};
pub use launch::LaunchId;
pub use pot::{MixOutcome, PotState, Vessel};
pub use recipe::{Recipe, RecipeTable};
pub use reveal::TextReveal;
pub use scene::{EntityId, SceneObject, DRAW_ORDER_BEHIND, DRAW_ORDER_FRONT};
pub use workbench::Workbench;
