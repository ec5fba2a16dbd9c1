use bevy_math::{Vec2, Vec3};

use crate::item::{ImageRef, Item};
use crate::launch::LaunchId;
use crate::scene::EntityId;

/// Externally visible effects queued by the workbench. The host drains them
/// once per frame and applies them to its own scene, renderer and UI.
#[derive(Clone, Debug, PartialEq)]
pub enum WorkbenchEvent {
    EntityMoved { entity: EntityId, position: Vec3 },
    DrawOrderChanged { entity: EntityId, order: i32 },
    EntityDestroyed { entity: EntityId },
    ResultSpawned {
        launch: LaunchId,
        item: Item,
        position: Vec3,
    },
    ResultMoved { launch: LaunchId, position: Vec3 },
    ResultFinished { launch: LaunchId },
    MixEnabledChanged { enabled: bool },
    SlotsRefreshed,
    IndicatorShown {
        image: ImageRef,
        position: Option<Vec2>,
    },
    IndicatorMoved { position: Vec2 },
    IndicatorHidden,
    InventoryPanelToggled { visible: bool },
}
