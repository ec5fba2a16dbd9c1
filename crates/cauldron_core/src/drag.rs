use bevy_math::{Vec2, Vec3};
use tracing::debug;

use crate::event::WorkbenchEvent;
use crate::item::Item;
use crate::pot::Pot;
use crate::scene::{EntityId, Scene, SceneObject, DRAW_ORDER_FRONT};

/// Drag of a world object, from press to release.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { entity: EntityId, origin: Vec3 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    Deposited(EntityId),
    Returned(EntityId),
}

/// Entity-less drag started from an inventory slot. The slot keeps its item.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    pub item: Item,
    pub source_slot: Option<usize>,
}

#[derive(Debug, Default)]
pub struct WorldDrag {
    state: DragState,
}

impl WorldDrag {
    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Starts dragging the topmost object under `point` if it carries
    /// `draggable_tag` and is still allowed to move.
    pub fn press(&mut self, scene: &Scene, point: Vec2, draggable_tag: &str) -> Option<EntityId> {
        let hit = scene.pick(point)?;
        if hit.tag != draggable_tag {
            self.state = DragState::Idle;
            return None;
        }
        if !hit.movement_allowed {
            return None;
        }
        self.state = DragState::Dragging {
            entity: hit.id,
            origin: hit.position,
        };
        debug!(target: "cauldron.drag", entity = hit.id.0, "drag started");
        Some(hit.id)
    }

    /// Moves the dragged object to `point` on the drag plane.
    pub fn follow(&self, scene: &mut Scene, point: Vec2, events: &mut Vec<WorkbenchEvent>) {
        let DragState::Dragging { entity, .. } = self.state else {
            return;
        };
        if let Some(object) = scene.get_mut(entity) {
            object.position = point.extend(0.0);
            events.push(WorkbenchEvent::EntityMoved {
                entity,
                position: object.position,
            });
        }
    }

    /// Resolves the drop: into the pot when the object overlaps the vessel,
    /// back to where it was picked up otherwise.
    pub fn release(
        &mut self,
        scene: &mut Scene,
        pot: &mut Pot,
        events: &mut Vec<WorkbenchEvent>,
    ) -> Option<DropOutcome> {
        let DragState::Dragging { entity, origin } = std::mem::take(&mut self.state) else {
            return None;
        };
        let object = scene.get_mut(entity)?;
        if pot.overlaps_vessel(&object.bounds()) {
            pot.deposit_entity(object, events);
            Some(DropOutcome::Deposited(entity))
        } else {
            return_to(object, origin, events);
            Some(DropOutcome::Returned(entity))
        }
    }

    /// Abandons the drag, returning the object to its origin.
    pub fn cancel(&mut self, scene: &mut Scene, events: &mut Vec<WorkbenchEvent>) -> Option<DropOutcome> {
        let DragState::Dragging { entity, origin } = std::mem::take(&mut self.state) else {
            return None;
        };
        let object = scene.get_mut(entity)?;
        return_to(object, origin, events);
        debug!(target: "cauldron.drag", entity = entity.0, "drag cancelled");
        Some(DropOutcome::Returned(entity))
    }
}

fn return_to(object: &mut SceneObject, origin: Vec3, events: &mut Vec<WorkbenchEvent>) {
    object.position = origin;
    object.movement_allowed = true;
    object.draw_order = DRAW_ORDER_FRONT;
    events.push(WorkbenchEvent::EntityMoved {
        entity: object.id,
        position: origin,
    });
    events.push(WorkbenchEvent::DrawOrderChanged {
        entity: object.id,
        order: DRAW_ORDER_FRONT,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pot::Vessel;

    const TAG: &str = "Ingredient";

    fn setup() -> (Scene, Pot) {
        let mut scene = Scene::default();
        scene.insert(
            SceneObject::new(EntityId(1), TAG, Vec3::new(200.0, 0.0, 0.0), Vec2::splat(20.0))
                .with_item(Item::ingredient("Herb", "herb.png")),
        );
        scene.insert(SceneObject::new(
            EntityId(2),
            "Decoration",
            Vec3::new(-200.0, 0.0, 0.0),
            Vec2::splat(20.0),
        ));
        let pot = Pot::new(Vessel::new(Vec3::ZERO, Vec2::splat(50.0), None));
        (scene, pot)
    }

    #[test]
    fn untagged_objects_are_not_draggable() {
        let (scene, _) = setup();
        let mut drag = WorldDrag::default();
        assert_eq!(drag.press(&scene, Vec2::new(-200.0, 0.0), TAG), None);
        assert_eq!(drag.state(), DragState::Idle);
        assert_eq!(drag.press(&scene, Vec2::new(0.0, 500.0), TAG), None);
    }

    #[test]
    fn drop_on_vessel_deposits() {
        let (mut scene, mut pot) = setup();
        let mut events = Vec::new();
        let mut drag = WorldDrag::default();
        assert_eq!(drag.press(&scene, Vec2::new(200.0, 0.0), TAG), Some(EntityId(1)));
        drag.follow(&mut scene, Vec2::new(10.0, 5.0), &mut events);
        let outcome = drag.release(&mut scene, &mut pot, &mut events);
        assert_eq!(outcome, Some(DropOutcome::Deposited(EntityId(1))));
        assert_eq!(drag.state(), DragState::Idle);
        assert_eq!(pot.state().deposited_items().len(), 1);

        // Deposited objects can no longer be picked up.
        assert_eq!(drag.press(&scene, Vec2::ZERO, TAG), None);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn cancel_restores_origin() {
        let (mut scene, _) = setup();
        let mut events = Vec::new();
        let mut drag = WorldDrag::default();
        drag.press(&scene, Vec2::new(200.0, 0.0), TAG);
        drag.follow(&mut scene, Vec2::new(120.0, 40.0), &mut events);
        assert_eq!(
            drag.cancel(&mut scene, &mut events),
            Some(DropOutcome::Returned(EntityId(1)))
        );
        let object = scene.get(EntityId(1)).unwrap();
        assert_eq!(object.position, Vec3::new(200.0, 0.0, 0.0));
        assert!(object.movement_allowed);
    }
}
