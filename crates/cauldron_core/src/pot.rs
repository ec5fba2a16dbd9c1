use bevy_math::{Rect, Vec2, Vec3};
use tracing::{debug, info, warn};

use crate::event::WorkbenchEvent;
use crate::geometry::{bounds_at, overlaps};
use crate::item::Item;
use crate::launch::{LaunchId, Launches};
use crate::recipe::RecipeTable;
use crate::scene::{EntityId, Scene, SceneObject, DRAW_ORDER_BEHIND, DRAW_ORDER_FRONT};

/// Depth deposited objects are pushed to so they sit behind the vessel.
const DEPOSIT_DEPTH: f32 = -1.0;

/// The fixed region ingredients are dropped into.
#[derive(Clone, Debug, PartialEq)]
pub struct Vessel {
    position: Vec3,
    size: Vec2,
    result_anchor: Option<Vec3>,
}

impl Vessel {
    pub fn new(position: Vec3, size: Vec2, result_anchor: Option<Vec3>) -> Self {
        Self {
            position,
            size,
            result_anchor,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn bounds(&self) -> Rect {
        bounds_at(self.position.truncate(), self.size)
    }

    /// Where brewed results appear; the vessel itself when no anchor is set.
    pub fn result_anchor(&self) -> Vec3 {
        self.result_anchor.unwrap_or(self.position)
    }
}

/// What has been dropped into the vessel since the last mix.
///
/// `deposited_entities` only holds world objects; items dragged in from the
/// inventory have no entity, so it is a subset of what `deposited_items`
/// accounts for.
#[derive(Debug, Default, Clone)]
pub struct PotState {
    deposited_entities: Vec<EntityId>,
    deposited_items: Vec<Item>,
}

impl PotState {
    pub fn deposited_entities(&self) -> &[EntityId] {
        &self.deposited_entities
    }

    pub fn deposited_items(&self) -> &[Item] {
        &self.deposited_items
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MixOutcome {
    Brewed { result: Item, launch: LaunchId },
    NoMatch,
}

#[derive(Debug)]
pub struct Pot {
    vessel: Vessel,
    state: PotState,
    inventory_ingredient_count: u32,
    mix_enabled: bool,
}

impl Pot {
    pub fn new(vessel: Vessel) -> Self {
        Self {
            vessel,
            state: PotState::default(),
            inventory_ingredient_count: 0,
            mix_enabled: false,
        }
    }

    pub fn vessel(&self) -> &Vessel {
        &self.vessel
    }

    pub fn state(&self) -> &PotState {
        &self.state
    }

    /// Diagnostic only: how many items arrived from the inventory since the
    /// last mix.
    pub fn inventory_ingredient_count(&self) -> u32 {
        self.inventory_ingredient_count
    }

    pub fn mix_enabled(&self) -> bool {
        self.mix_enabled
    }

    pub fn is_pointer_over_vessel(&self, pointer_world: Option<Vec2>) -> bool {
        pointer_world.is_some_and(|point| self.vessel.bounds().contains(point))
    }

    pub fn overlaps_vessel(&self, bounds: &Rect) -> bool {
        overlaps(bounds, &self.vessel.bounds())
    }

    /// Snaps a dropped world object into the vessel and records its item.
    pub fn deposit_entity(&mut self, object: &mut SceneObject, events: &mut Vec<WorkbenchEvent>) {
        object.position = self.vessel.position.truncate().extend(DEPOSIT_DEPTH);
        object.movement_allowed = false;
        object.draw_order = DRAW_ORDER_BEHIND;
        events.push(WorkbenchEvent::EntityMoved {
            entity: object.id,
            position: object.position,
        });
        events.push(WorkbenchEvent::DrawOrderChanged {
            entity: object.id,
            order: object.draw_order,
        });

        if !self.state.deposited_entities.contains(&object.id) {
            self.state.deposited_entities.push(object.id);
        }

        match &object.item {
            Some(item) => {
                self.state.deposited_items.push(item.clone());
                info!(
                    target: "cauldron.pot",
                    item = %item,
                    count = self.state.deposited_items.len(),
                    "ingredient dropped into pot"
                );
            }
            None => warn!(
                target: "cauldron.pot",
                entity = object.id.0,
                "deposited object carries no item"
            ),
        }
        self.refresh_mix_enabled(events);
    }

    pub fn deposit_from_inventory(&mut self, item: Item, events: &mut Vec<WorkbenchEvent>) {
        self.state.deposited_items.push(item);
        self.inventory_ingredient_count += 1;
        info!(
            target: "cauldron.pot",
            count = self.state.deposited_items.len(),
            from_inventory = self.inventory_ingredient_count,
            "inventory ingredient added to pot"
        );
        self.refresh_mix_enabled(events);
    }

    pub fn refresh_mix_enabled(&mut self, events: &mut Vec<WorkbenchEvent>) {
        let enabled = self.state.deposited_items.len() > 1;
        if enabled != self.mix_enabled {
            self.mix_enabled = enabled;
            events.push(WorkbenchEvent::MixEnabledChanged { enabled });
        }
    }

    /// Evaluates the pot against `recipes`, launches the result on a match and
    /// empties the pot either way.
    pub fn mix(
        &mut self,
        recipes: &RecipeTable,
        scene: &mut Scene,
        launches: &mut Launches,
        events: &mut Vec<WorkbenchEvent>,
    ) -> MixOutcome {
        let outcome = match recipes.find_match(&self.state.deposited_items) {
            Some(recipe) => {
                let result = recipe.result().clone();
                info!(target: "cauldron.pot", result = %result, "recipe matched");
                let launch = launches.start(result.clone(), self.vessel.result_anchor(), events);
                MixOutcome::Brewed { result, launch }
            }
            None => {
                info!(
                    target: "cauldron.pot",
                    count = self.state.deposited_items.len(),
                    "no recipe matches pot contents"
                );
                MixOutcome::NoMatch
            }
        };

        for entity in self.state.deposited_entities.drain(..) {
            if scene.remove(entity).is_some() {
                events.push(WorkbenchEvent::EntityDestroyed { entity });
            }
        }
        for object in scene.iter_mut() {
            object.movement_allowed = true;
            if object.draw_order != DRAW_ORDER_FRONT {
                object.draw_order = DRAW_ORDER_FRONT;
                events.push(WorkbenchEvent::DrawOrderChanged {
                    entity: object.id,
                    order: DRAW_ORDER_FRONT,
                });
            }
        }

        self.state.deposited_items.clear();
        debug!(
            target: "cauldron.pot",
            from_inventory = self.inventory_ingredient_count,
            "pot emptied"
        );
        self.inventory_ingredient_count = 0;
        self.refresh_mix_enabled(events);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::Recipe;

    fn item(name: &str) -> Item {
        Item::ingredient(name, format!("{name}.png"))
    }

    fn pot() -> Pot {
        Pot::new(Vessel::new(Vec3::ZERO, Vec2::splat(100.0), None))
    }

    fn ingredient(id: u64, name: &str) -> SceneObject {
        SceneObject::new(EntityId(id), "Ingredient", Vec3::new(30.0, 0.0, 0.0), Vec2::splat(20.0))
            .with_item(item(name))
    }

    #[test]
    fn mix_enabled_needs_two_items() {
        let mut events = Vec::new();
        let mut pot = pot();
        pot.deposit_from_inventory(item("Herb"), &mut events);
        assert!(!pot.mix_enabled());
        let mut object = ingredient(1, "Water");
        pot.deposit_entity(&mut object, &mut events);
        assert!(pot.mix_enabled());
        assert_eq!(
            events.last(),
            Some(&WorkbenchEvent::MixEnabledChanged { enabled: true })
        );
    }

    #[test]
    fn deposit_snaps_behind_vessel_once() {
        let mut events = Vec::new();
        let mut pot = pot();
        let mut object = ingredient(7, "Herb");
        pot.deposit_entity(&mut object, &mut events);
        pot.deposit_entity(&mut object, &mut events);
        assert_eq!(object.position, Vec3::new(0.0, 0.0, DEPOSIT_DEPTH));
        assert!(!object.movement_allowed);
        assert_eq!(object.draw_order, DRAW_ORDER_BEHIND);
        assert_eq!(pot.state().deposited_entities(), &[EntityId(7)]);
    }

    #[test]
    fn deposit_without_item_still_tracks_entity() {
        let mut events = Vec::new();
        let mut pot = pot();
        let mut object =
            SceneObject::new(EntityId(3), "Ingredient", Vec3::ZERO, Vec2::splat(10.0));
        pot.deposit_entity(&mut object, &mut events);
        assert_eq!(pot.state().deposited_entities().len(), 1);
        assert!(pot.state().deposited_items().is_empty());
    }

    #[test]
    fn pointer_over_vessel_requires_world_point() {
        let pot = pot();
        assert!(pot.is_pointer_over_vessel(Some(Vec2::new(10.0, -10.0))));
        assert!(!pot.is_pointer_over_vessel(Some(Vec2::new(80.0, 0.0))));
        assert!(!pot.is_pointer_over_vessel(None));
    }

    #[test]
    fn result_anchor_falls_back_to_vessel() {
        let vessel = Vessel::new(Vec3::new(1.0, 2.0, 0.0), Vec2::ONE, None);
        assert_eq!(vessel.result_anchor(), Vec3::new(1.0, 2.0, 0.0));
        let anchored = Vessel::new(Vec3::ZERO, Vec2::ONE, Some(Vec3::Y));
        assert_eq!(anchored.result_anchor(), Vec3::Y);
    }

    #[test]
    fn mix_clears_state_and_destroys_entities() {
        let mut events = Vec::new();
        let mut pot = pot();
        let mut scene = Scene::default();
        let mut launches = Launches::new(1.0, 0.5);
        let recipes = RecipeTable::new(vec![Recipe::new(
            item("Potion"),
            vec![item("Herb"), item("Water")],
        )]);

        let mut object = ingredient(1, "Water");
        pot.deposit_entity(&mut object, &mut events);
        scene.insert(object);
        scene.insert(ingredient(2, "Herb"));
        pot.deposit_from_inventory(item("Herb"), &mut events);

        let outcome = pot.mix(&recipes, &mut scene, &mut launches, &mut events);
        assert!(matches!(outcome, MixOutcome::Brewed { ref result, .. } if result.name() == "Potion"));
        assert!(events.contains(&WorkbenchEvent::EntityDestroyed {
            entity: EntityId(1)
        }));
        assert!(scene.get(EntityId(1)).is_none());
        assert!(scene.iter().all(|o| o.movement_allowed));
        assert!(pot.state().deposited_items().is_empty());
        assert!(pot.state().deposited_entities().is_empty());
        assert_eq!(pot.inventory_ingredient_count(), 0);
        assert!(!pot.mix_enabled());
        assert_eq!(launches.len(), 1);
    }
}
