use tracing::{debug, info};

use crate::config::{BrewSettings, BrewSetup};
use crate::drag::{DragSession, DragState, DropOutcome, WorldDrag};
use crate::error::InventoryFull;
use crate::event::WorkbenchEvent;
use crate::indicator::{Canvas, DragIndicator};
use crate::input::{PointerSample, PointerTracker};
use crate::inventory::Inventory;
use crate::item::Item;
use crate::launch::{LaunchId, Launches};
use crate::pot::{MixOutcome, Pot, Vessel};
use crate::recipe::RecipeTable;
use crate::scene::{EntityId, Scene, SceneObject};

/// Per-frame driver tying pointer input, the scene, the pot and the inventory
/// together. The host calls [`Workbench::tick`] once per frame and applies
/// whatever [`Workbench::drain_events`] hands back.
#[derive(Debug)]
pub struct Workbench {
    ingredient_tag: String,
    recipes: RecipeTable,
    scene: Scene,
    pot: Pot,
    inventory: Inventory,
    drag: WorldDrag,
    session: Option<DragSession>,
    indicator: DragIndicator,
    launches: Launches,
    tracker: PointerTracker,
    pointer: PointerSample,
    panel_visible: bool,
    events: Vec<WorkbenchEvent>,
}

impl Workbench {
    pub fn new(
        settings: &BrewSettings,
        recipes: RecipeTable,
        vessel: Vessel,
        inventory: Inventory,
        canvas: Option<Canvas>,
    ) -> Self {
        Self {
            ingredient_tag: settings.ingredient_tag.clone(),
            recipes,
            scene: Scene::default(),
            pot: Pot::new(vessel),
            inventory,
            drag: WorldDrag::default(),
            session: None,
            indicator: DragIndicator::new(canvas),
            launches: Launches::new(settings.result_move_distance, settings.launch_duration),
            tracker: PointerTracker::default(),
            pointer: PointerSample::default(),
            panel_visible: false,
            events: Vec::new(),
        }
    }

    /// Workbench for a resolved config. World placements are left to the
    /// host, which registers them with its own entity ids.
    pub fn from_setup(setup: &BrewSetup, canvas: Option<Canvas>) -> Self {
        let inventory = Inventory::with_items(
            setup.settings.inventory_slots,
            setup.starting_inventory.iter().cloned(),
        );
        Self::new(
            &setup.settings,
            setup.recipes.clone(),
            setup.vessel.clone(),
            inventory,
            canvas,
        )
    }

    pub fn register_object(&mut self, object: SceneObject) {
        self.scene.insert(object);
    }

    /// Forgets an object the host destroyed on its own.
    pub fn unregister_object(&mut self, entity: EntityId) -> Option<SceneObject> {
        if matches!(self.drag.state(), DragState::Dragging { entity: dragged, .. } if dragged == entity)
        {
            self.drag = WorldDrag::default();
        }
        self.scene.remove(entity)
    }

    pub fn tick(&mut self, pointer: PointerSample, dt: f32) {
        let edges = self.tracker.update(pointer.down);
        self.pointer = pointer;
        self.pot.refresh_mix_enabled(&mut self.events);

        if pointer.over_ui {
            self.drag.cancel(&mut self.scene, &mut self.events);
        } else if let Some(world) = pointer.world {
            if edges.pressed {
                self.drag.cancel(&mut self.scene, &mut self.events);
                self.drag.press(&self.scene, world, &self.ingredient_tag);
            }
            if edges.held {
                self.drag.follow(&mut self.scene, world, &mut self.events);
            }
        }
        if edges.released {
            match self.drag.release(&mut self.scene, &mut self.pot, &mut self.events) {
                Some(DropOutcome::Deposited(entity)) => {
                    debug!(target: "cauldron.drag", entity = entity.0, "dropped into pot")
                }
                Some(DropOutcome::Returned(entity)) => {
                    debug!(target: "cauldron.drag", entity = entity.0, "returned to origin")
                }
                None => {}
            }
        }

        self.indicator.follow(&pointer, &mut self.events);
        if edges.released {
            self.end_inventory_drag();
        }

        self.launches.advance(dt, &mut self.events);
    }

    /// Host callback for a pointer press on inventory slot `index`.
    pub fn press_slot(&mut self, index: usize) -> bool {
        let Some(session) = self.inventory.on_slot_clicked(index) else {
            return false;
        };
        debug!(
            target: "cauldron.drag",
            slot = index,
            item = %session.item,
            "inventory drag started"
        );
        self.indicator
            .show(session.item.image().clone(), &self.pointer, &mut self.events);
        self.session = Some(session);
        true
    }

    fn end_inventory_drag(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        if self.pot.is_pointer_over_vessel(self.pointer.world) {
            self.pot.deposit_from_inventory(session.item, &mut self.events);
        } else {
            debug!(target: "cauldron.drag", item = %session.item, "inventory drag discarded");
        }
        self.indicator.hide(&mut self.events);
    }

    pub fn mix(&mut self) -> MixOutcome {
        self.pot.mix(
            &self.recipes,
            &mut self.scene,
            &mut self.launches,
            &mut self.events,
        )
    }

    pub fn add_item(&mut self, item: Item) -> Result<usize, InventoryFull> {
        let slot = self.inventory.add_item(item)?;
        self.events.push(WorkbenchEvent::SlotsRefreshed);
        Ok(slot)
    }

    pub fn toggle_inventory_panel(&mut self) -> bool {
        self.panel_visible = !self.panel_visible;
        info!(target: "cauldron.inventory", visible = self.panel_visible, "inventory panel toggled");
        self.events.push(WorkbenchEvent::InventoryPanelToggled {
            visible: self.panel_visible,
        });
        self.panel_visible
    }

    pub fn cancel_launch(&mut self, launch: LaunchId) -> bool {
        self.launches.cancel(launch)
    }

    pub fn drain_events(&mut self) -> Vec<WorkbenchEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn mix_enabled(&self) -> bool {
        self.pot.mix_enabled()
    }

    pub fn pot(&self) -> &Pot {
        &self.pot
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn recipes(&self) -> &RecipeTable {
        &self.recipes
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn indicator(&self) -> &DragIndicator {
        &self.indicator
    }

    pub fn launches(&self) -> &Launches {
        &self.launches
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }
}
