use std::path::PathBuf;

use bevy::input::mouse::MouseButton;
use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::render::camera::Camera;
use bevy::utils::{HashMap, HashSet};
use bevy::window::PrimaryWindow;
use cauldron_core::{
    BrewConfig, BrewSetup, Canvas, ConfigError, EntityId, ImageRef, Item, LaunchId,
    PointerSample, SceneObject, Workbench, WorkbenchEvent, DRAW_ORDER_FRONT,
};
use tracing::{error, info, warn};

const DEFAULT_CONFIG_PATH: &str = "assets/cauldron.toml";
/// World depth of one draw-order step; keeps order dominant over position z.
const DRAW_ORDER_DEPTH: f32 = 10.0;
const RESULT_DEPTH: f32 = 50.0;
const VESSEL_COLOR: Color = Color::srgb(0.32, 0.22, 0.38);

/// Wires the workbench into the frame loop: registers world objects, samples
/// the pointer, ticks, then applies the queued effects.
pub struct BrewingPlugin;

impl Plugin for BrewingPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<BrewBook>() {
            app.insert_resource(BrewBook::from_env());
        }
        if app
            .world()
            .get_resource::<ButtonInput<MouseButton>>()
            .is_none()
        {
            app.world_mut()
                .insert_resource(ButtonInput::<MouseButton>::default());
        }

        app.init_resource::<Brewery>()
            .init_resource::<PointerInput>()
            .add_event::<UiSignal>()
            .add_systems(Startup, spawn_scene)
            .add_systems(
                Update,
                (
                    register_world_objects,
                    forget_despawned.after(register_world_objects),
                    sample_pointer,
                    tick_workbench
                        .after(sample_pointer)
                        .after(forget_despawned),
                    apply_workbench_events.after(tick_workbench),
                ),
            );
    }
}

/// Resolved configuration the workbench and scene are built from.
#[derive(Resource, Clone, Debug)]
pub struct BrewBook(pub BrewSetup);

impl BrewBook {
    /// Loads `CAULDRON_CONFIG`, or the default path when it exists, falling
    /// back to the bundled configuration when the file is unusable.
    pub fn from_env() -> Self {
        let path = match std::env::var("CAULDRON_CONFIG") {
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => Some(PathBuf::from(DEFAULT_CONFIG_PATH)).filter(|p| p.exists()),
        };

        let setup = match path {
            Some(path) => BrewConfig::from_path(&path)
                .and_then(|config| config.build())
                .or_else(|err| {
                    warn!(
                        target: "cauldron.config",
                        "config {} unusable ({err}), using built-in recipes",
                        path.display()
                    );
                    BrewConfig::builtin().and_then(|config| config.build())
                }),
            None => BrewConfig::builtin().and_then(|config| config.build()),
        };

        match setup {
            Ok(setup) => Self::from_setup(setup),
            Err(err) => {
                error!(target: "cauldron.config", "built-in config invalid: {err}");
                Self::from_setup(BrewSetup::bare())
            }
        }
    }

    pub fn from_toml_str(data: &str) -> Result<Self, ConfigError> {
        let setup = BrewConfig::from_toml_str(data)?.build()?;
        Ok(Self(setup))
    }

    fn from_setup(mut setup: BrewSetup) -> Self {
        let overridden = setup.settings.clone().overridden_by_env();
        match overridden.validate() {
            Ok(()) => setup.settings = overridden,
            Err(err) => warn!(target: "cauldron.config", "ignoring environment overrides: {err}"),
        }
        Self(setup)
    }
}

/// The workbench plus the mapping between its handles and Bevy entities.
#[derive(Resource)]
pub struct Brewery {
    pub workbench: Workbench,
    links: HashMap<EntityId, Entity>,
    result_sprites: HashMap<LaunchId, Entity>,
}

impl FromWorld for Brewery {
    fn from_world(world: &mut World) -> Self {
        let book = world
            .get_resource::<BrewBook>()
            .cloned()
            .unwrap_or_else(|| BrewBook(BrewSetup::bare()));
        let window_size = world
            .query_filtered::<&Window, With<PrimaryWindow>>()
            .get_single(world)
            .map(|window| window.size())
            .unwrap_or_default();
        Self {
            workbench: Workbench::from_setup(&book.0, Some(Canvas::screen_overlay(window_size))),
            links: HashMap::default(),
            result_sprites: HashMap::default(),
        }
    }
}

/// Latest pointer sample. Written by [`sample_pointer`] when a window exists;
/// headless hosts may write it directly.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PointerInput(pub PointerSample);

/// Workbench effects the world layer does not consume, forwarded to the UI.
#[derive(Event, Debug, Clone)]
pub struct UiSignal(pub WorkbenchEvent);

/// A world object the workbench can pick.
#[derive(Component, Debug, Clone)]
pub struct WorldObject {
    pub tag: String,
    pub item: Option<Item>,
    pub size: Vec2,
}

#[derive(Component)]
pub struct VesselSprite;

#[derive(Component, Debug, Clone, Copy)]
pub struct ResultSprite(pub LaunchId);

pub fn render_depth(position_z: f32, draw_order: i32) -> f32 {
    draw_order as f32 * DRAW_ORDER_DEPTH + position_z
}

pub(crate) fn image_handle(assets: Option<&AssetServer>, image: &ImageRef) -> Handle<Image> {
    assets
        .map(|server| server.load(image.as_str().to_owned()))
        .unwrap_or_default()
}

fn spawn_scene(mut commands: Commands, book: Res<BrewBook>, assets: Option<Res<AssetServer>>) {
    let setup = &book.0;
    commands.spawn((
        Sprite::from_color(VESSEL_COLOR, setup.vessel.size()),
        Transform::from_translation(setup.vessel.position()),
        VesselSprite,
    ));

    for placement in &setup.placements {
        commands.spawn((
            Sprite {
                image: image_handle(assets.as_deref(), placement.item.image()),
                custom_size: Some(placement.size),
                ..default()
            },
            Transform::from_translation(
                placement
                    .position
                    .extend(render_depth(0.0, DRAW_ORDER_FRONT)),
            ),
            WorldObject {
                tag: setup.settings.ingredient_tag.clone(),
                item: Some(placement.item.clone()),
                size: placement.size,
            },
        ));
    }
    info!(target: "cauldron.scene", placements = setup.placements.len(), "scene spawned");
}

fn register_world_objects(
    mut brewery: ResMut<Brewery>,
    added: Query<(Entity, &WorldObject, &Transform), Added<WorldObject>>,
) {
    for (entity, object, transform) in &added {
        let id = EntityId(entity.to_bits());
        let mut record = SceneObject::new(
            id,
            object.tag.clone(),
            transform.translation.truncate().extend(0.0),
            object.size,
        );
        if let Some(item) = &object.item {
            record = record.with_item(item.clone());
        }
        brewery.links.insert(id, entity);
        brewery.workbench.register_object(record);
    }
}

fn forget_despawned(
    mut removed_objects: RemovedComponents<WorldObject>,
    mut removed_results: RemovedComponents<ResultSprite>,
    mut brewery: ResMut<Brewery>,
) {
    let brewery = &mut *brewery;
    for entity in removed_objects.read() {
        let id = EntityId(entity.to_bits());
        brewery.links.remove(&id);
        brewery.workbench.unregister_object(id);
    }
    for entity in removed_results.read() {
        let launch = brewery
            .result_sprites
            .iter()
            .find(|(_, sprite)| **sprite == entity)
            .map(|(launch, _)| *launch);
        if let Some(launch) = launch {
            brewery.result_sprites.remove(&launch);
            brewery.workbench.cancel_launch(launch);
        }
    }
}

fn sample_pointer(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    interactions: Query<&Interaction>,
    mut input: ResMut<PointerInput>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let down = buttons.pressed(MouseButton::Left);
    let Some(screen) = window.cursor_position() else {
        // Off-window releases must not land on the last projected point.
        input.0.down = down;
        input.0.world = None;
        return;
    };
    let world = cameras
        .get_single()
        .ok()
        .and_then(|(camera, transform)| camera.viewport_to_world_2d(transform, screen).ok());
    input.0 = PointerSample {
        down,
        screen,
        world,
        over_ui: interactions.iter().any(|i| *i != Interaction::None),
    };
}

pub(crate) fn tick_workbench(
    time: Res<Time>,
    input: Res<PointerInput>,
    mut brewery: ResMut<Brewery>,
) {
    brewery.workbench.tick(input.0, time.delta_secs());
}

pub(crate) fn apply_workbench_events(
    mut commands: Commands,
    mut brewery: ResMut<Brewery>,
    assets: Option<Res<AssetServer>>,
    mut transforms: ParamSet<(
        Query<&mut Transform, With<WorldObject>>,
        Query<&mut Transform, With<ResultSprite>>,
    )>,
    mut signals: EventWriter<UiSignal>,
) {
    let brewery = &mut *brewery;
    let mut touched: HashSet<EntityId> = HashSet::default();

    for event in brewery.workbench.drain_events() {
        match event {
            WorkbenchEvent::EntityMoved { entity, .. }
            | WorkbenchEvent::DrawOrderChanged { entity, .. } => {
                touched.insert(entity);
            }
            WorkbenchEvent::EntityDestroyed { entity } => {
                touched.remove(&entity);
                if let Some(target) = brewery.links.remove(&entity) {
                    if let Some(cmds) = commands.get_entity(target) {
                        cmds.despawn_recursive();
                    }
                }
            }
            WorkbenchEvent::ResultSpawned {
                launch,
                item,
                position,
            } => {
                let sprite = commands
                    .spawn((
                        Sprite {
                            image: image_handle(assets.as_deref(), item.image()),
                            custom_size: Some(Vec2::splat(64.0)),
                            ..default()
                        },
                        Transform::from_translation(position.truncate().extend(RESULT_DEPTH)),
                        ResultSprite(launch),
                    ))
                    .id();
                brewery.result_sprites.insert(launch, sprite);
            }
            WorkbenchEvent::ResultMoved { launch, position } => {
                let Some(sprite) = brewery.result_sprites.get(&launch) else {
                    continue;
                };
                if let Ok(mut transform) = transforms.p1().get_mut(*sprite) {
                    transform.translation = position.truncate().extend(RESULT_DEPTH);
                }
            }
            WorkbenchEvent::ResultFinished { launch } => {
                if let Some(sprite) = brewery.result_sprites.remove(&launch) {
                    if let Some(cmds) = commands.get_entity(sprite) {
                        cmds.despawn_recursive();
                    }
                }
            }
            other => {
                signals.send(UiSignal(other));
            }
        }
    }

    let mut objects = transforms.p0();
    for id in touched {
        let (Some(entity), Some(object)) = (brewery.links.get(&id), brewery.workbench.scene().get(id))
        else {
            continue;
        };
        if let Ok(mut transform) = objects.get_mut(*entity) {
            transform.translation = object
                .position
                .truncate()
                .extend(render_depth(object.position.z, object.draw_order));
        }
    }
}
