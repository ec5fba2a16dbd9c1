use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use cauldron_core::PointerSample;
use cauldron_game::brewing::{render_depth, ResultSprite};
use cauldron_game::ui::MixButton;
use cauldron_game::{BrewBook, Brewery, CauldronPlugin, PointerInput, WorldObject};

const CONFIG: &str = r#"
    [settings]
    result_move_distance = 40.0
    launch_duration = 0.5

    [[items]]
    name = "Herb"
    image = "sprites/herb.png"

    [[items]]
    name = "Water"
    image = "sprites/water.png"

    [[items]]
    name = "Potion"
    image = "sprites/potion.png"
    kind = "finished_product"

    [[recipes]]
    result = "Potion"
    ingredients = ["Herb", "Water"]

    [vessel]
    position = [0.0, 0.0]
    size = [100.0, 100.0]

    [[placements]]
    item = "Herb"
    position = [300.0, 0.0]

    [[placements]]
    item = "Water"
    position = [-300.0, 0.0]
"#;

fn app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .insert_resource(BrewBook::from_toml_str(CONFIG).unwrap())
        .add_plugins(CauldronPlugin);
    app.update();
    app
}

fn step(app: &mut App, down: bool, at: Vec2, over_ui: bool) {
    app.insert_resource(PointerInput(PointerSample {
        down,
        screen: at,
        world: Some(at),
        over_ui,
    }));
    app.update();
}

fn drag(app: &mut App, from: Vec2, to: Vec2) {
    step(app, true, from, false);
    step(app, true, to, false);
    step(app, false, to, false);
}

fn object_at(app: &mut App, name: &str) -> (Entity, Vec3) {
    let world = app.world_mut();
    let mut query = world.query::<(Entity, &WorldObject, &Transform)>();
    query
        .iter(world)
        .find(|(_, object, _)| object.item.as_ref().is_some_and(|i| i.name() == name))
        .map(|(entity, _, transform)| (entity, transform.translation))
        .unwrap()
}

fn count<C: Component>(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query::<&C>().iter(world).count()
}

#[test]
fn placements_are_registered_with_the_workbench() {
    let app = app();
    let brewery = app.world().resource::<Brewery>();
    assert_eq!(brewery.workbench.scene().len(), 2);
    assert_eq!(brewery.workbench.inventory().capacity(), 8);
}

#[test]
fn dropped_ingredient_snaps_behind_vessel() {
    let mut app = app();
    let (herb, _) = object_at(&mut app, "Herb");

    step(&mut app, true, Vec2::new(300.0, 0.0), false);
    step(&mut app, true, Vec2::new(40.0, 20.0), false);
    let (_, moving) = object_at(&mut app, "Herb");
    assert_eq!(moving, Vec3::new(40.0, 20.0, render_depth(0.0, 1)));

    step(&mut app, false, Vec2::new(40.0, 20.0), false);
    let (entity, rest) = object_at(&mut app, "Herb");
    assert_eq!(entity, herb);
    assert_eq!(rest, Vec3::new(0.0, 0.0, render_depth(-1.0, -1)));

    let brewery = app.world().resource::<Brewery>();
    assert_eq!(brewery.workbench.pot().state().deposited_items().len(), 1);
    assert!(!brewery.workbench.mix_enabled());
}

#[test]
fn pointer_over_ui_leaves_objects_alone() {
    let mut app = app();
    step(&mut app, true, Vec2::new(300.0, 0.0), true);
    step(&mut app, true, Vec2::ZERO, true);
    step(&mut app, false, Vec2::ZERO, true);

    let (_, position) = object_at(&mut app, "Herb");
    assert_eq!(position.truncate(), Vec2::new(300.0, 0.0));
    let brewery = app.world().resource::<Brewery>();
    assert!(brewery.workbench.pot().state().deposited_items().is_empty());
}

#[test]
fn mix_button_brews_and_launch_sprite_expires() {
    let mut app = app();
    drag(&mut app, Vec2::new(300.0, 0.0), Vec2::ZERO);
    drag(&mut app, Vec2::new(-300.0, 0.0), Vec2::new(10.0, -10.0));

    let world = app.world_mut();
    let (button, visibility) = world
        .query_filtered::<(Entity, &Visibility), With<MixButton>>()
        .single(world);
    assert_eq!(*visibility, Visibility::Inherited);

    app.world_mut()
        .entity_mut(button)
        .insert(Interaction::Pressed);
    step(&mut app, false, Vec2::ZERO, false);

    assert_eq!(count::<WorldObject>(&mut app), 0);
    assert_eq!(count::<ResultSprite>(&mut app), 1);
    assert!(app.world().resource::<Brewery>().workbench.scene().is_empty());

    for _ in 0..10 {
        app.update();
    }
    assert_eq!(count::<ResultSprite>(&mut app), 0);
    assert!(app
        .world()
        .resource::<Brewery>()
        .workbench
        .launches()
        .is_empty());
}

#[test]
fn broken_config_is_reported() {
    let broken = CONFIG.replace(r#"["Herb", "Water"]"#, r#"["Herb", "Toad"]"#);
    assert!(BrewBook::from_toml_str(&broken).is_err());
}
