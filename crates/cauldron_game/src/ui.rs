use bevy::prelude::*;
use bevy::ui::FocusPolicy;
use cauldron_core::{MixOutcome, TextReveal, WorkbenchEvent};
use tracing::info;

use crate::brewing::{
    apply_workbench_events, image_handle, tick_workbench, BrewBook, Brewery, UiSignal,
};

const SLOT_SIZE: f32 = 56.0;
const INDICATOR_SIZE: f32 = 48.0;
const TEXT_COLOR: Color = Color::srgb(0.93, 0.9, 0.82);
const BUTTON_COLOR: Color = Color::srgb(0.24, 0.18, 0.3);
const BUTTON_HOVER_COLOR: Color = Color::srgb(0.34, 0.26, 0.42);
const PANEL_COLOR: Color = Color::srgba(0.08, 0.06, 0.1, 0.85);
const SLOT_COLOR: Color = Color::srgb(0.16, 0.13, 0.2);

/// HUD for the workbench: title, mix button, inventory panel and the drag
/// indicator.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb_u8(18, 12, 24)))
            .add_systems(Startup, spawn_hud)
            .add_systems(
                Update,
                (
                    (handle_slot_presses, handle_mix_button, handle_inventory_button)
                        .after(tick_workbench)
                        .before(apply_workbench_events),
                    apply_ui_signals.after(apply_workbench_events),
                    highlight_buttons,
                    animate_title,
                ),
            );
    }
}

#[derive(Component)]
pub struct MixButton;

#[derive(Component)]
pub struct InventoryButton;

#[derive(Component)]
pub struct InventoryPanel;

#[derive(Component, Debug, Clone, Copy)]
pub struct SlotButton(pub usize);

#[derive(Component, Debug, Clone, Copy)]
pub struct SlotImage(pub usize);

#[derive(Component)]
pub struct DragIndicatorNode;

#[derive(Component)]
pub struct RevealingText(pub TextReveal);

fn spawn_hud(
    mut commands: Commands,
    book: Res<BrewBook>,
    brewery: Res<Brewery>,
    assets: Option<Res<AssetServer>>,
) {
    commands.spawn(Camera2d);

    if let Some(title) = &book.0.title {
        let reveal = TextReveal::new(title.clone(), book.0.settings.reveal_delay);
        commands.spawn((
            Text::new(reveal.visible()),
            TextFont {
                font_size: 28.0,
                ..default()
            },
            TextColor(TEXT_COLOR),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(16.0),
                left: Val::Px(16.0),
                ..default()
            },
            RevealingText(reveal),
        ));
    }

    spawn_button(&mut commands, "Mix", Val::Px(16.0), MixButton, Visibility::Hidden);
    spawn_button(
        &mut commands,
        "Inventory",
        Val::Px(120.0),
        InventoryButton,
        Visibility::Inherited,
    );

    let inventory = brewery.workbench.inventory();
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(72.0),
                right: Val::Px(16.0),
                max_width: Val::Px((SLOT_SIZE + 8.0) * 4.0 + 8.0),
                flex_wrap: FlexWrap::Wrap,
                padding: UiRect::all(Val::Px(4.0)),
                ..default()
            },
            BackgroundColor(PANEL_COLOR),
            Interaction::default(),
            Visibility::Hidden,
            InventoryPanel,
        ))
        .with_children(|panel| {
            for index in 0..inventory.capacity() {
                let item = inventory.slots().get(index).and_then(|slot| slot.item());
                panel
                    .spawn((
                        Button,
                        Node {
                            width: Val::Px(SLOT_SIZE),
                            height: Val::Px(SLOT_SIZE),
                            margin: UiRect::all(Val::Px(4.0)),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BackgroundColor(SLOT_COLOR),
                        SlotButton(index),
                    ))
                    .with_children(|slot| {
                        let (image, visibility) = match item {
                            Some(item) => (
                                image_handle(assets.as_deref(), item.image()),
                                Visibility::Inherited,
                            ),
                            None => (Handle::default(), Visibility::Hidden),
                        };
                        slot.spawn((
                            ImageNode::new(image),
                            Node {
                                width: Val::Px(SLOT_SIZE - 12.0),
                                height: Val::Px(SLOT_SIZE - 12.0),
                                ..default()
                            },
                            FocusPolicy::Pass,
                            visibility,
                            SlotImage(index),
                        ));
                    });
            }
        });

    commands.spawn((
        ImageNode::default(),
        Node {
            position_type: PositionType::Absolute,
            width: Val::Px(INDICATOR_SIZE),
            height: Val::Px(INDICATOR_SIZE),
            ..default()
        },
        FocusPolicy::Pass,
        GlobalZIndex(10),
        Visibility::Hidden,
        DragIndicatorNode,
    ));
}

fn spawn_button(
    commands: &mut Commands,
    label: &str,
    right: Val,
    marker: impl Component,
    visibility: Visibility,
) {
    commands
        .spawn((
            Button,
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(16.0),
                right,
                padding: UiRect::axes(Val::Px(14.0), Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(BUTTON_COLOR),
            visibility,
            marker,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(label),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(TEXT_COLOR),
            ));
        });
}

fn handle_slot_presses(
    slots: Query<(&Interaction, &SlotButton), Changed<Interaction>>,
    mut brewery: ResMut<Brewery>,
) {
    for (interaction, slot) in &slots {
        if *interaction == Interaction::Pressed {
            brewery.workbench.press_slot(slot.0);
        }
    }
}

fn handle_mix_button(
    buttons: Query<&Interaction, (Changed<Interaction>, With<MixButton>)>,
    mut brewery: ResMut<Brewery>,
) {
    for interaction in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match brewery.workbench.mix() {
            MixOutcome::Brewed { result, .. } => {
                info!(target: "cauldron.pot", result = %result, "mix button brewed")
            }
            MixOutcome::NoMatch => info!(target: "cauldron.pot", "mix button found no recipe"),
        }
    }
}

fn handle_inventory_button(
    buttons: Query<&Interaction, (Changed<Interaction>, With<InventoryButton>)>,
    mut brewery: ResMut<Brewery>,
) {
    for interaction in &buttons {
        if *interaction == Interaction::Pressed {
            brewery.workbench.toggle_inventory_panel();
        }
    }
}

#[allow(clippy::type_complexity)]
fn highlight_buttons(
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, Without<SlotButton>),
    >,
) {
    for (interaction, mut color) in &mut buttons {
        color.0 = match interaction {
            Interaction::Hovered | Interaction::Pressed => BUTTON_HOVER_COLOR,
            Interaction::None => BUTTON_COLOR,
        };
    }
}

#[allow(clippy::type_complexity)]
fn apply_ui_signals(
    mut signals: EventReader<UiSignal>,
    brewery: Res<Brewery>,
    assets: Option<Res<AssetServer>>,
    mut nodes: ParamSet<(
        Query<&mut Visibility, With<MixButton>>,
        Query<&mut Visibility, With<InventoryPanel>>,
        Query<(&mut ImageNode, &mut Visibility, &SlotImage)>,
        Query<(&mut ImageNode, &mut Visibility, &mut Node), With<DragIndicatorNode>>,
    )>,
) {
    for UiSignal(event) in signals.read() {
        match event {
            WorkbenchEvent::MixEnabledChanged { enabled } => {
                for mut visibility in &mut nodes.p0() {
                    *visibility = shown(*enabled);
                }
            }
            WorkbenchEvent::InventoryPanelToggled { visible } => {
                for mut visibility in &mut nodes.p1() {
                    *visibility = shown(*visible);
                }
            }
            WorkbenchEvent::SlotsRefreshed => {
                let slots = brewery.workbench.inventory().slots();
                for (mut image, mut visibility, slot) in &mut nodes.p2() {
                    match slots.get(slot.0).and_then(|s| s.item()) {
                        Some(item) => {
                            image.image = image_handle(assets.as_deref(), item.image());
                            *visibility = Visibility::Inherited;
                        }
                        None => *visibility = Visibility::Hidden,
                    }
                }
            }
            WorkbenchEvent::IndicatorShown { image, position } => {
                for (mut node_image, mut visibility, mut node) in &mut nodes.p3() {
                    node_image.image = image_handle(assets.as_deref(), image);
                    *visibility = Visibility::Inherited;
                    if let Some(position) = position {
                        place_indicator(&mut node, *position);
                    }
                }
            }
            WorkbenchEvent::IndicatorMoved { position } => {
                for (_, _, mut node) in &mut nodes.p3() {
                    place_indicator(&mut node, *position);
                }
            }
            WorkbenchEvent::IndicatorHidden => {
                for (_, mut visibility, _) in &mut nodes.p3() {
                    *visibility = Visibility::Hidden;
                }
            }
            _ => {}
        }
    }
}

fn shown(visible: bool) -> Visibility {
    if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

fn place_indicator(node: &mut Node, position: Vec2) {
    node.left = Val::Px(position.x - INDICATOR_SIZE / 2.0);
    node.top = Val::Px(position.y - INDICATOR_SIZE / 2.0);
}

fn animate_title(time: Res<Time>, mut titles: Query<(&mut Text, &mut RevealingText)>) {
    for (mut text, mut reveal) in &mut titles {
        if reveal.0.tick(time.delta_secs()) {
            reveal.0.visible().clone_into(&mut **text);
        }
    }
}
