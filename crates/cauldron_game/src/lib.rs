//! Bevy front end for the brewing workbench.

pub mod brewing;
pub mod ui;

use bevy::prelude::*;

pub use brewing::{BrewBook, BrewingPlugin, Brewery, PointerInput, UiSignal, WorldObject};
pub use ui::UiPlugin;

/// Brewing systems plus the HUD.
pub struct CauldronPlugin;

impl Plugin for CauldronPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((BrewingPlugin, UiPlugin));
    }
}
