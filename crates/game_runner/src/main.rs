use bevy::asset::AssetPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin, WindowResolution};
use cauldron_game::CauldronPlugin;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

const LOG_FILTER: &str = "info,wgpu=error,naga=warn,cauldron=debug";

#[cfg_attr(target_arch = "wasm32", wasm_bindgen(start))]
pub fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let mut app = App::new();
    configure_default_plugins(&mut app);
    app.add_plugins(CauldronPlugin);
    app.run();
}

fn configure_default_plugins(app: &mut App) {
    #[cfg(target_arch = "wasm32")]
    let window_plugin = WindowPlugin {
        primary_window: Some(Window {
            canvas: Some("#cauldron-canvas".into()),
            fit_canvas_to_parent: true,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    };

    #[cfg(not(target_arch = "wasm32"))]
    let window_plugin = WindowPlugin {
        primary_window: Some(Window {
            title: "Cauldron".into(),
            present_mode: PresentMode::Fifo,
            resolution: WindowResolution::new(1280.0, 720.0),
            // The drag indicator canvas is sized once at startup.
            resizable: false,
            ..default()
        }),
        ..default()
    };

    // RUST_LOG still takes precedence over this filter.
    let mut plugins = DefaultPlugins.set(window_plugin).set(LogPlugin {
        filter: LOG_FILTER.to_string(),
        ..default()
    });

    #[cfg(target_arch = "wasm32")]
    {
        plugins = plugins.set(AssetPlugin {
            file_path: "assets".into(),
            ..default()
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        plugins = plugins.set(AssetPlugin {
            watch_for_changes_override: Some(true),
            ..default()
        });
    }

    app.add_plugins(plugins);
}
