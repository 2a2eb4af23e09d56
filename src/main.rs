#![warn(missing_docs)]
//! Honeycomb layout viewer.
//!
//! Lays out one or more containers of hexagonal tiles and shows them from
//! above, with a hover affordance on each tile. Tab toggles the world
//! inspector, Esc quits.

use bevy::app::AppExit;
use bevy::prelude::*;
#[cfg(feature = "native")]
use bevy::remote::{RemotePlugin, http::RemoteHttpPlugin};
use bevy_inspector_egui::quick::WorldInspectorPlugin;
#[cfg(feature = "native")]
use clap::Parser;

use honeycomb_layout::GameState;
#[cfg(feature = "native")]
use honeycomb_layout::attributes::ContainerAttributes;
#[cfg(feature = "native")]
use honeycomb_layout::honeycomb::ContainerSpec;
use honeycomb_layout::honeycomb::{HoneycombConfig, HoneycombPlugin};
use honeycomb_layout::hover::{HoverConfig, HoverPlugin};

/// Command-line options. Layout values are taken as raw strings and read
/// with the same lenient rules as container attributes.
#[cfg(feature = "native")]
#[derive(Parser, Debug)]
#[command(version, about = "Lay out hexagonal tiles in a honeycomb grid")]
struct Cli {
    /// `flat-top` or `pointy-top`.
    #[arg(long)]
    orientation: Option<String>,
    /// Declared row count (informational; tiles keep wrapping at --cols).
    #[arg(long, allow_hyphen_values = true)]
    rows: Option<String>,
    /// Tiles per row.
    #[arg(long, allow_hyphen_values = true)]
    cols: Option<String>,
    /// Hexagon center-to-corner radius in pixels.
    #[arg(long, allow_hyphen_values = true)]
    size: Option<String>,
    /// Extra gap between adjacent hex centers in pixels.
    #[arg(long, allow_hyphen_values = true)]
    spacing: Option<String>,
    /// Extra container height in pixels.
    #[arg(long, allow_hyphen_values = true)]
    height_margin: Option<String>,
    /// Tiles per container.
    #[arg(long, default_value_t = 12)]
    tiles: usize,
    /// Number of containers, laid out side by side.
    #[arg(long, default_value_t = 1)]
    containers: usize,
}

#[cfg(feature = "native")]
impl Cli {
    fn into_config(self) -> HoneycombConfig {
        let overrides = ContainerAttributes {
            orientation: self.orientation,
            rows: self.rows,
            cols: self.cols,
            size: self.size,
            spacing: self.spacing,
            height_margin: self.height_margin,
        };
        let spec = ContainerSpec {
            attributes: ContainerSpec::default().attributes.merged(&overrides),
            tile_count: self.tiles,
        };
        HoneycombConfig {
            containers: vec![spec; self.containers],
            ..default()
        }
    }
}

fn main() {
    #[cfg(feature = "native")]
    let honeycomb = Cli::parse().into_config();
    #[cfg(not(feature = "native"))]
    let honeycomb = HoneycombConfig::default();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Honeycomb".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<GameState>()
    .init_state::<GameState>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(HoneycombPlugin(honeycomb))
    .add_plugins(HoverPlugin(HoverConfig::default()))
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(GameState::Inspecting)));

    #[cfg(feature = "native")]
    app.add_plugins(RemotePlugin::default())
        .add_plugins(RemoteHttpPlugin::default());

    app.run();
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        next.set(match state.get() {
            GameState::Running => GameState::Inspecting,
            GameState::Inspecting => GameState::Running,
        });
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
