//! Honeycomb containers on screen.
//!
//! Spawns one entity per configured container with a hexagon tile child per
//! item, runs [`crate::layout::layout`] whenever a container's config or tile
//! set changes, and writes the result back as tile transforms and
//! [`ContainerBounds`]. Containers with a [`ContainerSlot`] are kept side by
//! side as their bounds change.

mod entities;
mod startup_systems;
mod systems;

pub use entities::{
    ContainerBounds, ContainerSlot, HoneycombCamera, HoneycombContainer, HoneycombTile, TileMeshes,
};

use bevy::prelude::*;

use crate::GameState;
use crate::attributes::ContainerAttributes;

/// Ordering handle for systems that depend on tile placement.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum HoneycombSet {
    /// Tile transforms, container bounds and container offsets are written.
    Layout,
}

/// Configuration for the honeycomb subsystem.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct HoneycombConfig {
    /// Containers to spawn at startup, laid out left to right.
    pub containers: Vec<ContainerSpec>,
    /// World units per layout pixel.
    pub world_scale: f32,
    /// Horizontal gap between neighbouring containers, in layout pixels.
    pub container_gap: f32,
    /// Camera distance multiplier over a tight fit of all containers.
    pub framing_margin: f32,
    /// Colour of the container outline gizmo.
    pub bounds_color: Color,
    /// Background clear color.
    pub clear_color: Color,
    /// Bloom post-processing intensity.
    pub bloom_intensity: f32,
}

/// One container: its raw attributes and how many tiles it holds.
#[derive(Clone, Debug, Reflect)]
pub struct ContainerSpec {
    /// Attributes the layout config is read from.
    pub attributes: ContainerAttributes,
    /// Number of tiles to spawn inside the container.
    pub tile_count: usize,
}

impl Default for ContainerSpec {
    fn default() -> Self {
        Self {
            attributes: ContainerAttributes::from_pairs([("rowsrange", "3"), ("colsrange", "4")]),
            tile_count: 12,
        }
    }
}

impl Default for HoneycombConfig {
    fn default() -> Self {
        Self {
            containers: vec![ContainerSpec::default()],
            world_scale: 0.05,
            container_gap: 40.0,
            framing_margin: 1.15,
            bounds_color: Color::srgb(0.0, 0.5, 1.0),
            clear_color: Color::srgb(0.01, 0.01, 0.02),
            bloom_intensity: 0.3,
        }
    }
}

/// Honeycomb plugin: container spawning at startup, relayout on config or tile change.
pub struct HoneycombPlugin(pub HoneycombConfig);

impl Plugin for HoneycombPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<HoneycombConfig>()
            .register_type::<HoneycombContainer>()
            .register_type::<HoneycombTile>()
            .register_type::<ContainerBounds>()
            .register_type::<ContainerSlot>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.clear_color))
            .add_systems(
                Startup,
                (
                    startup_systems::build_tile_meshes,
                    startup_systems::spawn_camera,
                    startup_systems::spawn_containers,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    systems::apply_layout,
                    systems::arrange_containers,
                    systems::frame_camera,
                )
                    .chain()
                    .in_set(HoneycombSet::Layout),
            )
            .add_systems(Update, systems::draw_container_bounds);

        app.add_systems(
            Update,
            systems::draw_tile_labels.run_if(in_state(GameState::Inspecting)),
        );
    }
}
