//! Pointer hover affordance for honeycomb tiles.
//!
//! A hovered tile eases up to a slightly larger, brighter state and back down
//! when the pointer leaves. Only those two fixed states exist; the transition
//! between them is an ease-out over [`HoverConfig::duration`].

mod entities;
mod systems;

pub use entities::TileHover;

use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;

use crate::honeycomb::HoneycombSet;

/// Hover transition parameters.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct HoverConfig {
    /// Tile scale at full hover.
    pub scale: f32,
    /// Tile colour multiplier at full hover.
    pub brightness: f32,
    /// Transition time in seconds, in either direction.
    pub duration: f32,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            scale: 1.05,
            brightness: 1.1,
            duration: 0.2,
        }
    }
}

/// Hover plugin: pointer picking on tile meshes plus the eased transition.
pub struct HoverPlugin(pub HoverConfig);

impl Plugin for HoverPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<MeshPickingPlugin>() {
            app.add_plugins(MeshPickingPlugin);
        }
        app.register_type::<HoverConfig>()
            .register_type::<TileHover>()
            .insert_resource(self.0.clone())
            .add_systems(
                Update,
                (
                    systems::attach_hover,
                    systems::track_hover,
                    systems::animate_hover,
                )
                    .chain()
                    .after(HoneycombSet::Layout),
            );
    }
}
