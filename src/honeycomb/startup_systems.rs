use bevy::asset::RenderAssetUsages;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::mesh::Indices;
use bevy::post_process::bloom::{Bloom, BloomCompositeMode};
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use bevy::render::view::Hdr;
use hexx::{HexLayout, PlaneMeshBuilder};

use super::HoneycombConfig;
use super::entities::{ContainerSlot, HoneycombCamera, HoneycombContainer, HoneycombTile, TileMeshes};
use crate::layout::Orientation;
use crate::math;

// ── Startup ─────────────────────────────────────────────────────────

/// Builds a unit-radius hexagon mesh per orientation and inserts [`TileMeshes`].
pub fn build_tile_meshes(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    commands.insert_resource(TileMeshes {
        flat: meshes.add(hex_plane_mesh(Orientation::FlatTop)),
        pointy: meshes.add(hex_plane_mesh(Orientation::PointyTop)),
    });
}

/// Flat hexagon in the XZ plane, center-to-corner radius 1.
///
/// Kept in the main world as well so mesh picking can ray-cast against it.
fn hex_plane_mesh(orientation: Orientation) -> Mesh {
    let unit_layout = HexLayout {
        orientation: orientation.into(),
        scale: Vec2::splat(1.0),
        ..default()
    };
    let info = PlaneMeshBuilder::new(&unit_layout).build();
    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, info.vertices)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, info.normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, info.uvs)
        .with_inserted_indices(Indices::U16(info.indices))
}

/// Spawns the Camera3d entity with HDR and bloom, looking straight down.
///
/// `-Z` is screen-up so layout y (downwards) runs along world `+Z`.
/// [`super::systems::frame_camera`] moves it once bounds are known.
pub fn spawn_camera(mut commands: Commands, cfg: Res<HoneycombConfig>) {
    commands.spawn((
        Name::new("Camera"),
        Camera3d::default(),
        Hdr,
        Tonemapping::TonyMcMapface,
        Bloom {
            intensity: cfg.bloom_intensity,
            composite_mode: BloomCompositeMode::Additive,
            ..Bloom::NATURAL
        },
        Transform::from_xyz(0.0, 20.0, 0.0).looking_at(Vec3::ZERO, Vec3::NEG_Z),
        HoneycombCamera,
    ));
}

/// Spawns every configured container with its tiles.
///
/// Everything starts at the origin. [`super::systems::apply_layout`] places
/// the tiles on the first update and [`super::systems::arrange_containers`]
/// then spreads the containers along `+X` in slot order.
pub fn spawn_containers(
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
    tile_meshes: Res<TileMeshes>,
    cfg: Res<HoneycombConfig>,
) {
    for (ci, spec) in cfg.containers.iter().enumerate() {
        let config = spec.attributes.to_layout_config();
        let mesh = tile_meshes.for_orientation(config.orientation);

        let container = commands
            .spawn((
                Name::new(format!("Honeycomb({ci})")),
                HoneycombContainer { config },
                ContainerSlot(ci),
                Transform::default(),
                Visibility::default(),
            ))
            .id();

        for index in 0..spec.tile_count {
            // Each tile gets its own material so hover brightness can vary per tile
            let material = materials.add(StandardMaterial {
                base_color: Color::hsl(math::tile_hue(index), 0.55, 0.45),
                unlit: true,
                ..default()
            });
            let tile = commands
                .spawn((
                    HoneycombTile::new(index),
                    Name::new(format!("Tile({ci},{index})")),
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material),
                    Transform::default(),
                ))
                .id();
            commands.entity(container).add_child(tile);
        }
    }

    info!(
        "spawned {} honeycomb container(s), {} tile(s)",
        cfg.containers.len(),
        cfg.containers.iter().map(|c| c.tile_count).sum::<usize>()
    );
}
