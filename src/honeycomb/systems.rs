use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use bevy_egui::egui;

use super::HoneycombConfig;
use super::entities::{
    ContainerBounds, ContainerSlot, HoneycombCamera, HoneycombContainer, HoneycombTile, TileMeshes,
};
use crate::layout;
use crate::math;

/// Tile data written by [`apply_layout`].
type TileLayoutData = (
    Entity,
    &'static mut HoneycombTile,
    &'static ChildOf,
    &'static mut Transform,
    Option<&'static mut Mesh3d>,
);

/// Containers awaiting a relayout: config edited, or a child added or removed.
type DirtyContainers<'w, 's> = Query<
    'w,
    's,
    Entity,
    (
        With<HoneycombContainer>,
        Or<(Changed<HoneycombContainer>, Changed<Children>)>,
    ),
>;

// ── Update: layout ─────────────────────────────────────────────────

/// Lays out every container whose config or tile set changed (or that was
/// just spawned).
///
/// Tiles are taken in ascending [`HoneycombTile::index`] order. Each tile is
/// centered on its hex cell, scaled to the hex radius and given the mesh for
/// the container's orientation. Substituted config values are logged.
pub fn apply_layout(
    mut commands: Commands,
    dirty: DirtyContainers,
    mut emptied: RemovedComponents<Children>,
    containers: Query<(&HoneycombContainer, Option<&Name>)>,
    mut tiles: Query<TileLayoutData>,
    tile_meshes: Option<Res<TileMeshes>>,
    cfg: Res<HoneycombConfig>,
) {
    // A container that lost its last child has no Children left to mark changed
    let mut members: HashMap<Entity, Vec<(usize, Entity)>> = dirty
        .iter()
        .chain(emptied.read().filter(|&e| containers.contains(e)))
        .map(|container| (container, Vec::new()))
        .collect();
    if members.is_empty() {
        return;
    }

    for (entity, tile, child_of, ..) in &tiles {
        if let Some(list) = members.get_mut(&child_of.parent()) {
            list.push((tile.index, entity));
        }
    }

    for (container, mut list) in members {
        let Ok((honeycomb, name)) = containers.get(container) else {
            continue;
        };
        list.sort_unstable();

        let result = layout::layout(&honeycomb.config, list.len());
        let label = name.map_or_else(|| container.to_string(), |n| n.to_string());

        for sub in &result.substitutions {
            warn!("{label}: {sub}");
        }
        if result.exceeds_declared_rows() {
            debug!(
                "{label}: {} row(s) declared, tiles wrap onto {}",
                result.config.rows,
                result.row_count()
            );
        }

        let radius = result.config.size as f32 * cfg.world_scale;
        let mesh = tile_meshes
            .as_ref()
            .map(|m| m.for_orientation(result.config.orientation));

        for (cell, &(_, entity)) in result.cells.iter().zip(&list) {
            let Ok((_, mut tile, _, mut transform, mesh3d)) = tiles.get_mut(entity) else {
                continue;
            };
            let (cx, cy) = cell.center();
            transform.translation = math::layout_to_world(cx, cy, cfg.world_scale);
            transform.scale = Vec3::new(radius, 1.0, radius);
            tile.radius = radius;

            if let Some(mesh) = &mesh
                && let Some(mut mesh3d) = mesh3d
                && mesh3d.0 != *mesh
            {
                mesh3d.0 = mesh.clone();
            }
        }

        commands
            .entity(container)
            .insert(ContainerBounds(result.bounds));

        info!(
            "{label}: {} tile(s), {}, {}x{} px",
            result.cells.len(),
            result.config.orientation,
            result.bounds.width,
            result.bounds.height
        );
    }
}

/// Lines up slotted containers left to right, `container_gap` apart, so a
/// container that grows or shrinks never overlaps its neighbour.
pub fn arrange_containers(
    changed: Query<(), Changed<ContainerBounds>>,
    mut containers: Query<(&ContainerSlot, &ContainerBounds, &mut Transform)>,
    cfg: Res<HoneycombConfig>,
) {
    if changed.is_empty() {
        return;
    }

    let mut row: Vec<_> = containers.iter_mut().collect();
    row.sort_by_key(|(slot, ..)| **slot);

    let mut offset_px = 0.0;
    for (_, bounds, mut transform) in row {
        let x = offset_px * cfg.world_scale;
        if transform.translation.x != x {
            transform.translation.x = x;
        }
        offset_px += bounds.0.width as f32 + cfg.container_gap;
    }
}

/// Moves the camera so every container's bounds are in view.
pub fn frame_camera(
    changed: Query<(), Changed<ContainerBounds>>,
    containers: Query<(&ContainerBounds, &Transform), Without<HoneycombCamera>>,
    mut camera_q: Query<(&mut Transform, &Projection), With<HoneycombCamera>>,
    windows: Query<&Window>,
    cfg: Res<HoneycombConfig>,
) {
    if changed.is_empty() {
        return;
    }
    let Ok((mut cam_tf, projection)) = camera_q.single_mut() else {
        return;
    };

    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    for (bounds, tf) in &containers {
        let origin = Vec2::new(tf.translation.x, tf.translation.z);
        let size = Vec2::new(bounds.0.width as f32, bounds.0.height as f32) * cfg.world_scale;
        min = min.min(origin);
        max = max.max(origin + size);
    }
    if !min.is_finite() || !max.is_finite() {
        return;
    }

    let center = (min + max) / 2.0;
    let fov = match projection {
        Projection::Perspective(p) => p.fov,
        _ => std::f32::consts::FRAC_PI_4,
    };
    let aspect = windows
        .iter()
        .next()
        .map_or(16.0 / 9.0, |w| w.width() / w.height().max(1.0));
    let height = math::camera_height_to_fit(max - min, fov, aspect, cfg.framing_margin).max(1.0);

    *cam_tf = Transform::from_xyz(center.x, height, center.y)
        .looking_at(Vec3::new(center.x, 0.0, center.y), Vec3::NEG_Z);
}

// ── Update: overlays ───────────────────────────────────────────────

/// Outlines each container's bounds on the ground plane.
pub fn draw_container_bounds(
    mut gizmos: Gizmos,
    containers: Query<(&ContainerBounds, &GlobalTransform)>,
    cfg: Res<HoneycombConfig>,
) {
    for (bounds, gt) in &containers {
        // Lifted slightly so the outline doesn't z-fight with tiles on the edge
        let o = gt.translation() + Vec3::Y * 0.01;
        let w = bounds.0.width as f32 * cfg.world_scale;
        let h = bounds.0.height as f32 * cfg.world_scale;
        gizmos.linestrip(
            [
                o,
                o + Vec3::X * w,
                o + Vec3::new(w, 0.0, h),
                o + Vec3::Z * h,
                o,
            ],
            cfg.bounds_color,
        );
    }
}

/// Draws the [`Name`] of each [`HoneycombTile`] as a screen-projected egui label.
pub fn draw_tile_labels(
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    camera_q: Query<(&Camera, &GlobalTransform), With<HoneycombCamera>>,
    tiles: Query<(&GlobalTransform, &Name), With<HoneycombTile>>,
    mut ready: Local<bool>,
) {
    // Egui fonts aren't available until after the first Context::run() in the render pass.
    if !*ready {
        *ready = true;
        return;
    }
    let Ok((camera, cam_gt)) = camera_q.single() else {
        return;
    };
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };

    let painter = ctx.get_mut().layer_painter(egui::LayerId::background());

    for (tile_gt, name) in &tiles {
        if let Ok(viewport) = camera.world_to_viewport(cam_gt, tile_gt.translation()) {
            painter.text(
                egui::pos2(viewport.x, viewport.y),
                egui::Align2::CENTER_CENTER,
                name.as_str(),
                egui::FontId::proportional(11.0),
                egui::Color32::WHITE,
            );
        }
    }
}
