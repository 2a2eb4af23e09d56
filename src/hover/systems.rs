use bevy::picking::hover::PickingInteraction;
use bevy::prelude::*;

use super::HoverConfig;
use super::entities::TileHover;
use crate::honeycomb::HoneycombTile;
use crate::math;

/// Gives newly spawned tiles hover state, remembering their rest colour.
pub fn attach_hover(
    mut commands: Commands,
    tiles: Query<(Entity, &MeshMaterial3d<StandardMaterial>), Added<HoneycombTile>>,
    materials: Res<Assets<StandardMaterial>>,
) {
    for (entity, material) in &tiles {
        let base = materials
            .get(&material.0)
            .map_or(LinearRgba::WHITE, |m| m.base_color.to_linear());
        commands
            .entity(entity)
            .insert((TileHover::new(base), PickingInteraction::default()));
    }
}

/// Starts a transition whenever the pointer enters or leaves a tile.
pub fn track_hover(
    mut tiles: Query<(&PickingInteraction, &mut TileHover), Changed<PickingInteraction>>,
) {
    for (interaction, mut hover) in &mut tiles {
        hover.set_hovered(!matches!(interaction, PickingInteraction::None));
    }
}

/// Tile data driven by [`animate_hover`].
type HoverTileData = (
    &'static HoneycombTile,
    &'static mut TileHover,
    &'static mut Transform,
    &'static MeshMaterial3d<StandardMaterial>,
);

/// Advances hover transitions, scaling tiles and brightening their materials.
pub fn animate_hover(
    time: Res<Time>,
    cfg: Res<HoverConfig>,
    mut tiles: Query<HoverTileData>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let dt = time.delta_secs();
    for (tile, mut hover, mut transform, material) in &mut tiles {
        if hover.advance(dt, cfg.duration) {
            let brightness = math::emphasis_factor(cfg.brightness, hover.emphasis);
            if let Some(mat) = materials.get_mut(&material.0) {
                mat.base_color = hover.tinted(brightness).into();
            }
        }

        // Also covers apply_layout resetting scale to the bare radius
        let scale = tile.radius * math::emphasis_factor(cfg.scale, hover.emphasis);
        if transform.scale.x != scale {
            transform.scale = Vec3::new(scale, 1.0, scale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const EPS: f32 = 1e-5;
    const RADIUS: f32 = 2.0;

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<Assets<StandardMaterial>>()
            .init_resource::<Time>()
            .insert_resource(HoverConfig::default())
            .add_systems(Update, (attach_hover, track_hover, animate_hover).chain());
        app
    }

    fn spawn_tile(app: &mut App, color: LinearRgba) -> (Entity, Handle<StandardMaterial>) {
        let material = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial {
                base_color: color.into(),
                unlit: true,
                ..default()
            });
        let tile = app
            .world_mut()
            .spawn((
                HoneycombTile {
                    index: 0,
                    radius: RADIUS,
                },
                Transform::from_scale(Vec3::new(RADIUS, 1.0, RADIUS)),
                MeshMaterial3d(material.clone()),
            ))
            .id();
        (tile, material)
    }

    /// Advances the clock by `secs` and runs one frame.
    fn step(app: &mut App, secs: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(secs));
        app.update();
    }

    fn set_interaction(app: &mut App, tile: Entity, interaction: PickingInteraction) {
        *app.world_mut().get_mut::<PickingInteraction>(tile).unwrap() = interaction;
    }

    fn scale(app: &App, tile: Entity) -> Vec3 {
        app.world().get::<Transform>(tile).unwrap().scale
    }

    fn color(app: &App, material: &Handle<StandardMaterial>) -> LinearRgba {
        app.world()
            .resource::<Assets<StandardMaterial>>()
            .get(material)
            .unwrap()
            .base_color
            .to_linear()
    }

    fn assert_color(got: LinearRgba, want: LinearRgba) {
        assert!(
            (got.red - want.red).abs() < EPS
                && (got.green - want.green).abs() < EPS
                && (got.blue - want.blue).abs() < EPS
                && (got.alpha - want.alpha).abs() < EPS,
            "got {got:?}, want {want:?}"
        );
    }

    #[test]
    fn new_tiles_get_hover_state_at_rest() {
        let mut app = test_app();
        let base = LinearRgba::new(0.5, 0.4, 0.2, 1.0);
        let (tile, material) = spawn_tile(&mut app, base);
        step(&mut app, 0.016);

        let hover = app.world().get::<TileHover>(tile).unwrap();
        assert!(!hover.hovered);
        assert_eq!(hover.base_color, base);
        assert!(app.world().get::<PickingInteraction>(tile).is_some());
        assert_eq!(scale(&app, tile), Vec3::new(RADIUS, 1.0, RADIUS));
        assert_color(color(&app, &material), base);
    }

    #[test]
    fn hovered_tile_grows_and_brightens_then_returns_to_rest() {
        let mut app = test_app();
        let base = LinearRgba::new(0.5, 0.4, 0.2, 1.0);
        let (tile, material) = spawn_tile(&mut app, base);
        step(&mut app, 0.016);

        set_interaction(&mut app, tile, PickingInteraction::Hovered);
        step(&mut app, 0.1);
        let midway = scale(&app, tile).x;
        assert!(midway > RADIUS && midway < RADIUS * 1.05, "midway {midway}");

        step(&mut app, 0.15);
        let full = scale(&app, tile);
        assert!((full.x - RADIUS * 1.05).abs() < EPS, "full {full}");
        assert!((full.z - RADIUS * 1.05).abs() < EPS);
        assert_eq!(full.y, 1.0);
        assert_color(color(&app, &material), LinearRgba::new(0.55, 0.44, 0.22, 1.0));

        set_interaction(&mut app, tile, PickingInteraction::None);
        step(&mut app, 0.25);
        assert_eq!(scale(&app, tile), Vec3::new(RADIUS, 1.0, RADIUS));
        assert_color(color(&app, &material), base);
    }

    #[test]
    fn pressed_counts_as_hovered() {
        let mut app = test_app();
        let (tile, _) = spawn_tile(&mut app, LinearRgba::WHITE);
        step(&mut app, 0.016);

        set_interaction(&mut app, tile, PickingInteraction::Pressed);
        step(&mut app, 0.3);
        assert!(app.world().get::<TileHover>(tile).unwrap().hovered);
        assert!((scale(&app, tile).x - RADIUS * 1.05).abs() < EPS);
    }

    #[test]
    fn hover_scale_survives_a_relayout_reset() {
        let mut app = test_app();
        let (tile, _) = spawn_tile(&mut app, LinearRgba::WHITE);
        step(&mut app, 0.016);
        set_interaction(&mut app, tile, PickingInteraction::Hovered);
        step(&mut app, 0.3);

        // a relayout writes the bare radius back
        app.world_mut().get_mut::<Transform>(tile).unwrap().scale = Vec3::new(RADIUS, 1.0, RADIUS);
        step(&mut app, 0.016);

        assert!((scale(&app, tile).x - RADIUS * 1.05).abs() < EPS);
    }
}
