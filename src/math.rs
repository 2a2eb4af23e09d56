//! Pure computation helpers extracted for testability.
//!
//! All functions in this module are free of Bevy ECS dependencies and operate
//! on plain numeric / `Vec2` / `Vec3` inputs, making them straightforward to
//! unit-test.

use bevy::prelude::{Vec2, Vec3};

/// Cubic ease-out curve: fast start, gentle deceleration.
///
/// `t` should be in `[0, 1]`. Returns `1 - (1 - t)^3`.
///
/// Used for the hover transition.
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Eases from `from` to `to` over `duration` seconds, `elapsed` seconds in.
///
/// Returns exactly `to` once `elapsed >= duration`, and immediately when
/// `duration` is not positive.
///
/// # Examples
/// ```
/// # use honeycomb_layout::math::ease_toward;
/// assert_eq!(ease_toward(0.0, 1.0, 0.0, 0.2), 0.0);
/// assert_eq!(ease_toward(0.0, 1.0, 0.2, 0.2), 1.0);
/// assert_eq!(ease_toward(0.3, 0.0, 5.0, 0.2), 0.0);
/// ```
pub fn ease_toward(from: f32, to: f32, elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 || elapsed >= duration {
        return to;
    }
    let t = (elapsed / duration).max(0.0);
    from + (to - from) * ease_out_cubic(t)
}

/// Linear blend between the rest value `1.0` and `peak` by `emphasis` in `[0, 1]`.
///
/// Hover scale and brightness are both expressed this way.
pub fn emphasis_factor(peak: f32, emphasis: f32) -> f32 {
    1.0 + (peak - 1.0) * emphasis
}

/// Maps a layout-space point (pixels, y down) onto the ground plane.
///
/// Layout x becomes world x and layout y becomes world z, so a camera looking
/// straight down with `-Z` as up shows the layout the right way round.
pub fn layout_to_world(x: f64, y: f64, world_scale: f32) -> Vec3 {
    Vec3::new(x as f32 * world_scale, 0.0, y as f32 * world_scale)
}

/// Height above the ground plane at which a downward-looking perspective
/// camera sees all of `extent` (world units, x by z).
///
/// `fov_y` is the vertical field of view in radians and `aspect` the viewport
/// width over height. `margin` scales the result (1.0 is a tight fit).
/// A non-positive `aspect` is treated as square.
pub fn camera_height_to_fit(extent: Vec2, fov_y: f32, aspect: f32, margin: f32) -> f32 {
    let aspect = if aspect > 0.0 { aspect } else { 1.0 };
    let half_height = (extent.y / 2.0).max(extent.x / 2.0 / aspect);
    half_height * margin / (fov_y / 2.0).tan()
}

/// Hue in degrees for the tile at `index`, spread by the golden angle so
/// neighbouring tiles never share a colour.
pub fn tile_hue(index: usize) -> f32 {
    (index as f32 * 137.507_77) % 360.0
}
