use bevy::prelude::*;

use crate::math;

/// Per-tile hover transition state.
///
/// `emphasis` runs from 0 (at rest) to 1 (fully hovered). Toggling `hovered`
/// restarts the ease from wherever `emphasis` currently is, so a quick
/// leave-and-return never jumps.
#[derive(Component, Clone, Debug, Reflect)]
pub struct TileHover {
    /// Material colour at rest.
    pub base_color: LinearRgba,
    /// Whether the pointer is over the tile.
    pub hovered: bool,
    /// Current position between rest (0) and hover (1).
    pub emphasis: f32,
    from: f32,
    elapsed: f32,
}

impl TileHover {
    /// A tile at rest.
    pub fn new(base_color: LinearRgba) -> Self {
        Self {
            base_color,
            hovered: false,
            emphasis: 0.0,
            from: 0.0,
            elapsed: 0.0,
        }
    }

    /// Emphasis the transition is heading towards.
    pub fn target(&self) -> f32 {
        if self.hovered { 1.0 } else { 0.0 }
    }

    /// Starts a transition when `hovered` differs from the current state.
    pub fn set_hovered(&mut self, hovered: bool) {
        if self.hovered == hovered {
            return;
        }
        self.hovered = hovered;
        self.from = self.emphasis;
        self.elapsed = 0.0;
    }

    /// Steps the transition by `dt` seconds. Returns `false` when already at
    /// the target, i.e. nothing changed.
    pub fn advance(&mut self, dt: f32, duration: f32) -> bool {
        let target = self.target();
        if self.emphasis == target {
            return false;
        }
        self.elapsed += dt;
        self.emphasis = math::ease_toward(self.from, target, self.elapsed, duration);
        true
    }

    /// Material colour for the current emphasis, RGB scaled by `factor`.
    pub fn tinted(&self, factor: f32) -> LinearRgba {
        let c = self.base_color;
        LinearRgba::new(c.red * factor, c.green * factor, c.blue * factor, c.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_rest() {
        let mut hover = TileHover::new(LinearRgba::WHITE);
        assert_eq!(hover.target(), 0.0);
        assert!(!hover.advance(0.1, 0.2));
        assert_eq!(hover.emphasis, 0.0);
    }

    #[test]
    fn reaches_full_hover_after_duration() {
        let mut hover = TileHover::new(LinearRgba::WHITE);
        hover.set_hovered(true);
        assert!(hover.advance(0.1, 0.2));
        assert!(hover.emphasis > 0.5 && hover.emphasis < 1.0);
        assert!(hover.advance(0.1, 0.2));
        assert_eq!(hover.emphasis, 1.0);
        assert!(!hover.advance(0.1, 0.2));
    }

    #[test]
    fn leaving_mid_transition_eases_back_from_current_emphasis() {
        let mut hover = TileHover::new(LinearRgba::WHITE);
        hover.set_hovered(true);
        hover.advance(0.05, 0.2);
        let partway = hover.emphasis;

        hover.set_hovered(false);
        hover.advance(0.0, 0.2);
        assert_eq!(hover.emphasis, partway);
        hover.advance(0.2, 0.2);
        assert_eq!(hover.emphasis, 0.0);
    }

    #[test]
    fn repeated_hover_does_not_restart() {
        let mut hover = TileHover::new(LinearRgba::WHITE);
        hover.set_hovered(true);
        hover.advance(0.1, 0.2);
        let e = hover.emphasis;
        hover.set_hovered(true);
        hover.advance(0.1, 0.2);
        assert!(hover.emphasis > e);
    }

    #[test]
    fn tint_scales_rgb_but_not_alpha() {
        let hover = TileHover::new(LinearRgba::new(0.5, 0.2, 0.1, 0.8));
        let t = hover.tinted(1.1);
        assert!((t.red - 0.55).abs() < 1e-6);
        assert!((t.green - 0.22).abs() < 1e-6);
        assert!((t.blue - 0.11).abs() < 1e-6);
        assert_eq!(t.alpha, 0.8);
    }
}
