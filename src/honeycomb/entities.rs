use bevy::prelude::*;

use crate::layout::{BoundingBox, LayoutConfig, Orientation};

/// A honeycomb container. Its [`HoneycombTile`] children are placed from
/// `config`; editing `config` (e.g. in the inspector) triggers a relayout.
#[derive(Component, Clone, Debug, Reflect)]
pub struct HoneycombContainer {
    /// Layout parameters, possibly out of range.
    pub config: LayoutConfig,
}

/// Left-to-right position of a container among its siblings.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Reflect)]
pub struct ContainerSlot(pub usize);

/// A tile inside a [`HoneycombContainer`].
#[derive(Component, Clone, Copy, Debug, Reflect)]
pub struct HoneycombTile {
    /// Document order within the container. Tiles are placed by ascending index.
    pub index: usize,
    /// Hexagon radius in world units, written on every relayout.
    pub radius: f32,
}

impl HoneycombTile {
    /// A tile that has not been laid out yet.
    pub fn new(index: usize) -> Self {
        Self { index, radius: 0.0 }
    }
}

/// Rendered container size in layout pixels, written on every relayout.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Reflect)]
pub struct ContainerBounds(pub BoundingBox);

/// Marker for the viewing camera.
#[derive(Component, Reflect)]
pub struct HoneycombCamera;

/// Unit-radius hexagon meshes, one per orientation.
#[derive(Resource)]
pub struct TileMeshes {
    /// Flat-top hexagon.
    pub flat: Handle<Mesh>,
    /// Pointy-top hexagon.
    pub pointy: Handle<Mesh>,
}

impl TileMeshes {
    /// Mesh matching `orientation`.
    pub fn for_orientation(&self, orientation: Orientation) -> Handle<Mesh> {
        match orientation {
            Orientation::FlatTop => self.flat.clone(),
            Orientation::PointyTop => self.pointy.clone(),
        }
    }
}
