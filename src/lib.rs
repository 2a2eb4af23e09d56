#![warn(missing_docs)]
//! Honeycomb tile layout.
//!
//! [`layout`] places tiles on a flat-top or pointy-top hexagonal grid and
//! sizes the container around them. [`attributes`] reads a layout config from
//! loosely-typed container attributes. The [`honeycomb`] and [`hover`] plugins
//! put the result on screen: one entity per container, one hexagon mesh per
//! tile, and a pointer hover affordance.

pub mod attributes;
pub mod honeycomb;
pub mod hover;
pub mod layout;
pub mod math;

use bevy::prelude::*;

/// Application-wide state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Normal viewing.
    #[default]
    Running,
    /// World inspector and tile labels visible (Tab to toggle).
    Inspecting,
}
