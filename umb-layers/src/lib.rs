//! Renderable hazard layers for the Umbrella risk map.
//!
//! This crate provides:
//! - `style`: tier colors, marker/polygon styles and the legend
//! - `layer`: GLOF marker and flood polygon layer construction
//! - `visibility`: the GLOF / FLOOD / BOTH selection state machine
//! - `compositor`: applies visibility changes to a renderer as add/remove diffs
//! - `geojson`: serializes layers for an external map renderer

pub mod compositor;
pub mod geojson;
pub mod layer;
pub mod style;
pub mod visibility;
