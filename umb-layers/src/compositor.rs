//! Keeps the render surface in step with the selected visibility mode.
//!
//! The compositor owns the built layers and the current mode. Every change
//! computes the layers that should be visible and hands the renderer only
//! the difference from what it already shows.

use crate::{
    layer::{build_flood_layer, build_glof_layer, HazardLayer, LayerKind},
    visibility::{LayerDiff, VisibilityMode},
};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};
use umb_hazard::{lake::Lake, measurement::ClassifiedDistrict};

/// The opaque map surface.
pub trait MapRenderer {
    fn add_layer(&mut self, layer: &HazardLayer);
    fn remove_layer(&mut self, kind: LayerKind);
}

#[derive(Debug, Clone)]
pub struct HazardLayerCompositor {
    glof: HazardLayer,
    flood: Option<HazardLayer>,
    mode: VisibilityMode,
    on_surface: BTreeSet<LayerKind>,
}

impl HazardLayerCompositor {
    /// Builds the GLOF layer and shows it straight away; flood data is not
    /// needed for this.
    pub fn new(lakes: &[Lake], renderer: &mut impl MapRenderer) -> Self {
        let mut compositor = Self {
            glof: build_glof_layer(lakes),
            flood: None,
            mode: VisibilityMode::default(),
            on_surface: BTreeSet::new(),
        };
        compositor.sync(renderer);
        compositor
    }

    pub fn mode(&self) -> VisibilityMode {
        self.mode
    }

    pub fn has_flood_layer(&self) -> bool {
        self.flood.is_some()
    }

    /// Layers currently on the render surface.
    pub fn visible(&self) -> &BTreeSet<LayerKind> {
        &self.on_surface
    }

    /// Switch modes. Selecting FLOOD or BOTH before the flood layer exists
    /// shows no flood layer until [`Self::attach_flood`] is called.
    pub fn select(&mut self, mode: VisibilityMode, renderer: &mut impl MapRenderer) {
        self.mode = mode;
        self.sync(renderer);
    }

    /// Install the flood layer once the rainfall join has completed.
    pub fn attach_flood(&mut self, districts: &[ClassifiedDistrict], renderer: &mut impl MapRenderer) {
        if self.on_surface.remove(&LayerKind::Flood) {
            renderer.remove_layer(LayerKind::Flood);
        }
        self.flood = Some(build_flood_layer(districts));
        self.sync(renderer);
    }

    fn layer(&self, kind: LayerKind) -> Option<&HazardLayer> {
        match kind {
            LayerKind::Glof => Some(&self.glof),
            LayerKind::Flood => self.flood.as_ref(),
        }
    }

    fn sync(&mut self, renderer: &mut impl MapRenderer) {
        let desired: BTreeSet<LayerKind> = self
            .mode
            .layers()
            .into_iter()
            .filter(|kind| self.layer(*kind).is_some())
            .collect();
        let diff = LayerDiff::between(&self.on_surface, &desired);
        for kind in &diff.remove {
            debug!("Removing {} layer", kind);
            renderer.remove_layer(*kind);
        }
        for kind in &diff.add {
            if let Some(layer) = self.layer(*kind) {
                debug!("Adding {} layer ({} features)", kind, layer.len());
                renderer.add_layer(layer);
            }
        }
        self.on_surface = desired;
    }
}

/// In-memory surface that keeps whatever layers it has been handed.
#[derive(Debug, Default, Clone)]
pub struct LayerSurface {
    layers: BTreeMap<LayerKind, HazardLayer>,
    /// Count of add/remove calls received
    pub calls: usize,
}

impl LayerSurface {
    pub fn layers(&self) -> impl Iterator<Item = &HazardLayer> {
        self.layers.values()
    }

    pub fn kinds(&self) -> BTreeSet<LayerKind> {
        self.layers.keys().copied().collect()
    }
}

impl MapRenderer for LayerSurface {
    fn add_layer(&mut self, layer: &HazardLayer) {
        self.calls += 1;
        self.layers.insert(layer.kind, layer.clone());
    }

    fn remove_layer(&mut self, kind: LayerKind) {
        self.calls += 1;
        self.layers.remove(&kind);
    }
}
