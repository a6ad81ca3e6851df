//! Hazard map export: runs the full load and writes the visible layers.

use crate::{CatalogArgs, FetchArgs};
use log::info;
use std::path::Path;
use umb_hazard::{pipeline::load_flood_risk, status::StatusSignal};
use umb_layers::{
    compositor::{HazardLayerCompositor, LayerSurface},
    geojson::layers_to_geojson,
    visibility::VisibilityMode,
};

pub async fn run_map(
    fetch: &FetchArgs,
    catalog: &CatalogArgs,
    mode: VisibilityMode,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let catalog = catalog.load()?;
    let status = StatusSignal::new();
    let mut surface = LayerSurface::default();

    // GLOF markers are available before any rainfall arrives.
    let mut compositor = HazardLayerCompositor::new(&catalog.lakes, &mut surface);
    compositor.select(mode, &mut surface);
    info!("Status: {}", status.current().label());

    let load = load_flood_risk(&fetch.fetcher(), &catalog, &status).await?;
    compositor.attach_flood(&load.districts, &mut surface);

    let geojson = serde_json::to_string_pretty(&layers_to_geojson(surface.layers()))?;
    match output {
        Some(path) => {
            std::fs::write(path, &geojson)?;
            info!("Wrote {} layer(s) to {}", surface.kinds().len(), path.display());
        }
        None => println!("{}", geojson),
    }
    info!(
        "Map ready: mode {}, status {}, {} live / {} fallback districts",
        compositor.mode(),
        status.current().label(),
        load.snapshot.live_count(),
        load.snapshot.fallback_count()
    );
    Ok(())
}
