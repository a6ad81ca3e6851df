//! GeoJSON export of hazard layers.
//!
//! Coordinates are written `[lng, lat]` and polygon rings are closed, as
//! GeoJSON requires.

use crate::layer::{Geometry, HazardLayer, MapFeature};
use serde_json::{json, Value};
use umb_hazard::district::LatLng;

fn position(point: &LatLng) -> Value {
    json!([point.lng, point.lat])
}

fn geometry(geometry: &Geometry) -> Value {
    match geometry {
        Geometry::Marker { position: point } => json!({
            "type": "Point",
            "coordinates": position(point),
        }),
        Geometry::Polygon { ring } => {
            let mut coordinates: Vec<Value> = ring.iter().map(position).collect();
            if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
                if first != last {
                    coordinates.push(position(first));
                }
            }
            json!({
                "type": "Polygon",
                "coordinates": [coordinates],
            })
        }
    }
}

fn feature(layer: &HazardLayer, feature: &MapFeature) -> Value {
    json!({
        "type": "Feature",
        "id": feature.id,
        "geometry": geometry(&feature.geometry),
        "properties": {
            "layer": layer.kind,
            "risk": feature.risk,
            "provenance": feature.provenance,
            "label": feature.label,
            "style": feature.style,
        },
    })
}

pub fn layer_to_geojson(layer: &HazardLayer) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": layer.features.iter().map(|f| feature(layer, f)).collect::<Vec<_>>(),
    })
}

/// Several layers flattened into one collection, in the order given.
pub fn layers_to_geojson<'a>(layers: impl IntoIterator<Item = &'a HazardLayer>) -> Value {
    let features: Vec<Value> = layers
        .into_iter()
        .flat_map(|layer| layer.features.iter().map(move |f| feature(layer, f)))
        .collect();
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{build_flood_layer, build_glof_layer};
    use umb_hazard::{
        district::District,
        lake::Lake,
        measurement::{ClassifiedDistrict, RainfallMeasurement},
    };

    #[test]
    fn test_marker_is_lng_lat_point() {
        let layer = build_glof_layer(&Lake::get_lake_vector().unwrap());
        let value = layer_to_geojson(&layer);
        let first = &value["features"][0];
        assert_eq!(first["geometry"]["type"], "Point");
        assert_eq!(first["geometry"]["coordinates"], json!([79.0669, 30.7746]));
        assert_eq!(first["properties"]["risk"], "HIGH");
        assert_eq!(first["properties"]["layer"], "glof");
        assert_eq!(first["properties"]["style"]["fill_color"], "#ef4444");
    }

    #[test]
    fn test_polygon_ring_is_closed() {
        let district = District::get_district_vector().unwrap().remove(0);
        let vertices = district.boundary.len();
        let classified = ClassifiedDistrict::new(
            district.clone(),
            RainfallMeasurement::live(&district.id, 10.0, None),
        );
        let value = layer_to_geojson(&build_flood_layer(&[classified]));
        let ring = value["features"][0]["geometry"]["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), vertices + 1);
        assert_eq!(ring.first(), ring.last());
        assert_eq!(value["features"][0]["properties"]["provenance"], "live");
    }

    #[test]
    fn test_layers_flatten_in_order() {
        let glof = build_glof_layer(&Lake::get_lake_vector().unwrap());
        let flood = build_flood_layer(&[]);
        let value = layers_to_geojson([&glof, &flood]);
        assert_eq!(value["features"].as_array().unwrap().len(), 8);
    }
}
