use thiserror::Error;
use tracing::debug;

use crate::{
    core::db::{DetectionRepository, Document},
    location::{LocationError, parse_location},
    models::{Coordinates, Marker},
    table::display_value,
};

pub const INITIAL_ZOOM: u8 = 12;
pub const EMPTY_MAP_MESSAGE: &str = "No locations with valid latitude/longitude found yet. \
     Please enter coordinates in the form 'latitude,longitude'.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkipReason {
    #[error("record has no location string")]
    MissingLocation,
    #[error("unparseable location: {0}")]
    Unparseable(#[from] LocationError),
}

/// Outcome of placing one stored record on the map
#[derive(Debug, Clone, PartialEq)]
pub enum RecordProjection {
    Placed(Marker),
    Skipped { id: String, reason: SkipReason },
}

pub fn project_document(doc: &Document) -> RecordProjection {
    let coordinates = match doc.get_str("location") {
        None => Err(SkipReason::MissingLocation),
        Some(raw) => parse_location(raw).map_err(SkipReason::from),
    };
    match coordinates {
        Ok(coordinates) => RecordProjection::Placed(Marker {
            coordinates,
            obstacles: doc.get("detected_obstacles").map(display_value).unwrap_or_default(),
            filename: doc.get("filename").map(display_value).unwrap_or_default(),
        }),
        Err(reason) => {
            debug!(id = %doc.id, %reason, "record left off the map");
            RecordProjection::Skipped {
                id: doc.id.clone(),
                reason,
            }
        }
    }
}

/// All stored records split into placed markers (store order) and skips.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapProjection {
    pub markers: Vec<Marker>,
    pub skipped: Vec<(String, SkipReason)>,
}

impl MapProjection {
    pub fn from_documents(docs: &[Document]) -> Self {
        let mut projection = Self::default();
        for doc in docs {
            match project_document(doc) {
                RecordProjection::Placed(marker) => projection.markers.push(marker),
                RecordProjection::Skipped { id, reason } => projection.skipped.push((id, reason)),
            }
        }
        projection
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Fresh read of the detections collection, projected for the map.
pub async fn load_projection<R: DetectionRepository>(repo: &R) -> anyhow::Result<MapProjection> {
    let docs = repo.stream_detections().await?;
    Ok(MapProjection::from_documents(&docs))
}

/// A renderable map: at least one marker, centered on the first.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
    pub markers: Vec<Marker>,
}

impl MapView {
    /// `None` when nothing could be placed; show [`EMPTY_MAP_MESSAGE`] instead.
    pub fn from_projection(projection: MapProjection) -> Option<Self> {
        let center = projection.markers.first()?.coordinates;
        Some(Self {
            center,
            zoom: INITIAL_ZOOM,
            markers: projection.markers,
        })
    }

    /// Standalone Leaflet page with one popup marker per record.
    pub fn to_html(&self) -> String {
        let markers: String = self
            .markers
            .iter()
            .map(|m| {
                format!(
                    "    L.marker([{}, {}]).addTo(map).bindPopup(\"{}\");\n",
                    js_number(m.coordinates.latitude),
                    js_number(m.coordinates.longitude),
                    js_string(&format!(
                        "Obstacles: {}<br>File: {}",
                        escape_html(&m.obstacles),
                        escape_html(&m.filename)
                    )),
                )
            })
            .collect();

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Obstacle Map</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <style>#map {{ width: 100%; height: 100vh; }} body {{ margin: 0; }}</style>
</head>
<body>
  <div id="map"></div>
  <script>
    var map = L.map('map').setView([{lat}, {lon}], {zoom});
    L.tileLayer('https://tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{
      maxZoom: 19,
      attribution: '&copy; OpenStreetMap contributors'
    }}).addTo(map);
{markers}  </script>
</body>
</html>
"#,
            lat = js_number(self.center.latitude),
            lon = js_number(self.center.longitude),
            zoom = self.zoom,
            markers = markers,
        )
    }
}

/// Pixel offset of `point` from `center` on a 256px-tile Web Mercator map.
pub fn mercator_offset(center: Coordinates, point: Coordinates, zoom: u8) -> (f64, f64) {
    let world = 256.0 * 2f64.powi(zoom as i32);
    let project = |c: Coordinates| {
        let lat = c.latitude.clamp(-85.0511, 85.0511).to_radians();
        let x = (c.longitude + 180.0) / 360.0 * world;
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) / 2.0 * world;
        (x, y)
    };
    let (cx, cy) = project(center);
    let (px, py) = project(point);
    (px - cx, py - cy)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn js_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace("</", "<\\/")
}

// NaN and infinities parse as locations but are not valid JS literals.
fn js_number(v: f64) -> String {
    if v.is_finite() { v.to_string() } else { "0".to_string() }
}
