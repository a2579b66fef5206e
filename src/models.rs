use serde::{Deserialize, Serialize};

/// One saved upload: what was detected, where, and from which file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub filename: String,
    pub location: String,
    pub detected_obstacles: Vec<String>,
}

impl DetectionRecord {
    pub fn new(
        filename: impl Into<String>,
        location: impl Into<String>,
        detected_obstacles: Vec<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            location: location.into(),
            detected_obstacles,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Render in the `"<lat>,<lon>"` form the location input expects.
    pub fn to_location_string(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// A map pin for one stored record whose location parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coordinates: Coordinates,
    /// Comma-joined obstacle labels.
    pub obstacles: String,
    pub filename: String,
}

impl Marker {
    pub fn popup_html(&self) -> String {
        format!("Obstacles: {}<br>File: {}", self.obstacles, self.filename)
    }

    pub fn popup_text(&self) -> String {
        format!("Obstacles: {}\nFile: {}", self.obstacles, self.filename)
    }
}
