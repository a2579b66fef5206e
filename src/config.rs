use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

use crate::{
    core::db::{DEFAULT_COLLECTION, StoreClient},
    detection::{LabelTable, YoloDetector, YoloParams},
    geolocation::{FixedLocation, Geolocator, NoGeolocation},
    location::parse_location,
};

pub const DEFAULT_CONFIG_FILE: &str = "obstaclemap.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub store: StoreSettings,
    pub detector: DetectorSettings,
    pub location: LocationSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub path: PathBuf,
    pub collection: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("obstaclemap.db"),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetectorSettings {
    pub model: PathBuf,
    pub labels: Option<PathBuf>,
    #[serde(flatten)]
    pub params: YoloParams,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            model: PathBuf::from("models/yolov8n.rten"),
            labels: None,
            params: YoloParams::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LocationSettings {
    /// Position offered as the location field's initial value
    pub default: Option<String>,
}

impl Settings {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read `path`. A missing file yields defaults unless `required` is set.
    pub fn load<P: AsRef<Path>>(path: P, required: bool) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            if required {
                anyhow::bail!("Config file not found: {:?}", path);
            }
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::parse(&text).with_context(|| format!("Invalid config file {:?}", path))
    }
}

impl StoreSettings {
    pub async fn connect(&self) -> anyhow::Result<StoreClient> {
        Ok(StoreClient::connect(&self.path)
            .await?
            .with_collection(self.collection.clone()))
    }
}

impl DetectorSettings {
    pub fn label_table(&self) -> anyhow::Result<LabelTable> {
        match &self.labels {
            Some(path) => LabelTable::load(path),
            None => Ok(LabelTable::coco()),
        }
    }

    pub fn build(&self) -> anyhow::Result<YoloDetector> {
        YoloDetector::load(&self.model, self.label_table()?, self.params.clone())
    }
}

impl LocationSettings {
    pub fn geolocator(&self) -> Box<dyn Geolocator> {
        match self.default.as_deref().map(parse_location) {
            Some(Ok(coords)) => Box::new(FixedLocation(coords)),
            Some(Err(err)) => {
                warn!(%err, "ignoring configured default location");
                Box::new(NoGeolocation)
            }
            None => Box::new(NoGeolocation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;

    #[test]
    fn empty_config_is_all_defaults() -> anyhow::Result<()> {
        let settings = Settings::parse("")?;
        assert_eq!(settings.store.collection, "detections");
        assert_eq!(settings.store.path, PathBuf::from("obstaclemap.db"));
        assert_eq!(settings.detector.params.input_size, 640);
        assert!(settings.detector.labels.is_none());
        assert!(settings.location.default.is_none());
        Ok(())
    }

    #[test]
    fn parses_full_config() -> anyhow::Result<()> {
        let settings = Settings::parse(
            r#"
            [store]
            path = "/tmp/obstacles.db"
            collection = "trial"

            [detector]
            model = "yolo.rten"
            labels = "coco.names"
            confidence_threshold = 0.5
            max_detections = 10

            [location]
            default = "12.9716,77.5946"
            "#,
        )?;
        assert_eq!(settings.store.collection, "trial");
        assert_eq!(settings.detector.model, PathBuf::from("yolo.rten"));
        assert_eq!(settings.detector.params.confidence_threshold, 0.5);
        assert_eq!(settings.detector.params.max_detections, 10);
        assert_eq!(settings.detector.params.iou_threshold, 0.45);
        assert_eq!(
            settings.location.geolocator().locate(),
            Some(Coordinates::new(12.9716, 77.5946))
        );
        Ok(())
    }

    #[test]
    fn rejects_unknown_sections() {
        assert!(Settings::parse("[firebase]\nproject_id = \"x\"").is_err());
    }

    #[test]
    fn bad_default_location_means_no_geolocation() {
        let settings = LocationSettings { default: Some("north".into()) };
        assert!(settings.geolocator().locate().is_none());
    }

    #[test]
    fn missing_file_handling() -> anyhow::Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("absent.toml");
        assert!(Settings::load(&path, false).is_ok());
        assert!(Settings::load(&path, true).is_err());
        Ok(())
    }
}
