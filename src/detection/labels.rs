use std::{path::Path, sync::Arc};

use anyhow::Context;

/// The 80 COCO classes, in the index order YOLOv8 checkpoints use.
pub const COCO_CLASSES: [&str; 80] = [
    "person", "bicycle", "car", "motorcycle", "airplane", "bus", "train", "truck", "boat",
    "traffic light", "fire hydrant", "stop sign", "parking meter", "bench", "bird", "cat", "dog",
    "horse", "sheep", "cow", "elephant", "bear", "zebra", "giraffe", "backpack", "umbrella",
    "handbag", "tie", "suitcase", "frisbee", "skis", "snowboard", "sports ball", "kite",
    "baseball bat", "baseball glove", "skateboard", "surfboard", "tennis racket", "bottle",
    "wine glass", "cup", "fork", "knife", "spoon", "bowl", "banana", "apple", "sandwich", "orange",
    "broccoli", "carrot", "hot dog", "pizza", "donut", "cake", "chair", "couch", "potted plant",
    "bed", "dining table", "toilet", "tv", "laptop", "mouse", "remote", "keyboard", "cell phone",
    "microwave", "oven", "toaster", "sink", "refrigerator", "book", "clock", "vase", "scissors",
    "teddy bear", "hair drier", "toothbrush",
];

/// Index -> label mapping shipped alongside a detector. Cheap to clone.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelTable {
    names: Arc<[String]>,
}

impl LabelTable {
    pub fn new(names: Vec<String>) -> Self {
        Self { names: names.into() }
    }

    pub fn coco() -> Self {
        Self::new(COCO_CLASSES.iter().map(|s| s.to_string()).collect())
    }

    /// One label per non-empty line, in file order.
    pub fn parse(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read label file {:?}", path.as_ref()))?;
        let table = Self::parse(&text);
        if table.is_empty() {
            anyhow::bail!("Label file {:?} contains no labels", path.as_ref());
        }
        Ok(table)
    }

    pub fn get(&self, class_id: usize) -> Option<&str> {
        self.names.get(class_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for LabelTable {
    fn default() -> Self {
        Self::coco()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coco_table_lookup() {
        let table = LabelTable::coco();
        assert_eq!(table.len(), 80);
        assert_eq!(table.get(0), Some("person"));
        assert_eq!(table.get(13), Some("bench"));
        assert_eq!(table.get(79), Some("toothbrush"));
        assert_eq!(table.get(80), None);
    }

    #[test]
    fn parse_skips_blank_lines() {
        let table = LabelTable::parse("pothole\n\n  curb \nbollard\n");
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(1), Some("curb"));
    }

    #[test]
    fn load_rejects_empty_file() -> anyhow::Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("empty.names");
        std::fs::write(&path, "\n\n")?;
        assert!(LabelTable::load(&path).is_err());

        std::fs::write(&path, "cone\nbarrier\n")?;
        let table = LabelTable::load(&path)?;
        assert_eq!(table.get(1), Some("barrier"));
        Ok(())
    }
}
