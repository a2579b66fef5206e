use serde_json::Value;

use crate::core::db::Document;

pub const EMPTY_TABLE_MESSAGE: &str = "No detections have been saved yet.";

/// Plain rendering of a stored value: strings as-is, arrays joined with `", "`.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

/// Every stored document laid out as rows. Columns are the union of document
/// keys in first-seen order; a document lacking a column gets an empty cell.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RecordTable {
    pub fn from_documents(docs: &[Document]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for doc in docs {
            for key in doc.data.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = docs
            .iter()
            .map(|doc| {
                columns
                    .iter()
                    .map(|col| doc.get(col).map(display_value).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fixed-width text rendering for terminals
    pub fn to_text(&self) -> String {
        if self.is_empty() {
            return EMPTY_TABLE_MESSAGE.to_string();
        }
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(col.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut out = vec![line(&self.columns)];
        out.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-"));
        out.extend(self.rows.iter().map(|row| line(row)));
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::OffsetDateTime;

    fn doc(id: &str, value: Value) -> Document {
        let Value::Object(map) = value else { panic!("not an object") };
        Document::new(id, map, OffsetDateTime::UNIX_EPOCH)
    }

    #[test]
    fn display_value_renders_plainly() {
        assert_eq!(display_value(&json!("car")), "car");
        assert_eq!(display_value(&json!(["car", "bench"])), "car, bench");
        assert_eq!(display_value(&json!([])), "");
        assert_eq!(display_value(&json!(3)), "3");
        assert_eq!(display_value(&Value::Null), "");
    }

    #[test]
    fn columns_are_union_in_first_seen_order() {
        let docs = vec![
            doc("a", json!({"filename": "a.jpg", "location": "1,2", "detected_obstacles": ["car"]})),
            doc("b", json!({"filename": "b.jpg", "note": "extra"})),
        ];
        let table = RecordTable::from_documents(&docs);
        assert_eq!(table.columns.len(), 4);
        assert_eq!(table.columns.last().map(String::as_str), Some("note"));
        let loc = table.columns.iter().position(|c| c == "location").unwrap();
        assert_eq!(table.rows[0][loc], "1,2");
        assert_eq!(table.rows[1][loc], "");
    }

    #[test]
    fn empty_table_text() {
        let table = RecordTable::from_documents(&[]);
        assert!(table.is_empty());
        assert_eq!(table.to_text(), EMPTY_TABLE_MESSAGE);
    }

    #[test]
    fn text_rendering_aligns_columns() {
        let docs = vec![doc("a", json!({"filename": "street.jpg"}))];
        let text = RecordTable::from_documents(&docs).to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["filename", "----------", "street.jpg"]);
    }
}
