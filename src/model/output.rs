use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One CSV row. Field names double as the CSV header and the JSON keys.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ArtworkRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Artist")]
    pub artist: String,
    #[serde(rename = "Category")]
    pub category: String,
}

impl ArtworkRecord {
    pub fn new(title: &str, artist: &str, category: &str) -> Self {
        Self {
            title: title.to_string(),
            artist: artist.to_string(),
            category: category.to_string(),
        }
    }
}

/// Title -> record. Keys keep first-insertion order, values are last-write-wins.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MetadataExport {
    entries: Map<String, Value>,
}

impl MetadataExport {
    pub fn insert(&mut self, record: &ArtworkRecord) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(record)?;
        self.entries.insert(record.title.clone(), value);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, title: &str) -> Option<&Value> {
        self.entries.get(title)
    }

    #[cfg(test)]
    pub fn titles(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn later_rows_overwrite_but_keep_key_position() {
        let mut export = MetadataExport::default();
        export.insert(&ArtworkRecord::new("A", "X", "abstract")).unwrap();
        export.insert(&ArtworkRecord::new("B", "Y", "posters")).unwrap();
        export.insert(&ArtworkRecord::new("A", "Z", "botanical")).unwrap();

        assert_eq!(export.len(), 2);
        assert_eq!(export.titles().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(
            export.get("A"),
            Some(&json!({"Title": "A", "Artist": "Z", "Category": "botanical"}))
        );
    }
}
