use crate::utils::error::ScrapeError;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

pub const PHONE_NAME_KEY: &str = "Phone Name";
pub const IMAGE_URL_KEY: &str = "Image URL";

/// First hit of a search, with `link` already made absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
}

/// One specification table: a category name and its label/value pairs in
/// markup order. Labels are unique; inserting an existing label replaces
/// its value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCategory {
    name: String,
    fields: Vec<(String, String)>,
}

impl SpecCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for SpecCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (label, value) in &self.fields {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// The scraped specification sheet of one phone.
///
/// Serializes to a flat object: `"Phone Name"`, then `"Image URL"` when
/// known, then one nested object per category in page order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecificationRecord {
    pub phone_name: String,
    pub image_url: Option<String>,
    categories: Vec<SpecCategory>,
}

impl SpecificationRecord {
    pub fn new(phone_name: impl Into<String>) -> Self {
        Self {
            phone_name: phone_name.into(),
            ..Default::default()
        }
    }

    /// Stores a category, keeping only categories with at least one pair.
    ///
    /// A repeated category name replaces the earlier one at its original
    /// position; a repeated name with no pairs removes it.
    pub fn upsert_category(&mut self, category: SpecCategory) {
        let existing = self
            .categories
            .iter()
            .position(|c| c.name == category.name);

        match (existing, category.is_empty()) {
            (Some(index), true) => {
                self.categories.remove(index);
            }
            (Some(index), false) => self.categories[index] = category,
            (None, true) => {}
            (None, false) => self.categories.push(category),
        }
    }

    pub fn category(&self, name: &str) -> Option<&SpecCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn categories(&self) -> &[SpecCategory] {
        &self.categories
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for SpecificationRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 1 + usize::from(self.image_url.is_some()) + self.categories.len();
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(PHONE_NAME_KEY, &self.phone_name)?;
        if let Some(image_url) = &self.image_url {
            map.serialize_entry(IMAGE_URL_KEY, image_url)?;
        }
        for category in &self.categories {
            map.serialize_entry(category.name(), category)?;
        }
        map.end()
    }
}

/// `{"error": "..."}` returned in place of a record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct ErrorDescriptor {
    pub error: String,
}

impl From<&ScrapeError> for ErrorDescriptor {
    fn from(err: &ScrapeError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// What `scrape` hands back: always a value, never a panic or `Err`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum ScrapeOutcome {
    Record(SpecificationRecord),
    Error(ErrorDescriptor),
}

impl ScrapeOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, ScrapeOutcome::Error(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ScrapeOutcome::Error(descriptor) => Some(&descriptor.error),
            ScrapeOutcome::Record(_) => None,
        }
    }

    pub fn record(&self) -> Option<&SpecificationRecord> {
        match self {
            ScrapeOutcome::Record(record) => Some(record),
            ScrapeOutcome::Error(_) => None,
        }
    }

    pub fn into_result(self) -> Result<SpecificationRecord, ErrorDescriptor> {
        match self {
            ScrapeOutcome::Record(record) => Ok(record),
            ScrapeOutcome::Error(descriptor) => Err(descriptor),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl From<Result<SpecificationRecord, ScrapeError>> for ScrapeOutcome {
    fn from(result: Result<SpecificationRecord, ScrapeError>) -> Self {
        match result {
            Ok(record) => ScrapeOutcome::Record(record),
            Err(err) => ScrapeOutcome::Error(ErrorDescriptor::from(&err)),
        }
    }
}
