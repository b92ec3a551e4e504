use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored photo memory.
///
/// Records are only created by [`PhotoStore::add_photo`] (or restored from a
/// snapshot/import), and the `id` never changes afterwards, so the fields are
/// read through accessors.
///
/// [`PhotoStore::add_photo`]: crate::photo_management::photo_store::PhotoStore::add_photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    id: Uuid,
    url: String,
    description: String,
    year: i32,
    is_special: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date: Option<DateTime<Utc>>,
}

impl PhotoRecord {
    pub(crate) fn from_new(id: Uuid, photo: NewPhoto) -> Self {
        Self {
            id,
            url: photo.url,
            description: photo.description,
            year: photo.year,
            is_special: photo.is_special,
            date: photo.date,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn is_special(&self) -> bool {
        self.is_special
    }

    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    pub(crate) fn apply(&mut self, patch: &PhotoPatch) {
        if let Some(ref url) = patch.url {
            self.url = url.clone();
        }
        if let Some(ref description) = patch.description {
            self.description = description.clone();
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(is_special) = patch.is_special {
            self.is_special = is_special;
        }
        if let Some(date) = patch.date {
            self.date = Some(date);
        }
    }

    pub(crate) fn toggle_special(&mut self) {
        self.is_special = !self.is_special;
    }
}

/// Input for a new record; everything except the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPhoto {
    pub url: String,
    pub description: String,
    pub year: i32,
    #[serde(default)]
    pub is_special: bool,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoPatch {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub is_special: Option<bool>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl PhotoPatch {
    pub fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.description.is_none()
            && self.year.is_none()
            && self.is_special.is_none()
            && self.date.is_none()
    }
}
