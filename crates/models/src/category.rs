use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{self, ModelError};
use crate::slug;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    /// Derived from `name` when absent or blank.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewCategory {
    /// Trim fields, derive the slug and validate. Consumes the input and
    /// yields a record without an id.
    pub fn into_record(self, id: Uuid) -> Result<Category, ModelError> {
        errors::require("name", &self.name)?;
        let name = self.name.trim().to_string();
        let slug = slug::slug_or_derive(self.slug.as_deref(), &name);
        slug::validate_slug(&slug)?;
        let description = self.description.map(|d| d.trim().to_string()).filter(|d| !d.is_empty());
        Ok(Category { id, name, slug, description })
    }
}

impl Category {
    pub fn validate(&self) -> Result<(), ModelError> {
        errors::require("name", &self.name)?;
        slug::validate_slug(&self.slug)
    }
}
