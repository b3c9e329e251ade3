//! Pretrained part model description.
//!
//! Only the geometry the box conversion needs is kept here: filter sizes in
//! feature cells, per-component bias and the score threshold. The filter
//! weights themselves belong to the search backend.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum PartModelError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid part model: {0}")]
    Invalid(String),
}

/// Filter extent in feature cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSize {
    pub size_x: u32,
    pub size_y: u32,
}

/// One mixture component: a root filter and its part filters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentModel {
    pub root: FilterSize,
    pub parts: Vec<FilterSize>,
    #[serde(default)]
    pub bias: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartModel {
    pub components: Vec<ComponentModel>,
    #[serde(default)]
    pub score_threshold: f32,
}

impl PartModel {
    /// Load and validate a JSON model file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PartModelError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, PartModelError> {
        let model: PartModel = serde_json::from_str(raw)?;
        model.validate()?;
        Ok(model)
    }

    /// Write this model to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PartModelError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), PartModelError> {
        if self.components.is_empty() {
            return Err(PartModelError::Invalid("model has no components".into()));
        }
        if !self.score_threshold.is_finite() {
            return Err(PartModelError::Invalid("score threshold is not finite".into()));
        }
        for (i, c) in self.components.iter().enumerate() {
            for f in std::iter::once(&c.root).chain(&c.parts) {
                if f.size_x == 0 || f.size_y == 0 {
                    return Err(PartModelError::Invalid(format!(
                        "component {i} has an empty filter"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Root filter of the first component.
    pub fn root_filter(&self) -> FilterSize {
        self.components[0].root
    }

    /// Component whose placements are turned into boxes.
    pub fn box_component(&self) -> &ComponentModel {
        &self.components[self.components.len() - 1]
    }

    pub fn num_part_filters(&self) -> usize {
        self.components.iter().map(|c| c.parts.len()).sum()
    }
}
