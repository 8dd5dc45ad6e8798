//! Static catalog of resources recommended to waiting prospects.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::RECOMMENDED_RESOURCE_COUNT;
use crate::error::{CoreError, Result};
use crate::prospect::ProductInterest;

const BUNDLED_CATALOG: &str = include_str!("../resources.json");

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// High-level reading for non-technical buyers.
    Blog,
    Documentation,
    /// Ready-made v0 prompts for technical evaluators.
    Prompt,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub product: ProductInterest,
    #[serde(default)]
    pub tags: Vec<String>,
    pub url: String,
}

/// Read-only lookup table of resources.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ResourceCatalog {
    resources: Vec<Resource>,
}

impl ResourceCatalog {
    pub fn from_json(json: &str) -> Result<Self> {
        let resources: Vec<Resource> =
            serde_json::from_str(json).map_err(|e| CoreError::Catalog(e.to_string()))?;
        Self::new(resources)
    }

    pub fn new(resources: Vec<Resource>) -> Result<Self> {
        let mut seen = HashSet::new();
        for r in &resources {
            if !seen.insert(r.id.as_str()) {
                return Err(CoreError::Catalog(format!("duplicate resource id '{}'", r.id)));
            }
        }
        if resources.len() < RECOMMENDED_RESOURCE_COUNT {
            return Err(CoreError::Catalog(format!(
                "catalog has {} resources, need at least {RECOMMENDED_RESOURCE_COUNT}",
                resources.len()
            )));
        }
        Ok(Self { resources })
    }

    /// The catalog compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Catalog(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Resources whose product line is relevant to `interest`.
    #[must_use]
    pub fn for_interest(&self, interest: ProductInterest) -> Vec<&Resource> {
        self.resources.iter().filter(|r| interest.covers(r.product)).collect()
    }

    /// Accept a recommendation only if it names exactly the expected number of
    /// distinct catalog ids.
    pub fn validate_selection(&self, ids: &[String]) -> Result<Vec<String>> {
        if ids.len() != RECOMMENDED_RESOURCE_COUNT {
            return Err(CoreError::InvalidField {
                field: "resources",
                reason: format!("expected {RECOMMENDED_RESOURCE_COUNT} ids, got {}", ids.len()),
            });
        }
        let mut seen = HashSet::new();
        for id in ids {
            if !self.contains(id) {
                return Err(CoreError::InvalidField {
                    field: "resources",
                    reason: format!("'{id}' is not in the catalog"),
                });
            }
            if !seen.insert(id.as_str()) {
                return Err(CoreError::InvalidField {
                    field: "resources",
                    reason: format!("'{id}' listed twice"),
                });
            }
        }
        Ok(ids.to_vec())
    }
}
