//! Landscape records as delivered over the wire and as cached after the join.
//!
//! Fields the join or the UI reads are typed; anything else a record carries is
//! kept verbatim in its `extra` map so nothing is lost between fetch and read.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Organization metadata keyed by the item's `crunchbase_url`.
pub type OrganizationTable = BTreeMap<String, OrganizationMetadata>;

/// Repository metadata keyed by repository URL.
pub type GitTable = BTreeMap<String, GitMetadata>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reference into the organization side-table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crunchbase_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repositories: Option<Vec<Repository>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_data: Option<OrganizationMetadata>,
    #[serde(
        default,
        alias = "clomonitor_report_summary",
        skip_serializing_if = "Option::is_none"
    )]
    pub report_summary: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    /// The repository flagged as primary, if any.
    pub fn primary_repository(&self) -> Option<&Repository> {
        self.repositories
            .as_ref()?
            .iter()
            .find(|repo| repo.is_primary())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_data: Option<GitMetadata>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Repository {
    pub fn is_primary(&self) -> bool {
        self.primary.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_employees_min: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_employees_max: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributors: Option<Contributors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_commit: Option<Commit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_commit: Option<Commit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_release: Option<Release>,
    /// Language name to bytes of code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<BTreeMap<String, u64>>,
    /// Weekly commit counts, oldest first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participation_stats: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub good_first_issues: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Raw, un-joined payload of one dataset file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetBundle {
    #[serde(default)]
    pub items: Option<Vec<Item>>,
    #[serde(default)]
    pub crunchbase_data: Option<OrganizationTable>,
    #[serde(default)]
    pub git_data: Option<GitTable>,
}

/// Joined dataset as stored in the cache. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedDataset {
    pub items: Vec<Item>,
    pub crunchbase_data: Option<OrganizationTable>,
    pub git_data: Option<GitTable>,
    pub loaded_at: DateTime<Utc>,
}

impl EnrichedDataset {
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }
}
