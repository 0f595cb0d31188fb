use serde::{Deserialize, Serialize};

use crate::models::content::EntityKind;

/// The aggregator's output contract: five category buckets, always all
/// present. Empty buckets mean "no matches in that category".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultSet {
    pub general_info: Vec<GeneralResult>,
    pub programs: Vec<ProgramResult>,
    pub professors: Vec<ProfessorResult>,
    pub campuses: Vec<CampusResult>,
    pub events: Vec<EventResult>,
}

/// A matched blog post or static page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralResult {
    pub title: String,
    pub permalink: String,
    pub entity_kind: EntityKind,
    pub author_name: Option<String>,
}

/// A matched program. The id drives the relationship-expansion pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramResult {
    pub title: String,
    pub permalink: String,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorResult {
    pub title: String,
    pub permalink: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampusResult {
    pub title: String,
    pub permalink: String,
}

/// A matched event with its display date split for the calendar card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResult {
    pub title: String,
    pub permalink: String,
    /// Abbreviated month name, e.g. "Sep".
    pub month: String,
    /// Zero-padded day of month, e.g. "04".
    pub day: String,
    pub description: String,
}
