use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed content categories the site publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Post,
    Page,
    Professor,
    Program,
    Campus,
    Event,
}

impl EntityKind {
    /// All kinds the search aggregator queries in its first pass.
    pub const SEARCHABLE: [EntityKind; 6] = [
        EntityKind::Post,
        EntityKind::Page,
        EntityKind::Professor,
        EntityKind::Program,
        EntityKind::Campus,
        EntityKind::Event,
    ];

    /// Parse an entity kind from a string (case-insensitive).
    pub fn from_str_ci(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "post" => Some(EntityKind::Post),
            "page" => Some(EntityKind::Page),
            "professor" => Some(EntityKind::Professor),
            "program" => Some(EntityKind::Program),
            "campus" => Some(EntityKind::Campus),
            "event" => Some(EntityKind::Event),
            _ => None,
        }
    }

    /// URL prefix for permalinks of this kind.
    fn permalink_prefix(&self) -> &'static str {
        match self {
            EntityKind::Post => "/blog",
            EntityKind::Page => "",
            EntityKind::Professor => "/professors",
            EntityKind::Program => "/programs",
            EntityKind::Campus => "/campuses",
            EntityKind::Event => "/events",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Post => write!(f, "post"),
            EntityKind::Page => write!(f, "page"),
            EntityKind::Professor => write!(f, "professor"),
            EntityKind::Program => write!(f, "program"),
            EntityKind::Campus => write!(f, "campus"),
            EntityKind::Event => write!(f, "event"),
        }
    }
}

/// A stored reference from one record to others, resolvable through the
/// content store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationField {
    /// Professors and events point at the programs they belong to.
    RelatedPrograms,
    /// Programs point at the campuses offering them.
    RelatedCampuses,
}

impl RelationField {
    pub fn field_name(&self) -> &'static str {
        match self {
            RelationField::RelatedPrograms => "related_program_ids",
            RelationField::RelatedCampuses => "related_campus_ids",
        }
    }
}

/// A single record in the content store.
///
/// One flat shape covers all six kinds; fields irrelevant to a kind are
/// left at their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Store-assigned identifier, also the target of relation fields.
    pub id: String,
    pub kind: EntityKind,
    pub title: String,
    /// URL-safe slug; the permalink is derived from kind + slug.
    pub slug: String,
    /// Body markup as authored in the CMS.
    #[serde(default)]
    pub body: String,
    /// Curated summary; preferred over a trimmed body when present.
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Set only for events.
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    /// Relation field: programs this professor/event belongs to.
    #[serde(default)]
    pub related_program_ids: Vec<String>,
    /// Relation field: campuses offering this program.
    #[serde(default)]
    pub related_campus_ids: Vec<String>,
}

impl ContentRecord {
    pub fn permalink(&self) -> String {
        format!("{}/{}", self.kind.permalink_prefix(), self.slug)
    }
}
