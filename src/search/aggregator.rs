use std::collections::HashSet;

use crate::db::content_store::ContentStore;
use crate::error::AppError;
use crate::models::content::{ContentRecord, EntityKind, RelationField};
use crate::models::search::{
    CampusResult, EventResult, GeneralResult, ProfessorResult, ProgramResult, SearchResultSet,
};
use crate::rendering::excerpt::{event_description, event_month_day};

/// Faceted multi-entity search.
///
/// Pass one queries every searchable kind for a text match and partitions
/// the hits into category buckets. Pass two runs only when programs
/// matched: professors and events whose relation field references any
/// matched program id are merged into their buckets. Professors and
/// events are deduplicated by record id across both passes; campuses are
/// not deduplicated (one entry per direct match plus one per related
/// campus of each matched program, even when programs share a campus).
///
/// Read-only, at most three store queries per call, fresh result per call.
pub async fn run_search(
    store: &dyn ContentStore,
    term: &str,
) -> Result<SearchResultSet, AppError> {
    let mut results = SearchResultSet::default();
    let mut seen_professors: HashSet<String> = HashSet::new();
    let mut seen_events: HashSet<String> = HashSet::new();

    let matches = store.query_by_kind(&EntityKind::SEARCHABLE, term).await?;

    // Campus ids referenced by matched programs, in program order.
    let mut program_campus_ids: Vec<String> = Vec::new();

    for record in &matches {
        match record.kind {
            EntityKind::Post | EntityKind::Page => {
                results.general_info.push(GeneralResult {
                    title: record.title.clone(),
                    permalink: record.permalink(),
                    entity_kind: record.kind,
                    author_name: record.author_name.clone(),
                });
            }
            EntityKind::Professor => {
                if seen_professors.insert(record.id.clone()) {
                    results.professors.push(professor_result(record));
                }
            }
            EntityKind::Program => {
                program_campus_ids.extend(record.related_campus_ids.iter().cloned());
                results.programs.push(ProgramResult {
                    title: record.title.clone(),
                    permalink: record.permalink(),
                    id: record.id.clone(),
                });
            }
            EntityKind::Campus => {
                results.campuses.push(CampusResult {
                    title: record.title.clone(),
                    permalink: record.permalink(),
                });
            }
            EntityKind::Event => {
                if seen_events.insert(record.id.clone()) {
                    results.events.push(event_result(record));
                }
            }
        }
    }

    if !program_campus_ids.is_empty() {
        for campus in resolve_in_order(store, &program_campus_ids).await? {
            results.campuses.push(CampusResult {
                title: campus.title.clone(),
                permalink: campus.permalink(),
            });
        }
    }

    if !results.programs.is_empty() {
        let program_ids: Vec<String> =
            results.programs.iter().map(|p| p.id.clone()).collect();

        let related = store
            .query_by_relation(
                &[EntityKind::Professor, EntityKind::Event],
                RelationField::RelatedPrograms,
                &program_ids,
            )
            .await?;

        for record in &related {
            match record.kind {
                EntityKind::Professor => {
                    if seen_professors.insert(record.id.clone()) {
                        results.professors.push(professor_result(record));
                    }
                }
                EntityKind::Event => {
                    if seen_events.insert(record.id.clone()) {
                        results.events.push(event_result(record));
                    }
                }
                _ => {}
            }
        }
    }

    Ok(results)
}

fn professor_result(record: &ContentRecord) -> ProfessorResult {
    ProfessorResult {
        title: record.title.clone(),
        permalink: record.permalink(),
        image_url: record.image_url.clone(),
    }
}

fn event_result(record: &ContentRecord) -> EventResult {
    let (month, day) = record
        .event_date
        .map(event_month_day)
        .unwrap_or_default();
    EventResult {
        title: record.title.clone(),
        permalink: record.permalink(),
        month,
        day,
        description: event_description(record.excerpt.as_deref(), &record.body),
    }
}

/// Batch-resolve ids, reordered to the caller's order. An id that
/// repeats yields one record per occurrence; ids that resolve to
/// nothing are skipped.
async fn resolve_in_order(
    store: &dyn ContentStore,
    ids: &[String],
) -> Result<Vec<ContentRecord>, AppError> {
    let fetched = store.find_by_ids(ids).await?;
    let mut ordered = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(record) = fetched.iter().find(|r| &r.id == id) {
            ordered.push(record.clone());
        }
    }
    Ok(ordered)
}
