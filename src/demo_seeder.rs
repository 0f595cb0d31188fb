use chrono::NaiveDate;

use crate::db::content_store::ContentStore;
use crate::error::AppError;
use crate::models::content::{ContentRecord, EntityKind};

fn record(id: &str, kind: EntityKind, title: &str, slug: &str, body: &str) -> ContentRecord {
    ContentRecord {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        slug: slug.to_string(),
        body: body.to_string(),
        excerpt: None,
        author_name: None,
        image_url: None,
        event_date: None,
        related_program_ids: Vec::new(),
        related_campus_ids: Vec::new(),
    }
}

/// Seeds a small, internally consistent campus of demo content.
///
/// Professor ids equal their slugs so the professor page route can
/// feed the like API without an extra lookup.
pub async fn seed_demo_content(store: &dyn ContentStore) -> Result<(), AppError> {
    tracing::info!("seeding demo content");

    let campuses = vec![
        record(
            "campus-hilltop",
            EntityKind::Campus,
            "Hilltop Campus",
            "hilltop",
            "The historic main campus overlooking the city, home to the sciences.",
        ),
        record(
            "campus-riverside",
            EntityKind::Campus,
            "Riverside Campus",
            "riverside",
            "Arts and humanities along the river, with the performance hall.",
        ),
        record(
            "campus-downtown",
            EntityKind::Campus,
            "Downtown Campus",
            "downtown",
            "Evening and professional programs in the city center.",
        ),
    ];

    let mut programs = vec![
        record(
            "prog-biology",
            EntityKind::Program,
            "Biology",
            "biology",
            "From cell biology to field ecology, with lab work from the first term.",
        ),
        record(
            "prog-history",
            EntityKind::Program,
            "History",
            "history",
            "World history with a focus on primary sources and archival research.",
        ),
        record(
            "prog-music",
            EntityKind::Program,
            "Music",
            "music",
            "Performance and composition tracks at the Riverside performance hall.",
        ),
    ];
    programs[0].related_campus_ids = vec!["campus-hilltop".into()];
    programs[1].related_campus_ids = vec!["campus-downtown".into()];
    programs[2].related_campus_ids = vec!["campus-riverside".into()];

    let mut professors = vec![
        record(
            "vivian-chen",
            EntityKind::Professor,
            "Dr. Vivian Chen",
            "vivian-chen",
            "Marine biologist studying kelp forest ecosystems.",
        ),
        record(
            "marcus-webb",
            EntityKind::Professor,
            "Dr. Marcus Webb",
            "marcus-webb",
            "Historian of the medieval Mediterranean.",
        ),
        record(
            "ana-silva",
            EntityKind::Professor,
            "Dr. Ana Silva",
            "ana-silva",
            "Composer and conductor of the university orchestra.",
        ),
    ];
    professors[0].related_program_ids = vec!["prog-biology".into()];
    professors[0].image_url = Some("/images/professors/vivian-chen.jpg".into());
    professors[1].related_program_ids = vec!["prog-history".into()];
    professors[2].related_program_ids = vec!["prog-music".into()];

    let mut events = vec![
        record(
            "event-tide-pool-walk",
            EntityKind::Event,
            "Tide Pool Walk",
            "tide-pool-walk",
            "Join the biology department for a guided walk through the coastal tide pools, \
             rubber boots recommended.",
        ),
        record(
            "event-fall-concert",
            EntityKind::Event,
            "Fall Concert",
            "fall-concert",
            "The university orchestra opens the season at the Riverside performance hall.",
        ),
    ];
    events[0].related_program_ids = vec!["prog-biology".into()];
    events[0].event_date = NaiveDate::from_ymd_opt(2026, 9, 4);
    events[1].related_program_ids = vec!["prog-music".into()];
    events[1].event_date = NaiveDate::from_ymd_opt(2026, 10, 17);

    let mut posts = vec![record(
        "post-research-week",
        EntityKind::Post,
        "Research Week Highlights",
        "research-week-highlights",
        "A look back at student posters and faculty talks from research week.",
    )];
    posts[0].author_name = Some("University News".into());

    let pages = vec![record(
        "page-admissions",
        EntityKind::Page,
        "Admissions",
        "admissions",
        "How to apply, deadlines, and what we look for in an application.",
    )];

    let mut seeded = 0usize;
    for batch in [campuses, programs, professors, events, posts, pages] {
        for item in batch {
            if store.find_by_id(&item.id).await?.is_some() {
                tracing::debug!(id = %item.id, "demo record already present, skipping");
                continue;
            }
            store.insert(item).await?;
            seeded += 1;
        }
    }

    tracing::info!(seeded, "demo content ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::InMemoryContentStore;
    use crate::models::content::RelationField;

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let store = InMemoryContentStore::new();
        seed_demo_content(&store).await.unwrap();
        seed_demo_content(&store).await.unwrap();

        let professors = store
            .query_by_kind(&[EntityKind::Professor], "")
            .await
            .unwrap();
        assert_eq!(professors.len(), 3);
    }

    #[tokio::test]
    async fn seeded_relations_resolve() {
        let store = InMemoryContentStore::new();
        seed_demo_content(&store).await.unwrap();

        let related = store
            .query_by_relation(
                &[EntityKind::Professor, EntityKind::Event],
                RelationField::RelatedPrograms,
                &["prog-biology".to_string()],
            )
            .await
            .unwrap();
        let titles: Vec<_> = related.iter().map(|r| r.title.as_str()).collect();
        assert!(titles.contains(&"Dr. Vivian Chen"));
        assert!(titles.contains(&"Tide Pool Walk"));
    }
}
