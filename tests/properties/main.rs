//! Property tests over the aggregation and ranking pipeline.

#[path = "../common/mod.rs"]
mod common;

use std::collections::HashSet;

use nudge::suggestions::Category;
use nudge::test_utils::{PipelineFixture, candidate};
use proptest::prelude::*;

const TAGS: [&str; 4] = ["cat.a", "cat.b", "cat.c", "cat.d"];

/// (category index, class index, privileged)
fn placements() -> impl Strategy<Value = Vec<(usize, u8, bool)>> {
    prop::collection::vec((0..TAGS.len(), 0u8..12, prop::bool::weighted(0.8)), 0..40)
}

fn fixture(placements: &[(usize, u8, bool)]) -> PipelineFixture {
    let categories = TAGS.iter().map(|tag| Category::normal(*tag)).collect();
    placements.iter().fold(
        PipelineFixture::new().with_categories(categories),
        |fixture, (tag, class, system)| {
            let raw = candidate("pkg", &format!("C{class}")).with_system_app(*system);
            fixture.with_candidate(TAGS[*tag], raw)
        },
    )
}

/// First-occurrence order over categories, privileged candidates only.
///
/// A class placed both as privileged and unprivileged shows up where its
/// first privileged placement is.
fn expected_ids(placements: &[(usize, u8, bool)]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for tag in 0..TAGS.len() {
        for (placed, class, system) in placements {
            if *placed == tag && *system && seen.insert(*class) {
                ids.push(format!("pkg/C{class}"));
            }
        }
    }
    ids
}

proptest! {
    #[test]
    fn aggregation_is_deduplicated_and_category_ordered(placements in placements()) {
        let fixture = fixture(&placements);
        let service = fixture.service();
        let ids: Vec<String> = service
            .on_get_suggestions()
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();

        let unique: HashSet<_> = ids.iter().collect();
        prop_assert_eq!(unique.len(), ids.len());
        prop_assert_eq!(ids, expected_ids(&placements));
    }

    #[test]
    fn repeated_passes_agree(placements in placements()) {
        let fixture = fixture(&placements);
        let service = fixture.service();
        let first = service.on_get_suggestions().unwrap();
        let second = service.on_get_suggestions().unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn dismissed_ids_never_come_back(
        placements in placements(),
        dismiss in prop::collection::vec(0u8..12, 0..6),
        days in 0i64..60,
    ) {
        let fixture = fixture(&placements);
        let service = fixture.service();
        for class in &dismiss {
            service.on_suggestion_dismissed(&format!("pkg/C{class}")).unwrap();
        }
        fixture.clock.advance_days(days);

        let shown: HashSet<String> = service
            .on_get_suggestions()
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        for class in &dismiss {
            let id = format!("pkg/C{class}");
            prop_assert!(!shown.contains(&id));
        }
    }
}
