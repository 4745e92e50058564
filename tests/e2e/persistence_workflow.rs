//! E2E Scenario: state survives process restarts.

use nudge::clock::Clock;
use nudge::storage::{EventKind, StateStore};

use super::common::{FINGERPRINT, GESTURES, MAIL, SAMPLE_CATALOG};
use super::fixture::E2EFixture;

#[test]
fn dismissal_survives_reopen() {
    let fixture = E2EFixture::new(SAMPLE_CATALOG);
    {
        let service = fixture.service();
        assert_eq!(E2EFixture::ids(&service), vec![FINGERPRINT, MAIL, GESTURES]);
        service.on_suggestion_dismissed(MAIL).unwrap();
    }

    let service = fixture.service();
    assert_eq!(E2EFixture::ids(&service), vec![FINGERPRINT, GESTURES]);
    let history = service.event_history(MAIL).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].kind, EventKind::Dismissed);
}

#[test]
fn dismissal_outlives_the_appear_window() {
    let fixture = E2EFixture::new(SAMPLE_CATALOG);
    fixture.service().on_suggestion_dismissed(GESTURES).unwrap();

    fixture.clock.advance_days(400);
    let service = fixture.service();
    assert!(!E2EFixture::ids(&service).contains(&GESTURES.to_string()));
    assert!(service.is_dismissed(GESTURES).unwrap());
}

#[test]
fn first_seen_time_is_kept_across_reopen() {
    let fixture = E2EFixture::new(SAMPLE_CATALOG);
    let start = fixture.clock.now_millis();
    E2EFixture::ids(&fixture.service());

    fixture.clock.advance_days(3);
    E2EFixture::ids(&fixture.service());

    let db = fixture.open_db();
    assert_eq!(db.setup_time(GESTURES).unwrap(), Some(start));
    assert_eq!(
        db.setup_time("category:suggested.category.deferred_setup").unwrap(),
        Some(start)
    );
}

#[test]
fn event_log_accumulates_across_sessions() {
    let fixture = E2EFixture::new(SAMPLE_CATALOG);
    for _ in 0..3 {
        let service = fixture.service();
        let ids = E2EFixture::ids(&service);
        service
            .on_suggestions_shown(ids.iter().map(String::as_str))
            .unwrap();
        fixture.clock.advance_millis(1_000);
    }
    fixture.service().on_suggestion_launched(FINGERPRINT).unwrap();

    let service = fixture.service();
    let summary = service.event_summary(FINGERPRINT).unwrap();
    assert_eq!(summary.shown.count, 3);
    assert_eq!(summary.clicked.count, 1);
    assert_eq!(E2EFixture::ids(&service)[0], FINGERPRINT);
}
