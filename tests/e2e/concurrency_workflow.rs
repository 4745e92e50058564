//! E2E Scenario: aggregation passes racing user actions on one database.

use std::sync::Arc;
use std::thread;

use super::common::{FINGERPRINT, GESTURES, MAIL, SAMPLE_CATALOG};
use super::fixture::E2EFixture;

#[test]
fn concurrent_passes_and_writes_do_not_lose_events() {
    let fixture = E2EFixture::new(SAMPLE_CATALOG);
    let service = Arc::new(fixture.service());

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for _ in 0..25 {
                    let list = service.on_get_suggestions().unwrap();
                    service
                        .on_suggestions_shown(list.iter().map(|s| s.id.as_str()))
                        .unwrap();
                }
            })
        })
        .collect();

    let writer = {
        let service = Arc::clone(&service);
        thread::spawn(move || {
            for _ in 0..20 {
                service.on_suggestion_launched(GESTURES).unwrap();
            }
        })
    };

    for handle in readers {
        handle.join().unwrap();
    }
    writer.join().unwrap();
    service.on_suggestion_dismissed(MAIL).unwrap();

    assert_eq!(service.event_summary(GESTURES).unwrap().clicked.count, 20);
    assert_eq!(service.event_summary(MAIL).unwrap().dismissed.count, 1);
    // Fingerprint is never dismissed, so every pass showed it.
    assert_eq!(service.event_summary(FINGERPRINT).unwrap().shown.count, 100);
    assert!(!E2EFixture::ids(&service).contains(&MAIL.to_string()));
}

#[test]
fn two_connections_share_state() {
    let fixture = E2EFixture::new(SAMPLE_CATALOG);
    let first = fixture.service();
    let second = fixture.service();

    first.on_suggestion_dismissed(FINGERPRINT).unwrap();
    assert!(second.is_dismissed(FINGERPRINT).unwrap());
    assert!(!E2EFixture::ids(&second).contains(&FINGERPRINT.to_string()));
}
