//! E2E Scenario: an exclusive first-impression category owns the list until
//! its window runs out.

use super::fixture::E2EFixture;

const CATALOG: &str = r#"
[[candidates]]
categories = ["suggested.category.first_impression"]
system_app = true
label = "Welcome tour"
component = { package = "com.example.tour", class = "Welcome" }

[[candidates]]
categories = ["suggested.category.first_impression"]
system_app = true
label = "Tips later"
component = { package = "com.example.tour", class = "Tips" }
metadata = { "suggestion.dismiss" = "3" }

[[candidates]]
categories = ["suggested.category.default"]
system_app = true
label = "Wallpaper"
component = { package = "com.example.style", class = "Wallpaper" }
"#;

const WELCOME: &str = "com.example.tour/Welcome";
const TIPS: &str = "com.example.tour/Tips";
const WALLPAPER: &str = "com.example.style/Wallpaper";

#[test]
fn exclusive_window_lifecycle() {
    let fixture = E2EFixture::new(CATALOG);
    let service = fixture.service();

    // Day 0: only the exclusive category, appear rules enforced.
    assert_eq!(E2EFixture::ids(&service), vec![WELCOME]);

    // Day 4: the delayed tip is due and joins the exclusive list.
    fixture.clock.advance_days(4);
    assert_eq!(E2EFixture::ids(&service), vec![WELCOME, TIPS]);

    // Dismissing both empties the exclusive category, so the rest shows.
    service.on_suggestion_dismissed(WELCOME).unwrap();
    service.on_suggestion_dismissed(TIPS).unwrap();
    assert_eq!(E2EFixture::ids(&service), vec![WALLPAPER]);
}

#[test]
fn expired_window_aggregates_everything() {
    let fixture = E2EFixture::new(CATALOG);
    let service = fixture.service();
    assert_eq!(E2EFixture::ids(&service), vec![WELCOME]);

    fixture.clock.advance_days(15);
    assert_eq!(E2EFixture::ids(&service), vec![WELCOME, TIPS, WALLPAPER]);
}

#[test]
fn window_boundary_is_exclusive() {
    let fixture = E2EFixture::new(CATALOG);
    let service = fixture.service();
    E2EFixture::ids(&service);

    fixture.clock.advance_days(14);
    assert!(!E2EFixture::ids(&service).contains(&WALLPAPER.to_string()));

    fixture.clock.advance_millis(1);
    assert!(E2EFixture::ids(&service).contains(&WALLPAPER.to_string()));
}
