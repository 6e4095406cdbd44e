//! End-to-end page session over a site directory on disk.

#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]
#![allow(missing_docs)]

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use url::Url;
use vaktija_site::PageSession;
use vaktija_site::config::{
    ConfigManager,
    STATE_FILE_NAME,
};
use vaktija_site::dom::layout::site_layout;
use vaktija_site::dom::{
    ACTIVE_CLASS,
    DATE_DISPLAY_CLASS,
    Dom,
    I18N_ATTR,
    I18N_NESTED_ATTR,
    LANG_ATTR,
    LANG_OPTION_CLASS,
    MemoryDom,
    PAGE_ATTR,
    SLOT_CLASS,
    SLOT_HOUR_CLASS,
};
use vaktija_site::platform::{
    FileStore,
    ManualClock,
    MemoryWindow,
    PreferenceStore,
    ResourceFetcher,
};
use vaktija_site::session::UiEvent;
use vaktija_site::types::TimeOfDay;

type Session = PageSession<MemoryDom, MemoryWindow, ResourceFetcher, FileStore, ManualClock>;


/// Writes a complete site: settings, two translation files and a schedule
/// response served from `api/77`.
fn write_site(root: &Path) {
    let base = Url::from_directory_path(root).unwrap();
    let settings = json!({
        "baseUrl": base.as_str(),
        "scheduleEndpoint": base.join("api").unwrap().as_str(),
        "siteTitle": "Džamija"
    });
    fs::write(root.join(".vaktija-site.json"), settings.to_string()).unwrap();

    fs::create_dir_all(root.join("locales")).unwrap();
    let english = json!({
        "site_title": "Prayer Times",
        "about_title": "About us",
        "nav": { "home": "Home", "about": "About" },
        "prayers": { "fajr": "Dawn", "dhuhr": "Noon" }
    });
    let bosnian = json!({
        "site_title": "Vaktija",
        "about_title": "O nama",
        "nav": { "home": "Početna", "about": "O nama" },
        "prayers": { "fajr": "Zora", "dhuhr": "Podne" }
    });
    fs::write(root.join("locales/en.json"), english.to_string()).unwrap();
    fs::write(root.join("locales/bs.json"), bosnian.to_string()).unwrap();

    fs::create_dir_all(root.join("api")).unwrap();
    let schedule = json!({
        "id": 77,
        "lokacija": "Sarajevo",
        "datum": ["26. rebi'u-l-evvel 1447", "četvrtak, 18. septembar 2025"],
        "vakat": ["03:45", "05:20", "12:45", "16:30", "19:50", "21:15"]
    });
    fs::write(root.join("api/77"), schedule.to_string()).unwrap();
}

fn open_session(root: &Path, query: &str, clock: ManualClock) -> Session {
    let config = ConfigManager::load(root).unwrap();
    let settings = config.settings().clone();

    let location = config.location().join(query).unwrap();
    let store = FileStore::open(config.state_path()).unwrap();

    PageSession::new(
        settings.clone(),
        site_layout(&settings),
        MemoryWindow::new(location),
        ResourceFetcher::new(),
        store,
        clock,
    )
}

fn text_of(dom: &MemoryDom, attr: &str, key: &str) -> String {
    dom.query_attr(attr)
        .into_iter()
        .find(|(_, value)| value == key)
        .map(|(node, _)| dom.text(node))
        .unwrap()
}

fn click(session: &Session, attr: &str, value: &str) -> UiEvent {
    let node = session
        .dom()
        .query_attr(attr)
        .into_iter()
        .find(|(_, candidate)| candidate == value)
        .map(|(node, _)| node)
        .unwrap();
    UiEvent::Click(node)
}

fn active_languages(dom: &MemoryDom) -> Vec<String> {
    dom.query_class(LANG_OPTION_CLASS)
        .into_iter()
        .filter(|&node| dom.has_class(node, ACTIVE_CLASS))
        .filter_map(|node| dom.attr(node, LANG_ATTR))
        .collect()
}

fn active_hours(dom: &MemoryDom) -> Vec<String> {
    dom.query_class(SLOT_CLASS)
        .into_iter()
        .filter(|&slot| dom.has_class(slot, ACTIVE_CLASS))
        .map(|slot| dom.text(dom.query_class_within(slot, SLOT_HOUR_CLASS)[0]))
        .collect()
}

#[tokio::test]
async fn full_page_flow() {
    let site = TempDir::new().unwrap();
    write_site(site.path());
    let clock = ManualClock::new(TimeOfDay::new(13, 0).unwrap());
    let mut session = open_session(site.path(), "?page=prayer-times", clock.clone());

    session.start().await;
    assert_eq!(session.dom().visible_sections(), vec!["prayer-times"]);
    assert_eq!(text_of(session.dom(), I18N_ATTR, "site_title"), "Prayer Times");
    assert_eq!(active_languages(session.dom()), vec!["en"]);

    let schedule = session.load_schedule().await.unwrap();
    assert_eq!(schedule.location.as_deref(), Some("Sarajevo"));
    let date = session.dom().query_class(DATE_DISPLAY_CLASS)[0];
    assert_eq!(
        session.dom().text(date),
        "26. rebi'u-l-evvel 1447 / četvrtak, 18. septembar 2025"
    );

    session.tick();
    assert_eq!(active_hours(session.dom()), vec!["16:30", "16:30"]);

    clock.set(TimeOfDay::new(22, 0).unwrap());
    session.tick();
    assert_eq!(active_hours(session.dom()), vec!["03:45", "03:45"]);

    let bosnian = click(&session, LANG_ATTR, "bs");
    session.handle_event(bosnian).await;
    assert_eq!(text_of(session.dom(), I18N_ATTR, "site_title"), "Vaktija");
    assert_eq!(text_of(session.dom(), I18N_NESTED_ATTR, "prayers.dhuhr"), "Podne");
    assert_eq!(active_languages(session.dom()), vec!["bs"]);

    let about = click(&session, PAGE_ATTR, "about");
    session.handle_event(about).await;
    assert_eq!(session.dom().visible_sections(), vec!["about"]);
    assert_eq!(session.window().title(), "About | Džamija");
    assert_eq!(text_of(session.dom(), I18N_ATTR, "about_title"), "O nama");

    let contact = click(&session, PAGE_ATTR, "contact");
    session.handle_event(contact).await;
    assert_eq!(session.window().current().url.query(), Some("page=contact"));

    session.handle_event(UiEvent::Back).await;
    assert_eq!(session.dom().visible_sections(), vec!["about"]);
    assert_eq!(session.window().history_len(), 3);

    let stored = FileStore::open(site.path().join(STATE_FILE_NAME)).unwrap();
    assert_eq!(stored.get("language").as_deref(), Some("bs"));
}

#[tokio::test]
async fn missing_language_falls_back_to_english() {
    let site = TempDir::new().unwrap();
    write_site(site.path());
    let mut session = open_session(site.path(), "", ManualClock::new(TimeOfDay::default()));
    session.start().await;

    let german = click(&session, LANG_ATTR, "de");
    session.handle_event(german).await;

    assert_eq!(text_of(session.dom(), I18N_ATTR, "site_title"), "Prayer Times");
    assert_eq!(active_languages(session.dom()), vec!["de"]);
    let stored = FileStore::open(site.path().join(STATE_FILE_NAME)).unwrap();
    assert_eq!(stored.get("language").as_deref(), Some("de"));
}

#[tokio::test]
async fn persisted_language_survives_reload() {
    let site = TempDir::new().unwrap();
    write_site(site.path());
    fs::write(site.path().join(STATE_FILE_NAME), r#"{"language":"bs"}"#).unwrap();

    let mut session =
        open_session(site.path(), "?page=about", ManualClock::new(TimeOfDay::default()));
    session.start().await;

    assert_eq!(text_of(session.dom(), I18N_ATTR, "site_title"), "Vaktija");
    assert_eq!(session.dom().visible_sections(), vec!["about"]);
}

#[tokio::test]
async fn schedule_failure_keeps_placeholders_and_highlights_first_slot() {
    let site = TempDir::new().unwrap();
    write_site(site.path());
    fs::remove_file(site.path().join("api/77")).unwrap();
    let mut session =
        open_session(site.path(), "", ManualClock::new(TimeOfDay::new(13, 0).unwrap()));

    assert!(session.load_schedule().await.is_none());
    session.tick();

    assert_eq!(active_hours(session.dom()), vec!["--:--", "--:--"]);
}

#[tokio::test]
async fn failed_reload_keeps_rendered_schedule() {
    let site = TempDir::new().unwrap();
    write_site(site.path());
    let mut session =
        open_session(site.path(), "", ManualClock::new(TimeOfDay::new(13, 0).unwrap()));
    assert!(session.load_schedule().await.is_some());

    fs::remove_file(site.path().join("api/77")).unwrap();
    assert!(session.load_schedule().await.is_none());

    let schedule = session.schedule().unwrap();
    assert_eq!(schedule.location.as_deref(), Some("Sarajevo"));
    let first_hour = session.dom().query_class(SLOT_HOUR_CLASS)[0];
    assert_eq!(session.dom().text(first_hour), "03:45");
    session.tick();
    assert_eq!(active_hours(session.dom()), vec!["16:30", "16:30"]);
}
