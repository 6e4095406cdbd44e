//! Fixtures shared by the unit test modules.
#![cfg(test)]

use serde_json::{
    Value,
    json,
};

use crate::platform::StaticFetcher;

// resource URLs under the default settings
pub(crate) const EN_URL: &str = "http://localhost:8080/locales/en.json";
pub(crate) const BS_URL: &str = "http://localhost:8080/locales/bs.json";
pub(crate) const SCHEDULE_URL: &str = "https://api.vaktija.ba/vaktija/v1/77";

pub(crate) fn english() -> Value {
    json!({
        "site_title": "Prayer Times",
        "about_title": "About",
        "view_all": "View all",
        "nav": { "home": "Home", "about": "About" },
        "prayers": { "fajr": "Dawn", "isha": "Night" }
    })
}

pub(crate) fn bosnian() -> Value {
    json!({
        "site_title": "Vaktija",
        "about_title": "O nama",
        "nav": { "home": "Početna", "about": "O nama" },
        "prayers": { "fajr": "Zora", "isha": "Jacija" }
    })
}

/// Schedule API response with the given six times.
pub(crate) fn schedule_response(times: [&str; 6]) -> Value {
    json!({
        "id": 77,
        "lokacija": "Sarajevo",
        "datum": ["26. rebi'u-l-evvel 1447", "četvrtak, 18. septembar 2025"],
        "vakat": times
    })
}

/// Serves `en` and `bs` translations; every other language answers 404.
pub(crate) fn translation_fetcher() -> StaticFetcher {
    StaticFetcher::new().with_json(EN_URL, english()).with_json(BS_URL, bosnian())
}
