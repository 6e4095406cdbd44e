//! Reference page layout.
//!
//! Builds the element tree the site's HTML ships with: navigation, language
//! selector, one section per configured page and two schedule containers
//! (the home page widget and the full prayer-times page).

use super::{
    ACTIVE_CLASS,
    DATE_DISPLAY_CLASS,
    Dom,
    Element,
    I18N_ATTR,
    I18N_NESTED_ATTR,
    LANG_ATTR,
    LANG_OPTION_CLASS,
    MAIN_NAV_ID,
    MemoryDom,
    NAV_TOGGLE_ID,
    NodeId,
    PAGE_ATTR,
    PAGE_CLASS,
    SCHEDULE_CONTAINER_CLASS,
    SLOT_CLASS,
    SLOT_HOUR_CLASS,
    SLOT_NAME_CLASS,
    TAB_CLASS,
};
use crate::config::SiteSettings;
use crate::i18n::LanguageCode;
use crate::schedule::Prayer;

/// Text shown in an hour slot before the schedule is rendered.
pub const EMPTY_HOUR: &str = "--:--";

/// Flat translation key of a section heading (`prayer-times` → `prayer_times_title`).
#[must_use]
pub fn section_title_key(page: &str) -> String {
    format!("{}_title", page.replace('-', "_"))
}

/// English label derived from a page identifier (`prayer-times` → `Prayer Times`).
#[must_use]
pub fn page_label(page: &str) -> String {
    page.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[must_use]
pub fn site_layout(settings: &SiteSettings) -> MemoryDom {
    let mut dom = MemoryDom::new();
    let body = dom.root();

    let header = dom.append(body, Element::new("header"));
    dom.append(header, Element::new("h1").attr(I18N_ATTR, "site_title").text(&settings.site_title));
    dom.append(header, Element::new("button").id(NAV_TOGGLE_ID).text("☰"));

    let nav = dom.append(header, Element::new("nav").id(MAIN_NAV_ID));
    for page in &settings.pages {
        dom.append(nav, nav_link("nav-link", page));
    }

    let selector = dom.append(header, Element::new("div").class("lang-selector"));
    for language in LanguageCode::ALL {
        dom.append(
            selector,
            Element::new("span")
                .class(LANG_OPTION_CLASS)
                .attr(LANG_ATTR, language.as_str())
                .text(language.as_str().to_uppercase()),
        );
    }

    let mobile_nav = dom.append(body, Element::new("div").class("mobile-nav"));
    for page in &settings.pages {
        dom.append(mobile_nav, nav_link("nav-item", page));
    }

    let main = dom.append(body, Element::new("main"));
    for page in &settings.pages {
        let section = dom.append(main, Element::new("section").class(PAGE_CLASS).id(page));
        dom.append(
            section,
            Element::new("h2").attr(I18N_ATTR, section_title_key(page)).text(page_label(page)),
        );

        if *page == settings.home_page {
            schedule_container(&mut dom, section);
            dom.append(
                section,
                Element::new("a")
                    .class("view-all")
                    .attr(PAGE_ATTR, "prayer-times")
                    .attr(I18N_ATTR, "view_all")
                    .text("View all"),
            );
        } else if page == "prayer-times" {
            let tabs = dom.append(section, Element::new("div").class("tabs"));
            dom.append(
                tabs,
                Element::new("button")
                    .class(TAB_CLASS)
                    .class(ACTIVE_CLASS)
                    .id("tab-today")
                    .attr(I18N_ATTR, "tab_today")
                    .text("Today"),
            );
            dom.append(
                tabs,
                Element::new("button")
                    .class(TAB_CLASS)
                    .id("tab-month")
                    .attr(I18N_ATTR, "tab_month")
                    .text("This month"),
            );
            dom.append(section, Element::new("p").class(DATE_DISPLAY_CLASS));
            schedule_container(&mut dom, section);
        }
    }

    let footer = dom.append(body, Element::new("footer"));
    let footer_links = dom.append(footer, Element::new("div").class("footer-links"));
    for page in &settings.pages {
        dom.append(
            footer_links,
            Element::new("a").attr(PAGE_ATTR, page).attr(I18N_NESTED_ATTR, format!("nav.{page}")),
        );
    }

    dom
}

fn nav_link(class: &str, page: &str) -> Element {
    Element::new("a")
        .class(class)
        .attr(PAGE_ATTR, page)
        .attr(I18N_NESTED_ATTR, format!("nav.{page}"))
        .text(page_label(page))
}

fn schedule_container(dom: &mut MemoryDom, parent: NodeId) -> NodeId {
    let container = dom.append(parent, Element::new("div").class(SCHEDULE_CONTAINER_CLASS));
    for prayer in Prayer::ALL {
        let slot = dom.append(container, Element::new("div").class(SLOT_CLASS));
        dom.append(
            slot,
            Element::new("span")
                .class(SLOT_NAME_CLASS)
                .attr(I18N_NESTED_ATTR, format!("prayers.{}", prayer.key()))
                .text(prayer.label()),
        );
        dom.append(slot, Element::new("span").class(SLOT_HOUR_CLASS).text(EMPTY_HOUR));
    }
    container
}
