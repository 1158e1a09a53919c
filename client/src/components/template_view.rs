//! Memorial site rendering shared by the preview page and the editor.
//!
//! DESIGN
//! ======
//! The template slug picks a [`SiteLayout`] from a small registry; unknown
//! slugs get the classic layout. Each layout reads a few well-known
//! customization paths with case-derived fallbacks, so a sparse tree still
//! renders a complete page. Every other value in the tree is listed in
//! generic zone sections: the current page's group on sub-pages, all
//! remaining groups on `home`. No declared zone is left off the page.

#[cfg(test)]
#[path = "template_view_test.rs"]
mod template_view_test;

use bridge::PreviewSnapshot;
use casesite::path::leaf_paths;
use casesite::template::humanize;
use casesite::{CrimeType, get_path};
use leptos::prelude::*;
use serde_json::Value;

use crate::components::site_image::{PlaceholderKind, SiteImage};

/// String at `path`, or `fallback` when absent or blank.
#[must_use]
pub fn custom_text(customizations: &Value, path: &str, fallback: &str) -> String {
    match get_path(customizations, path) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => fallback.to_owned(),
    }
}

fn field<'a>(case_data: &'a Value, name: &str) -> &'a str {
    case_data.get(name).and_then(Value::as_str).map_or("", str::trim)
}

/// `"Jane Doe"`, or a neutral label when the name is unknown.
#[must_use]
pub fn case_name(case_data: &Value) -> String {
    let name = format!("{} {}", field(case_data, "first_name"), field(case_data, "last_name"));
    let name = name.trim();
    if name.is_empty() { "Unnamed case".to_owned() } else { name.to_owned() }
}

/// Headline status line, e.g. `Missing since 2024-01-01`.
#[must_use]
pub fn case_status_line(case_data: &Value) -> String {
    let crime = CrimeType::parse(field(case_data, "crime_type"));
    match crime {
        CrimeType::Missing => match field(case_data, "last_seen_date") {
            "" => "Missing".to_owned(),
            date => format!("Missing since {date}"),
        },
        CrimeType::Homicide => match field(case_data, "date_of_death") {
            "" => "Homicide victim".to_owned(),
            date => format!("Killed {date}"),
        },
        CrimeType::Other(ref raw) if raw.is_empty() => String::new(),
        other => other.label().to_owned(),
    }
}

/// `(label, value)` rows for the facts panel, skipping empty fields.
#[must_use]
pub fn fact_rows(case_data: &Value) -> Vec<(&'static str, String)> {
    const FACTS: [(&str, &str); 7] = [
        ("age", "Age"),
        ("height", "Height"),
        ("weight", "Weight"),
        ("hair_color", "Hair"),
        ("eye_color", "Eyes"),
        ("incident_location", "Last known location"),
        ("reward_amount", "Reward"),
    ];
    FACTS
        .iter()
        .filter_map(|(key, label)| {
            let value = match case_data.get(*key)? {
                Value::String(s) if !s.trim().is_empty() => s.trim().to_owned(),
                Value::Number(n) => n.to_string(),
                _ => return None,
            };
            Some((*label, value))
        })
        .collect()
}

/// Contact line for tips.
#[must_use]
pub fn contact_line(case_data: &Value) -> Option<String> {
    let agency = field(case_data, "investigating_agency");
    let phone = field(case_data, "detective_phone");
    match (agency.is_empty(), phone.is_empty()) {
        (true, true) => None,
        (false, true) => Some(agency.to_owned()),
        (true, false) => Some(phone.to_owned()),
        (false, false) => Some(format!("{agency} · {phone}")),
    }
}

/// Paths drawn by the fixed parts of every layout.
const LAYOUT_PATHS: [&str; 8] = [
    "global.primaryColor",
    "global.accentColor",
    "global.fontFamily",
    "hero.headline",
    "hero.heroImage",
    "about.portrait",
    "about.story",
    "contact.callToAction",
];

/// Page layouts the preview can draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SiteLayout {
    /// Full-width hero image over the headline.
    #[default]
    Classic,
    /// Text-only header; imagery stays in the about section.
    Minimal,
}

/// Slug fragments mapped to layouts; the first match wins.
const LAYOUT_REGISTRY: [(&str, SiteLayout); 4] = [
    ("minimal", SiteLayout::Minimal),
    ("simple", SiteLayout::Minimal),
    ("quiet", SiteLayout::Minimal),
    ("classic", SiteLayout::Classic),
];

impl SiteLayout {
    #[must_use]
    pub fn for_slug(slug: &str) -> Self {
        let slug = slug.to_ascii_lowercase();
        LAYOUT_REGISTRY
            .iter()
            .find(|(fragment, _)| slug.contains(fragment))
            .map_or_else(Self::default, |(_, layout)| *layout)
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Classic => "site site--classic",
            Self::Minimal => "site site--minimal",
        }
    }
}

/// One customization value shown in a generic zone section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoneRow {
    pub label: String,
    pub value: String,
    pub image: bool,
}

/// A customization group rendered as a titled list of rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoneSection {
    pub key: String,
    pub heading: String,
    pub rows: Vec<ZoneRow>,
}

/// Display text for a stored value; `None` for blanks and objects.
#[must_use]
pub fn zone_value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "Yes" } else { "No" }.to_owned()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(zone_value_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    }
}

fn is_image_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    ["image", "photo", "portrait", "logo"].iter().any(|hint| key.contains(hint))
}

fn section_for(customizations: &Value, key: &str) -> Option<ZoneSection> {
    let group = customizations.get(key)?;
    let rows: Vec<ZoneRow> = leaf_paths(group)
        .into_iter()
        .filter_map(|relative| {
            let full = format!("{key}.{relative}");
            if LAYOUT_PATHS.contains(&full.as_str()) {
                return None;
            }
            let value = zone_value_text(get_path(group, &relative)?)?;
            let leaf = relative.rsplit('.').next().unwrap_or(&relative);
            Some(ZoneRow { label: humanize(leaf), image: is_image_key(leaf) && !value.contains(", "), value })
        })
        .collect();
    (!rows.is_empty()).then(|| ZoneSection { key: key.to_owned(), heading: humanize(key), rows })
}

/// Generic sections for `page`: its own group on sub-pages, and every group
/// on `home`, minus the values the layout already draws.
#[must_use]
pub fn zone_sections(customizations: &Value, page: &str) -> Vec<ZoneSection> {
    if page != "home" {
        return section_for(customizations, page).into_iter().collect();
    }
    customizations
        .as_object()
        .map(|groups| groups.keys().filter_map(|key| section_for(customizations, key)).collect())
        .unwrap_or_default()
}

#[component]
pub fn TemplateView(
    #[prop(into)] snapshot: Signal<PreviewSnapshot>,
    #[prop(into)] page: Signal<String>,
    #[prop(into)] template: Signal<String>,
    #[prop(default = None)] on_image_error: Option<Callback<PlaceholderKind>>,
) -> impl IntoView {
    let custom = move |path: &'static str, fallback: &'static str| {
        move || custom_text(&snapshot.get().customizations, path, fallback)
    };
    let primary = custom("global.primaryColor", "#334155");
    let accent = custom("global.accentColor", "#b45309");
    let font = custom("global.fontFamily", "Georgia, serif");
    let style = move || format!("--site-primary: {}; --site-accent: {}; font-family: {};", primary(), accent(), font());
    let layout = Memo::new(move |_| SiteLayout::for_slug(&template.get()));
    let is_home = move || page.with(|p| p == "home");

    let name = move || case_name(&snapshot.get().case_data);
    let status = move || case_status_line(&snapshot.get().case_data);
    let headline = move || {
        let data = snapshot.get();
        custom_text(&data.customizations, "hero.headline", &case_name(&data.case_data))
    };
    let hero_image = Signal::derive(move || custom_text(&snapshot.get().customizations, "hero.heroImage", ""));
    let portrait = Signal::derive(move || {
        let data = snapshot.get();
        let photo = data.case_data.get("photo_url").and_then(Value::as_str).unwrap_or_default().to_owned();
        custom_text(&data.customizations, "about.portrait", &photo)
    });
    let story = move || {
        let data = snapshot.get();
        let description = field(&data.case_data, "description").to_owned();
        custom_text(&data.customizations, "about.story", &description)
    };
    let facts = move || {
        fact_rows(&snapshot.get().case_data)
            .into_iter()
            .map(|(label, value)| view! { <dt>{label}</dt><dd>{value}</dd> })
            .collect_view()
    };
    let contact = move || contact_line(&snapshot.get().case_data);
    let cta = custom("contact.callToAction", "If you have any information, please contact investigators.");

    let sections = move || {
        let sections = page.with(|p| snapshot.with(|s| zone_sections(&s.customizations, p)));
        sections.into_iter().map(|section| view! { <ZoneSectionView section=section on_image_error=on_image_error/> }).collect_view()
    };

    view! {
        <article class=move || layout.get().class() data-page=move || page.get() style=style>
            <header class="site__hero">
                <Show when=move || layout.get() == SiteLayout::Classic>
                    <SiteImage src=hero_image kind=PlaceholderKind::Hero class="site__hero-image" on_error=on_image_error/>
                </Show>
                <div class="site__hero-text">
                    <p class="site__status">{status}</p>
                    <h1 class="site__headline">{headline}</h1>
                </div>
            </header>
            <Show when=is_home>
                <section class="site__about">
                    <SiteImage src=portrait alt="Portrait" kind=PlaceholderKind::Portrait class="site__portrait" on_error=on_image_error/>
                    <div class="site__story">
                        <h2>{name}</h2>
                        <p>{story}</p>
                        <dl class="site__facts">{facts}</dl>
                    </div>
                </section>
            </Show>
            {sections}
            <footer class="site__contact">
                <p>{cta}</p>
                {move || contact().map(|line| view! { <p class="site__contact-line">{line}</p> })}
            </footer>
        </article>
    }
}

#[component]
fn ZoneSectionView(section: ZoneSection, on_image_error: Option<Callback<PlaceholderKind>>) -> impl IntoView {
    let rows = section
        .rows
        .into_iter()
        .map(|row| {
            let body = if row.image {
                let src = row.value.clone();
                view! {
                    <SiteImage src=Signal::derive(move || src.clone()) alt=row.label.clone() kind=PlaceholderKind::Gallery class="site__zone-image" on_error=on_image_error/>
                }
                .into_any()
            } else {
                view! { <span>{row.value}</span> }.into_any()
            };
            view! { <dt>{row.label}</dt><dd>{body}</dd> }
        })
        .collect_view();

    view! {
        <section class="site__zone" data-zone=section.key>
            <h2>{section.heading}</h2>
            <dl class="site__zone-rows">{rows}</dl>
        </section>
    }
}
