//! Plain substring search over events and links.

use crate::event::Event;
use crate::link::SharedLink;

fn normalize(query: &str) -> Option<String> {
    let query = query.trim();
    (!query.is_empty()).then(|| query.to_lowercase())
}

fn haystack(fields: &[&str]) -> String {
    fields.join(" ").to_lowercase()
}

/// Events whose title, notes or person tag contain `query`, ignoring case,
/// ordered by start. A blank query matches nothing.
pub fn search_events(events: &[Event], query: &str) -> Vec<Event> {
    let Some(needle) = normalize(query) else {
        return Vec::new();
    };

    let mut results: Vec<Event> = events
        .iter()
        .filter(|e| {
            haystack(&[
                e.title.as_str(),
                e.notes.as_deref().unwrap_or_default(),
                e.person_tag.as_deref().unwrap_or_default(),
            ])
            .contains(&needle)
        })
        .cloned()
        .collect();

    results.sort_by_key(|e| e.start_epoch_millis);
    results
}

/// Links whose title, url, description or category contain `query`,
/// ignoring case, in input order. A blank query matches nothing.
pub fn search_links(links: &[SharedLink], query: &str) -> Vec<SharedLink> {
    let Some(needle) = normalize(query) else {
        return Vec::new();
    };

    links
        .iter()
        .filter(|l| {
            haystack(&[
                l.title.as_str(),
                l.url.as_str(),
                l.description.as_deref().unwrap_or_default(),
                l.category.as_str(),
            ])
            .contains(&needle)
        })
        .cloned()
        .collect()
}
