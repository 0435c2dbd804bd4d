//! Shared links and their comment threads.

use serde::{Deserialize, Serialize};

use crate::constants::ALL_CATEGORIES;

const MAX_FALLBACK_TITLE: usize = 60;
const TRUNCATED_TITLE: usize = 57;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SharedLink {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub shared_by_uid: String,
    pub shared_by_name: String,
    /// Epoch millis.
    pub shared_at: i64,
    pub category: String,
    pub comments: Vec<LinkComment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkComment {
    pub id: String,
    pub author_uid: String,
    pub author_name: String,
    pub message: String,
    /// Epoch millis.
    pub created_at: i64,
}

impl SharedLink {
    /// A link with only a url, titled by [`fallback_title`].
    pub fn from_url(url: &str, shared_at: i64) -> Self {
        SharedLink {
            title: fallback_title(url),
            url: url.to_string(),
            shared_at,
            ..SharedLink::default()
        }
    }
}

/// Title used when no page metadata is available: the url itself, cut down
/// with an ellipsis when it is long.
pub fn fallback_title(url: &str) -> String {
    if url.chars().count() > MAX_FALLBACK_TITLE {
        let head: String = url.chars().take(TRUNCATED_TITLE).collect();
        format!("{head}...")
    } else {
        url.to_string()
    }
}

/// Distinct non-blank categories, sorted.
pub fn categories(links: &[SharedLink]) -> Vec<String> {
    let mut categories: Vec<String> = links
        .iter()
        .map(|l| l.category.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    categories.sort();
    categories.dedup();
    categories
}

/// Links in `selection`, matched case-insensitively; `"All"` keeps everything.
pub fn filter_by_category<'a>(links: &'a [SharedLink], selection: &str) -> Vec<&'a SharedLink> {
    if selection == ALL_CATEGORIES {
        return links.iter().collect();
    }

    let wanted = selection.to_lowercase();
    links
        .iter()
        .filter(|l| l.category.to_lowercase() == wanted)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(id: &str, category: &str) -> SharedLink {
        SharedLink {
            id: id.into(),
            category: category.into(),
            ..SharedLink::default()
        }
    }

    #[test]
    fn short_url_is_its_own_title() {
        assert_eq!(fallback_title("https://example.com"), "https://example.com");
    }

    #[test]
    fn long_url_is_truncated() {
        let url = format!("https://example.com/{}", "a".repeat(80));
        let title = fallback_title(&url);
        assert_eq!(title.chars().count(), 60);
        assert!(title.ends_with("..."));
        assert!(url.starts_with(title.trim_end_matches("...")));
    }

    #[test]
    fn exactly_sixty_chars_is_kept() {
        let url = "h".repeat(60);
        assert_eq!(fallback_title(&url), url);
    }

    #[test]
    fn categories_are_distinct_and_sorted() {
        let links = vec![link("1", "Recipes"), link("2", ""), link("3", "Travel"), link("4", "Recipes")];
        assert_eq!(categories(&links), vec!["Recipes", "Travel"]);
    }

    #[test]
    fn filter_ignores_case() {
        let links = vec![link("1", "Recipes"), link("2", "travel"), link("3", "")];
        let ids: Vec<&str> = filter_by_category(&links, "TRAVEL").iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
        assert_eq!(filter_by_category(&links, "All").len(), 3);
    }
}
