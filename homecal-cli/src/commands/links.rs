use anyhow::Result;
use chrono::{DateTime, Utc};
use homecal_core::constants::ALL_CATEGORIES;
use homecal_core::link::{categories, filter_by_category};
use homecal_core::store::LinkStore;
use homecal_core::{CoreError, LinkComment, SharedLink};
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::session::Session;

pub fn list(session: &Session, category: Option<&str>) -> Result<()> {
    let links = session.links();
    let selection = category.unwrap_or(ALL_CATEGORIES);
    let shown = filter_by_category(&links, selection);

    let known = categories(&links);
    if !known.is_empty() {
        println!("{}", format!("Categories: {}", known.join(", ")).dimmed());
    }

    if shown.is_empty() {
        println!("{}", "No links shared yet".dimmed());
        return Ok(());
    }

    for link in shown {
        println!("{}", link.render());
        for comment in &link.comments {
            println!("{}", comment.render());
        }
    }

    Ok(())
}

pub fn share(
    session: &Session,
    url: &str,
    title: Option<String>,
    category: Option<String>,
    now: DateTime<Utc>,
) -> Result<()> {
    let mut link = SharedLink::from_url(url, now.timestamp_millis());
    if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
        link.title = title;
    }
    if let Some(category) = category {
        link.category = category.trim().to_string();
    }

    let stored = session.store.share_link(&session.profile, link)?;
    session.save()?;

    println!("{} {}", "Shared".green(), stored.render());
    Ok(())
}

pub fn comment(session: &Session, link_id: &str, message: &str, now: DateTime<Utc>) -> Result<()> {
    if message.trim().is_empty() {
        return Err(CoreError::EmptyComment.into());
    }

    let comment = LinkComment {
        author_uid: session.profile.uid.clone(),
        author_name: session.profile.display_name.clone(),
        message: message.to_string(),
        created_at: now.timestamp_millis(),
        ..LinkComment::default()
    };

    session
        .store
        .add_link_comment(&session.profile, link_id, comment)?;
    session.save()?;

    println!("{}", "Comment added".green());
    Ok(())
}

pub fn categorize(session: &Session, link_id: &str, category: &str) -> Result<()> {
    session
        .store
        .update_link_category(&session.profile, link_id, category)?;
    session.save()?;

    println!("{} {}", "Moved to".green(), category.trim().bold());
    Ok(())
}
