use anyhow::Result;
use homecal_core::search::{search_events, search_links};
use owo_colors::OwoColorize;

use crate::render::{Render, event_line, pluralize};
use crate::session::Session;

pub fn run(session: &Session, query: &str, links: bool) -> Result<()> {
    if links {
        let found = search_links(&session.links(), query);
        println!(
            "{}",
            format!("{} {} matching \"{query}\"", found.len(), pluralize("link", found.len())).dimmed()
        );
        for link in &found {
            println!("{}", link.render());
        }
    } else {
        let found = search_events(&session.events(), query);
        println!(
            "{}",
            format!("{} {} matching \"{query}\"", found.len(), pluralize("event", found.len())).dimmed()
        );
        for event in &found {
            println!("  {}", event_line(event, session.zone, session.default_color));
        }
    }

    Ok(())
}
