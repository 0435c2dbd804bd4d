use anyhow::Result;
use homecal_core::CoreError;
use homecal_core::store::EventStore;
use owo_colors::OwoColorize;

use crate::session::Session;

pub fn run(session: &Session, id: &str) -> Result<()> {
    let event = session
        .find_event(id)
        .ok_or_else(|| CoreError::EventNotFound(id.to_string()))?;

    session.store.delete_event(&session.profile, &event)?;
    session.save()?;

    println!("{} {}", "Deleted".red(), event.to_string().bold());
    Ok(())
}
