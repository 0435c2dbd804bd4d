//! Core types for homecal, a shared household calendar.
//!
//! This crate holds everything below the presentation layer:
//! - `grid`, `index`, `span` and `schedule` turn a snapshot of events into
//!   month grids, per-day buckets and hour-by-hour day layouts
//! - `Event`, `SharedLink` and `UserProfile` describe what a household shares
//! - `store` defines the seams to persistence and identity, plus an
//!   in-memory implementation
//!
//! The layout functions are pure: time zone and clock are always passed in.

pub mod color;
pub mod config;
pub mod constants;
pub mod draft;
pub mod error;
pub mod event;
pub mod format;
pub mod grid;
pub mod index;
pub mod link;
pub mod profile;
pub mod schedule;
pub mod search;
pub mod span;
pub mod store;
pub mod time;

pub use color::EventColor;
pub use config::HomecalConfig;
pub use draft::EventDraft;
pub use error::{CoreError, CoreResult};
pub use event::{Event, RepeatFrequency};
pub use grid::{GridCell, MonthGrid, YearMonth, build_month_cells};
pub use index::{DayPreview, EventIndex, upcoming};
pub use link::{LinkComment, SharedLink};
pub use profile::UserProfile;
pub use schedule::{DaySchedule, HourRow, ScheduledEvent};
pub use span::{DaySpan, project_onto_day};
pub use store::{
    AuthUser, EventStore, IdentityProvider, LinkStore, MemoryStore, ProfileStore, Subscription,
    ensure_profile,
};
