//! JSON calendar files.
//!
//! ```json
//! {
//!   "users": [{ "id": "…uuid…", "name": "Alice", "email": "alice@example.com" }],
//!   "events": [{
//!     "title": "Standup",
//!     "start": "2023-05-01T09:00:00Z",
//!     "end": "2023-05-01T09:30:00Z",
//!     "organizer": "…uuid…",
//!     "attendees": ["…uuid…"],
//!     "status": "scheduled"
//!   }]
//! }
//! ```
//!
//! Records are loaded through the [`InMemoryCalendar`] API, so the usual
//! event rules (non-blank titles, known users, valid ranges) apply.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use slot_engine::{
    Event, EventStatus, InMemoryCalendar, ParticipantId, ResponseStatus, TimeRange, User,
};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarFile {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub events: Vec<EventRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserRecord {
    pub id: ParticipantId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventRecord {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub organizer: ParticipantId,
    #[serde(default)]
    pub attendees: Vec<ParticipantId>,
    #[serde(default)]
    pub status: EventStatus,
}

impl CalendarFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read calendar file: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse calendar file: {}", path.display()))
    }

    pub fn into_calendar(self) -> Result<InMemoryCalendar> {
        let mut calendar = InMemoryCalendar::new();

        for record in self.users {
            let mut user = User::new(record.id, record.name, record.email)
                .with_context(|| format!("Invalid user {}", record.id))?;
            if let Some(username) = record.username {
                user = user.with_username(username);
            }
            calendar.add_user(user)?;
        }

        for (index, record) in self.events.into_iter().enumerate() {
            let label = format!("event #{} ('{}')", index + 1, record.title);
            let event = record
                .into_event()
                .with_context(|| format!("Invalid {}", label))?;
            calendar
                .insert_event(event)
                .with_context(|| format!("Cannot add {}", label))?;
        }

        Ok(calendar)
    }
}

impl EventRecord {
    fn into_event(self) -> Result<Event> {
        let range = TimeRange::new(self.start, self.end)?;
        let id = self.id.unwrap_or_else(Uuid::new_v4);
        let mut event = Event::with_id(id, self.title, range, self.organizer)?;
        if let Some(description) = self.description {
            event = event.with_description(description);
        }
        for attendee in self.attendees {
            event.add_attendee(attendee, ResponseStatus::Pending)?;
        }
        match self.status {
            EventStatus::Scheduled => {}
            EventStatus::Cancelled => event.cancel()?,
            EventStatus::Completed => event.complete()?,
        }
        Ok(event)
    }
}
