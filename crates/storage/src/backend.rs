//! Unified storage backend with enum dispatch.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use prepdesk_core::{
    AdminStats, ChatMessage, CompletionOutcome, Event, EventId, EventQuery, FormSubmission,
    IntakeOutcome, Meeting, MeetingChat, MeetingFilter, MeetingId, MeetingStatus, MeetingView,
    NewEvent, NewMeeting, NewSalesRep, Prospect, ProspectId, RepLoad, SalesRep,
};

use crate::error::StorageError;
use crate::memory::MemoryStorage;
use crate::pg_storage::PgStorage;
use crate::traits::{
    EventStore, MeetingChatStore, MeetingStore, ProspectStore, SalesRepStore, StatsStore,
};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::Postgres(s) => <PgStorage as $trait>::$method(s, $($arg),*).await,
            StorageBackend::Memory(s) => <MemoryStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

/// The one store handle the process owns. Built in `main`, shared via `Arc`.
#[derive(Clone, Debug)]
pub enum StorageBackend {
    Postgres(PgStorage),
    Memory(MemoryStorage),
}

impl StorageBackend {
    pub async fn new_postgres(
        database_url: &str,
        max_connections: u32,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        Ok(Self::Postgres(PgStorage::new(database_url, max_connections, timeout).await?))
    }

    #[must_use]
    pub fn new_memory() -> Self {
        Self::Memory(MemoryStorage::new())
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match *self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    /// Release connections. Safe to call more than once.
    pub async fn close(&self) {
        match self {
            Self::Postgres(s) => s.close().await,
            Self::Memory(_) => {},
        }
    }
}

// ── ProspectStore ────────────────────────────────────────────────

#[async_trait]
impl ProspectStore for StorageBackend {
    async fn upsert_prospect(
        &self,
        submission: &FormSubmission,
    ) -> Result<IntakeOutcome, StorageError> {
        dispatch!(self, ProspectStore, upsert_prospect(submission))
    }

    async fn get_prospect(&self, id: ProspectId) -> Result<Option<Prospect>, StorageError> {
        dispatch!(self, ProspectStore, get_prospect(id))
    }

    async fn complete_resource(
        &self,
        id: ProspectId,
        resource_id: &str,
    ) -> Result<CompletionOutcome, StorageError> {
        dispatch!(self, ProspectStore, complete_resource(id, resource_id))
    }

    async fn set_ai_resources(
        &self,
        id: ProspectId,
        resources: &[String],
    ) -> Result<Prospect, StorageError> {
        dispatch!(self, ProspectStore, set_ai_resources(id, resources))
    }
}

// ── SalesRepStore ────────────────────────────────────────────────

#[async_trait]
impl SalesRepStore for StorageBackend {
    async fn add_sales_rep(&self, rep: &NewSalesRep) -> Result<SalesRep, StorageError> {
        dispatch!(self, SalesRepStore, add_sales_rep(rep))
    }

    async fn list_sales_reps(&self) -> Result<Vec<SalesRep>, StorageError> {
        dispatch!(self, SalesRepStore, list_sales_reps())
    }

    async fn least_loaded_rep(&self) -> Result<Option<RepLoad>, StorageError> {
        dispatch!(self, SalesRepStore, least_loaded_rep())
    }
}

// ── MeetingStore ─────────────────────────────────────────────────

#[async_trait]
impl MeetingStore for StorageBackend {
    async fn create_meeting(&self, meeting: &NewMeeting) -> Result<Meeting, StorageError> {
        dispatch!(self, MeetingStore, create_meeting(meeting))
    }

    async fn list_meetings(
        &self,
        filter: MeetingFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<MeetingView>, StorageError> {
        dispatch!(self, MeetingStore, list_meetings(filter, now))
    }

    async fn get_meeting(&self, id: MeetingId) -> Result<Option<MeetingView>, StorageError> {
        dispatch!(self, MeetingStore, get_meeting(id))
    }

    async fn update_meeting_status(
        &self,
        id: MeetingId,
        status: MeetingStatus,
    ) -> Result<Option<Meeting>, StorageError> {
        dispatch!(self, MeetingStore, update_meeting_status(id, status))
    }
}

// ── MeetingChatStore ─────────────────────────────────────────────

#[async_trait]
impl MeetingChatStore for StorageBackend {
    async fn save_transcript(
        &self,
        meeting_id: MeetingId,
        messages: &[ChatMessage],
    ) -> Result<(), StorageError> {
        dispatch!(self, MeetingChatStore, save_transcript(meeting_id, messages))
    }

    async fn get_meeting_chat(
        &self,
        meeting_id: MeetingId,
    ) -> Result<Option<MeetingChat>, StorageError> {
        dispatch!(self, MeetingChatStore, get_meeting_chat(meeting_id))
    }

    async fn save_game_plan(&self, meeting_id: MeetingId, plan: &str) -> Result<(), StorageError> {
        dispatch!(self, MeetingChatStore, save_game_plan(meeting_id, plan))
    }
}

// ── EventStore ───────────────────────────────────────────────────

#[async_trait]
impl EventStore for StorageBackend {
    async fn record_event(&self, event: &NewEvent) -> Result<EventId, StorageError> {
        dispatch!(self, EventStore, record_event(event))
    }

    async fn list_events(&self, query: &EventQuery) -> Result<Vec<Event>, StorageError> {
        dispatch!(self, EventStore, list_events(query))
    }
}

// ── StatsStore ───────────────────────────────────────────────────

#[async_trait]
impl StatsStore for StorageBackend {
    async fn admin_stats(&self, now: DateTime<Utc>) -> Result<AdminStats, StorageError> {
        dispatch!(self, StatsStore, admin_stats(now))
    }
}
