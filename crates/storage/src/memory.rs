//! In-process storage with the same contracts as `PgStorage`.
//!
//! Backs `--in-memory` runs and the service/HTTP test suites. Foreign-key and
//! uniqueness violations are reported with the same `StorageError` variants
//! Postgres would produce.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use prepdesk_core::{
    AdminStats, ChatMessage, CompletionOutcome, Event, EventId, EventQuery, FormSubmission,
    IntakeOutcome, Meeting, MeetingChat, MeetingFilter, MeetingId, MeetingStatus, MeetingView,
    NewEvent, NewMeeting, NewSalesRep, Prospect, ProspectId, RepLoad, SalesRep, SalesRepId,
    least_loaded,
};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::traits::{
    EventStore, MeetingChatStore, MeetingStore, ProspectStore, SalesRepStore, StatsStore,
};

#[derive(Debug, Default)]
struct State {
    prospects: BTreeMap<ProspectId, Prospect>,
    prospect_emails: HashMap<String, ProspectId>,
    reps: BTreeMap<SalesRepId, SalesRep>,
    meetings: BTreeMap<MeetingId, Meeting>,
    chats: HashMap<MeetingId, MeetingChat>,
    events: Vec<Event>,
    sequences: Sequences,
}

/// One counter per table, like a `BIGSERIAL` column each.
#[derive(Debug, Default)]
struct Sequences {
    prospect: i64,
    sales_rep: i64,
    meeting: i64,
    event: i64,
}

fn next(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

impl State {

    fn view(&self, meeting: &Meeting) -> Result<MeetingView, StorageError> {
        let prospect = self.prospects.get(&meeting.prospect_id).ok_or_else(|| {
            StorageError::ForeignKey(format!("meeting {} has no prospect", meeting.id))
        })?;
        let rep = self.reps.get(&meeting.sales_rep_id).ok_or_else(|| {
            StorageError::ForeignKey(format!("meeting {} has no sales rep", meeting.id))
        })?;
        Ok(MeetingView {
            id: meeting.id,
            prospect_id: meeting.prospect_id,
            sales_rep_id: meeting.sales_rep_id,
            meeting_date: meeting.meeting_date,
            status: meeting.status,
            created_at: meeting.created_at,
            updated_at: meeting.updated_at,
            prospect_email: prospect.email.clone(),
            prospect_country: prospect.country.clone(),
            product_interest: prospect.product_interest,
            prospect_message: prospect.message.clone(),
            ai_resources: prospect.ai_resources.clone(),
            resources_completed: prospect.resources_completed.clone(),
            sales_rep_name: rep.name.clone(),
            sales_rep_email: rep.email.clone(),
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    state: Arc<RwLock<State>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProspectStore for MemoryStorage {
    async fn upsert_prospect(
        &self,
        submission: &FormSubmission,
    ) -> Result<IntakeOutcome, StorageError> {
        let mut state = self.state.write().await;
        let now = Utc::now();
        if let Some(id) = state.prospect_emails.get(&submission.email).copied() {
            let prospect = state
                .prospects
                .get_mut(&id)
                .ok_or_else(|| StorageError::not_found("prospect", id))?;
            prospect.country.clone_from(&submission.country);
            prospect.product_interest = submission.product_interest;
            prospect.message.clone_from(&submission.message);
            prospect.updated_at = now;
            return Ok(IntakeOutcome { prospect: prospect.clone(), created: false });
        }
        let id = ProspectId(next(&mut state.sequences.prospect));
        let prospect = Prospect {
            id,
            email: submission.email.clone(),
            country: submission.country.clone(),
            product_interest: submission.product_interest,
            message: submission.message.clone(),
            ai_resources: Vec::new(),
            resources_completed: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        state.prospect_emails.insert(prospect.email.clone(), id);
        state.prospects.insert(id, prospect.clone());
        Ok(IntakeOutcome { prospect, created: true })
    }

    async fn get_prospect(&self, id: ProspectId) -> Result<Option<Prospect>, StorageError> {
        Ok(self.state.read().await.prospects.get(&id).cloned())
    }

    async fn complete_resource(
        &self,
        id: ProspectId,
        resource_id: &str,
    ) -> Result<CompletionOutcome, StorageError> {
        let mut state = self.state.write().await;
        let prospect =
            state.prospects.get_mut(&id).ok_or_else(|| StorageError::not_found("prospect", id))?;
        if prospect.has_completed(resource_id) {
            return Ok(CompletionOutcome::AlreadyCompleted);
        }
        prospect.resources_completed.push(resource_id.to_owned());
        prospect.updated_at = Utc::now();
        Ok(CompletionOutcome::Completed)
    }

    async fn set_ai_resources(
        &self,
        id: ProspectId,
        resources: &[String],
    ) -> Result<Prospect, StorageError> {
        let mut state = self.state.write().await;
        let prospect =
            state.prospects.get_mut(&id).ok_or_else(|| StorageError::not_found("prospect", id))?;
        prospect.ai_resources = resources.to_vec();
        prospect.updated_at = Utc::now();
        Ok(prospect.clone())
    }
}

#[async_trait]
impl SalesRepStore for MemoryStorage {
    async fn add_sales_rep(&self, rep: &NewSalesRep) -> Result<SalesRep, StorageError> {
        let mut state = self.state.write().await;
        if state.reps.values().any(|r| r.email == rep.email) {
            return Err(StorageError::Duplicate(format!("sales rep email {}", rep.email)));
        }
        let id = SalesRepId(next(&mut state.sequences.sales_rep));
        let stored =
            SalesRep { id, name: rep.name.clone(), email: rep.email.clone(), created_at: Utc::now() };
        state.reps.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list_sales_reps(&self) -> Result<Vec<SalesRep>, StorageError> {
        let mut reps: Vec<SalesRep> = self.state.read().await.reps.values().cloned().collect();
        reps.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(reps)
    }

    async fn least_loaded_rep(&self) -> Result<Option<RepLoad>, StorageError> {
        let state = self.state.read().await;
        let loads: Vec<RepLoad> = state
            .reps
            .values()
            .map(|rep| RepLoad {
                rep: rep.clone(),
                meeting_count: state
                    .meetings
                    .values()
                    .filter(|m| m.sales_rep_id == rep.id)
                    .count()
                    .try_into()
                    .unwrap_or(i64::MAX),
            })
            .collect();
        Ok(least_loaded(&loads).cloned())
    }
}

#[async_trait]
impl MeetingStore for MemoryStorage {
    async fn create_meeting(&self, meeting: &NewMeeting) -> Result<Meeting, StorageError> {
        let mut state = self.state.write().await;
        if !state.prospects.contains_key(&meeting.prospect_id) {
            return Err(StorageError::ForeignKey(format!("prospect {}", meeting.prospect_id)));
        }
        if !state.reps.contains_key(&meeting.sales_rep_id) {
            return Err(StorageError::ForeignKey(format!("sales rep {}", meeting.sales_rep_id)));
        }
        let now = Utc::now();
        let stored = Meeting {
            id: MeetingId(next(&mut state.sequences.meeting)),
            prospect_id: meeting.prospect_id,
            sales_rep_id: meeting.sales_rep_id,
            meeting_date: meeting.meeting_date,
            status: MeetingStatus::Scheduled,
            created_at: now,
            updated_at: now,
        };
        state.meetings.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list_meetings(
        &self,
        filter: MeetingFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<MeetingView>, StorageError> {
        let state = self.state.read().await;
        let mut future: Vec<&Meeting> = state
            .meetings
            .values()
            .filter(|m| m.meeting_date >= now)
            .filter(|m| match filter {
                MeetingFilter::ByRep(rep) => m.sales_rep_id == rep,
                MeetingFilter::ByProspect(prospect) => m.prospect_id == prospect,
                MeetingFilter::Upcoming => true,
            })
            .collect();
        future.sort_by_key(|m| (m.meeting_date, m.id));
        if let MeetingFilter::ByProspect(_) = filter {
            future = future.last().copied().into_iter().collect();
        }
        future.into_iter().map(|m| state.view(m)).collect()
    }

    async fn get_meeting(&self, id: MeetingId) -> Result<Option<MeetingView>, StorageError> {
        let state = self.state.read().await;
        state.meetings.get(&id).map(|m| state.view(m)).transpose()
    }

    async fn update_meeting_status(
        &self,
        id: MeetingId,
        status: MeetingStatus,
    ) -> Result<Option<Meeting>, StorageError> {
        let mut state = self.state.write().await;
        Ok(state.meetings.get_mut(&id).map(|m| {
            m.status = status;
            m.updated_at = Utc::now();
            m.clone()
        }))
    }
}

#[async_trait]
impl MeetingChatStore for MemoryStorage {
    async fn save_transcript(
        &self,
        meeting_id: MeetingId,
        messages: &[ChatMessage],
    ) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        if !state.meetings.contains_key(&meeting_id) {
            return Err(StorageError::ForeignKey(format!("meeting {meeting_id}")));
        }
        let now = Utc::now();
        let chat = state.chats.entry(meeting_id).or_insert_with(|| MeetingChat {
            meeting_id,
            messages: Vec::new(),
            game_plan: None,
            updated_at: now,
        });
        chat.messages = messages.to_vec();
        chat.updated_at = now;
        Ok(())
    }

    async fn get_meeting_chat(
        &self,
        meeting_id: MeetingId,
    ) -> Result<Option<MeetingChat>, StorageError> {
        Ok(self.state.read().await.chats.get(&meeting_id).cloned())
    }

    async fn save_game_plan(&self, meeting_id: MeetingId, plan: &str) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        if !state.meetings.contains_key(&meeting_id) {
            return Err(StorageError::ForeignKey(format!("meeting {meeting_id}")));
        }
        let now = Utc::now();
        let chat = state.chats.entry(meeting_id).or_insert_with(|| MeetingChat {
            meeting_id,
            messages: Vec::new(),
            game_plan: None,
            updated_at: now,
        });
        chat.game_plan = Some(plan.to_owned());
        chat.updated_at = now;
        Ok(())
    }
}

#[async_trait]
impl EventStore for MemoryStorage {
    async fn record_event(&self, event: &NewEvent) -> Result<EventId, StorageError> {
        let mut state = self.state.write().await;
        let id = EventId(next(&mut state.sequences.event));
        state.events.push(Event {
            id,
            user: event.user.clone(),
            event_type: event.event_type.clone(),
            event_name: event.event_name.clone(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_events(&self, query: &EventQuery) -> Result<Vec<Event>, StorageError> {
        let state = self.state.read().await;
        Ok(state.events.iter().filter(|e| query.matches(e)).cloned().collect())
    }
}

#[async_trait]
impl StatsStore for MemoryStorage {
    async fn admin_stats(&self, now: DateTime<Utc>) -> Result<AdminStats, StorageError> {
        let state = self.state.read().await;
        let count = |pred: &dyn Fn(&Meeting) -> bool| -> i64 {
            state.meetings.values().filter(|m| pred(m)).count().try_into().unwrap_or(i64::MAX)
        };
        Ok(AdminStats {
            total_meetings: count(&|_| true),
            upcoming_meetings: count(&|m| m.is_upcoming(now)),
            completed_meetings: count(&|m| m.status == MeetingStatus::Completed),
            total_prospects: state.prospects.len().try_into().unwrap_or(i64::MAX),
        })
    }
}
