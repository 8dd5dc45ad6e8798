//! Shared fixtures for service tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use prepdesk_core::{
    ChatMessage, FormSubmission, Meeting, NewMeeting, NewSalesRep, ProductInterest, Prospect,
    ProspectId, ResourceCatalog, SalesRep, SalesRepId,
};
use prepdesk_llm::{LlmError, SalesAssistant};
use prepdesk_storage::StorageBackend;
use prepdesk_storage::traits::{MeetingStore, ProspectStore, SalesRepStore};
use tokio::sync::Mutex;

pub fn memory_storage() -> Arc<StorageBackend> {
    Arc::new(StorageBackend::new_memory())
}

pub fn submission(email: &str) -> FormSubmission {
    FormSubmission {
        email: email.to_owned(),
        country: "Germany".to_owned(),
        product_interest: ProductInterest::VercelAndV0,
        message: Some("Migrating from a self-hosted stack".to_owned()),
    }
}

pub async fn seed_prospect(storage: &StorageBackend, email: &str) -> Prospect {
    storage.upsert_prospect(&submission(email)).await.unwrap().prospect
}

pub async fn seed_rep(storage: &StorageBackend, name: &str) -> SalesRep {
    storage
        .add_sales_rep(&NewSalesRep {
            name: name.to_owned(),
            email: format!("{}@sales.example.com", name.to_lowercase()),
        })
        .await
        .unwrap()
}

pub async fn book(
    storage: &StorageBackend,
    prospect_id: ProspectId,
    sales_rep_id: SalesRepId,
    meeting_date: DateTime<Utc>,
) -> Meeting {
    storage
        .create_meeting(&NewMeeting { prospect_id, sales_rep_id, meeting_date })
        .await
        .unwrap()
}

/// Scripted assistant. Each call pops the next answer; the last one repeats.
pub struct StubAssistant {
    plans: Mutex<Vec<Result<String, String>>>,
    picks: Mutex<Vec<Result<Vec<String>, String>>>,
    pub plan_calls: AtomicUsize,
    pub pick_calls: AtomicUsize,
    pub last_transcript_len: AtomicUsize,
}

impl StubAssistant {
    pub fn with_plans(plans: Vec<Result<String, String>>) -> Arc<Self> {
        Arc::new(Self {
            plans: Mutex::new(plans),
            picks: Mutex::new(Vec::new()),
            plan_calls: AtomicUsize::new(0),
            pick_calls: AtomicUsize::new(0),
            last_transcript_len: AtomicUsize::new(0),
        })
    }

    pub fn with_picks(picks: Vec<Result<Vec<String>, String>>) -> Arc<Self> {
        Arc::new(Self {
            plans: Mutex::new(Vec::new()),
            picks: Mutex::new(picks),
            plan_calls: AtomicUsize::new(0),
            pick_calls: AtomicUsize::new(0),
            last_transcript_len: AtomicUsize::new(0),
        })
    }

    pub fn plan_calls(&self) -> usize {
        self.plan_calls.load(Ordering::SeqCst)
    }
}

async fn next<T: Clone>(queue: &Mutex<Vec<Result<T, String>>>) -> Result<T, LlmError> {
    let mut queue = queue.lock().await;
    let answer = if queue.len() > 1 { queue.remove(0) } else { queue.first().cloned().unwrap() };
    answer.map_err(LlmError::InvalidOutput)
}

#[async_trait]
impl SalesAssistant for StubAssistant {
    async fn game_plan(
        &self,
        _submission: &FormSubmission,
        transcript: &[ChatMessage],
    ) -> Result<String, LlmError> {
        self.plan_calls.fetch_add(1, Ordering::SeqCst);
        self.last_transcript_len.store(transcript.len(), Ordering::SeqCst);
        next(&self.plans).await
    }

    async fn recommend_resources(
        &self,
        _submission: &FormSubmission,
        _enrichment: &serde_json::Value,
        _catalog: &ResourceCatalog,
    ) -> Result<Vec<String>, LlmError> {
        self.pick_calls.fetch_add(1, Ordering::SeqCst);
        next(&self.picks).await
    }
}
