//! Test utilities and module declarations for storage tests.

use chrono::{DateTime, Duration, Utc};
use prepdesk_core::{
    FormSubmission, NewMeeting, NewSalesRep, ProductInterest, Prospect, SalesRep,
};

use crate::StorageBackend;
use crate::traits::{MeetingStore, ProspectStore, SalesRepStore};

mod chat_tests;
mod prospect_tests;

pub fn create_test_storage() -> StorageBackend {
    StorageBackend::new_memory()
}

pub fn submission(email: &str) -> FormSubmission {
    FormSubmission {
        email: email.to_owned(),
        country: "NL".to_owned(),
        product_interest: ProductInterest::Vercel,
        message: Some("We deploy twice a day".to_owned()),
    }
}

pub fn in_days(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub async fn seed_prospect(storage: &StorageBackend, email: &str) -> Prospect {
    storage.upsert_prospect(&submission(email)).await.unwrap().prospect
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub async fn seed_rep(storage: &StorageBackend, name: &str) -> SalesRep {
    let email = format!("{}@sales.example.com", name.to_lowercase());
    storage
        .add_sales_rep(&NewSalesRep { name: name.to_owned(), email })
        .await
        .unwrap()
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub async fn book(
    storage: &StorageBackend,
    prospect: &Prospect,
    rep: &SalesRep,
    date: DateTime<Utc>,
) -> prepdesk_core::Meeting {
    storage
        .create_meeting(&NewMeeting {
            prospect_id: prospect.id,
            sales_rep_id: rep.id,
            meeting_date: date,
        })
        .await
        .unwrap()
}
