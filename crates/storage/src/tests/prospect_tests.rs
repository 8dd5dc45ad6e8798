use std::sync::Arc;

use prepdesk_core::{CompletionOutcome, ProductInterest, ProspectId};

use super::{book, create_test_storage, in_days, seed_prospect, seed_rep, submission};
use crate::StorageError;
use crate::traits::ProspectStore;

#[tokio::test]
async fn repeat_submission_updates_in_place() {
    let storage = create_test_storage();
    let first = storage.upsert_prospect(&submission("ada@example.com")).await.unwrap();
    assert!(first.created);
    storage
        .set_ai_resources(first.prospect.id, &["docs-security".to_owned()])
        .await
        .unwrap();

    let mut again = submission("ada@example.com");
    again.country = "DE".to_owned();
    again.product_interest = ProductInterest::V0;
    again.message = None;
    let second = storage.upsert_prospect(&again).await.unwrap();

    assert!(!second.created);
    assert_eq!(second.prospect.id, first.prospect.id);
    assert_eq!(second.prospect.country, "DE");
    assert_eq!(second.prospect.product_interest, ProductInterest::V0);
    assert_eq!(second.prospect.message, None);
    assert_eq!(second.prospect.ai_resources, vec!["docs-security".to_owned()]);
}

#[tokio::test]
async fn distinct_emails_get_distinct_ids() {
    let storage = create_test_storage();
    let a = seed_prospect(&storage, "a@example.com").await;
    let b = seed_prospect(&storage, "b@example.com").await;
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn ids_are_sequential_per_table() {
    let storage = create_test_storage();
    let zed = seed_rep(&storage, "Zed").await;
    let yan = seed_rep(&storage, "Yan").await;
    let prospect = seed_prospect(&storage, "a@x.com").await;
    let meeting = book(&storage, &prospect, &zed, in_days(1)).await;

    assert_eq!(zed.id.get(), 1);
    assert_eq!(yan.id.get(), 2);
    assert_eq!(prospect.id, ProspectId(1));
    assert_eq!(meeting.id.get(), 1);
}

#[tokio::test]
async fn get_unknown_prospect_is_none() {
    let storage = create_test_storage();
    assert!(storage.get_prospect(ProspectId(404)).await.unwrap().is_none());
}

#[tokio::test]
async fn complete_resource_is_idempotent() {
    let storage = create_test_storage();
    let prospect = seed_prospect(&storage, "grace@example.com").await;

    let first = storage.complete_resource(prospect.id, "docs-deployments").await.unwrap();
    let second = storage.complete_resource(prospect.id, "docs-deployments").await.unwrap();
    assert_eq!(first, CompletionOutcome::Completed);
    assert_eq!(second, CompletionOutcome::AlreadyCompleted);

    let stored = storage.get_prospect(prospect.id).await.unwrap().unwrap();
    assert_eq!(stored.resources_completed, vec!["docs-deployments".to_owned()]);
}

#[tokio::test]
async fn complete_resource_unknown_prospect_is_not_found() {
    let storage = create_test_storage();
    let err = storage.complete_resource(ProspectId(9), "docs-security").await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound { entity: "prospect", .. }));
}

#[tokio::test]
async fn concurrent_completions_append_once() {
    let storage = Arc::new(create_test_storage());
    let id = seed_prospect(&storage, "linus@example.com").await.id;

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let storage = Arc::clone(&storage);
            tokio::spawn(async move {
                storage.complete_resource(id, "blog-ai-sdk").await.unwrap()
            })
        })
        .collect();
    let mut completed = 0;
    for handle in handles {
        if handle.await.unwrap().is_new() {
            completed += 1;
        }
    }

    assert_eq!(completed, 1);
    let stored = storage.get_prospect(id).await.unwrap().unwrap();
    assert_eq!(stored.resources_completed.len(), 1);
}

#[tokio::test]
async fn set_ai_resources_unknown_prospect_is_not_found() {
    let storage = create_test_storage();
    let err = storage.set_ai_resources(ProspectId(1), &[]).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}
