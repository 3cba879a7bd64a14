//! Integration tests for URL submission and create-or-find semantics.

mod common;

use crate::common::{count_urls_named, create_test_url, unique_url, TestHarness};
use analyzer_core::common::UrlId;
use analyzer_core::domains::urls::{
    submit_url, validate_and_normalize, FindOrCreate, SubmitError, Url, ValidationError,
};
use analyzer_core::kernel::MockPageFetcher;
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn submitting_with_path_and_query_stores_canonical_name(ctx: &TestHarness) {
    let deps = ctx.deps(MockPageFetcher::new());

    let first = submit_url("https://example.com/page?x=1", &deps)
        .await
        .expect("submission should succeed");
    assert!(first.was_created());
    assert_eq!(first.url().name, "https://example.com");

    let second = submit_url("https://example.com/other", &deps)
        .await
        .expect("resubmission should succeed");
    assert!(matches!(second, FindOrCreate::Existing(_)));
    assert_eq!(second.url().id, first.url().id);

    assert_eq!(
        count_urls_named(&ctx.db_pool, "https://example.com")
            .await
            .unwrap(),
        1
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn find_or_create_is_idempotent(ctx: &TestHarness) {
    let name = validate_and_normalize(&unique_url("idem")).unwrap();

    let first = Url::find_or_create(&name, &ctx.db_pool).await.unwrap();
    let second = Url::find_or_create(&name, &ctx.db_pool).await.unwrap();

    assert!(first.was_created());
    assert!(!second.was_created());
    assert_eq!(first.url().id, second.url().id);
    assert_eq!(count_urls_named(&ctx.db_pool, name.as_str()).await.unwrap(), 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn new_url_has_empty_summary(ctx: &TestHarness) {
    let url = create_test_url(&ctx.db_pool, &unique_url("fresh")).await.unwrap();

    assert_eq!(url.last_check, None);
    assert_eq!(url.last_status_code, None);
    // CURRENT_DATE is evaluated in the database's time zone
    let today = chrono::Utc::now().date_naive();
    assert!((url.created_at - today).num_days().abs() <= 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn concurrent_submissions_create_one_row(ctx: &TestHarness) {
    let name = validate_and_normalize(&unique_url("race")).unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let pool = ctx.db_pool.clone();
        let name = name.clone();
        handles.push(tokio::spawn(async move {
            Url::find_or_create(&name, &pool).await
        }));
    }

    let mut ids = Vec::new();
    let mut created = 0;
    for handle in handles {
        let outcome = handle.await.unwrap().expect("no raw constraint error");
        if outcome.was_created() {
            created += 1;
        }
        ids.push(outcome.url().id);
    }

    assert_eq!(created, 1);
    assert!(ids.iter().all(|id| *id == ids[0]));
    assert_eq!(count_urls_named(&ctx.db_pool, name.as_str()).await.unwrap(), 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn invalid_input_is_rejected_before_storage(ctx: &TestHarness) {
    let deps = ctx.deps(MockPageFetcher::new());
    let before = Url::list_with_last_check(&ctx.db_pool).await.unwrap().len();

    let too_long = format!("https://example.com/{}", "a".repeat(300));
    for raw in ["", "example.com", "ftp://example.com", too_long.as_str()] {
        let result = submit_url(raw, &deps).await;
        assert!(
            matches!(result, Err(SubmitError::Invalid(_))),
            "expected rejection for {:?}",
            raw
        );
    }

    assert!(matches!(
        submit_url(&too_long, &deps).await,
        Err(SubmitError::Invalid(ValidationError::TooLong { .. }))
    ));

    let after = Url::list_with_last_check(&ctx.db_pool).await.unwrap().len();
    assert_eq!(before, after);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn find_by_id_returns_none_for_unknown_id(ctx: &TestHarness) {
    let found = Url::find_by_id(UrlId::from_i64(i64::MAX), &ctx.db_pool)
        .await
        .unwrap();
    assert!(found.is_none());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn list_is_ordered_newest_first(ctx: &TestHarness) {
    let older = create_test_url(&ctx.db_pool, &unique_url("older")).await.unwrap();
    let newer = create_test_url(&ctx.db_pool, &unique_url("newer")).await.unwrap();

    let urls = Url::list_with_last_check(&ctx.db_pool).await.unwrap();
    let position = |id| urls.iter().position(|u| u.id == id).unwrap();

    assert!(position(newer.id) < position(older.id));
}
