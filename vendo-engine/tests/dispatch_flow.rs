use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use vendo_core::domain::job::{Job, JobStatus};
use vendo_core::domain::provider::Provider;
use vendo_core::domain::review::AuthorRole;
use vendo_core::dto::job::SubmitJob;
use vendo_core::dto::provider::RegisterProvider;
use vendo_core::dto::review::{PostResponse, PostReview};
use vendo_engine::{Config, EngineError, JobEvent, Marketplace, ProviderInvoker, SelectionPolicy};

const WAIT: Duration = Duration::from_secs(5);

fn register(market: &Marketplace, provider_id: &str, job_types: &[&str]) {
    market
        .register_provider(RegisterProvider {
            provider_id: provider_id.to_string(),
            job_types: job_types.iter().map(|t| t.to_string()).collect(),
            endpoint: format!("https://{provider_id}.example"),
        })
        .unwrap();
}

fn submit(market: &Marketplace, job_type: &str, input: &str) -> Job {
    market
        .submit_job(SubmitJob::new(job_type, input, "user_public_key"))
        .unwrap()
}

struct SlowInvoker {
    delay: Duration,
}

#[async_trait]
impl ProviderInvoker for SlowInvoker {
    async fn invoke(&self, _provider: &Provider, job: &Job) -> anyhow::Result<String> {
        tokio::time::sleep(self.delay).await;
        Ok(format!("Simulated output for {} job", job.job_type))
    }
}

struct FailingInvoker {}

#[async_trait]
impl ProviderInvoker for FailingInvoker {
    async fn invoke(&self, _provider: &Provider, _job: &Job) -> anyhow::Result<String> {
        Err(anyhow!("backend unreachable"))
    }
}

#[tokio::test]
async fn job_against_registered_provider_completes() {
    let market = Marketplace::start(Config::default()).unwrap();
    register(&market, "pk1", &["text_generation"]);

    // Registration reached both the provider record and the catalog
    let provider = market.get_provider("pk1").unwrap();
    assert!(provider.job_types.contains("text_generation"));
    let types = market.list_job_types();
    let entry = types.iter().find(|t| t.name == "text_generation").unwrap();
    assert!(!entry.requested);
    assert_eq!(entry.provider_count, 1);

    let job = submit(&market, "text_generation", "hello");
    assert_eq!(job.status, JobStatus::Pending);

    let resolved = market.wait_resolved(job.id, WAIT).await.unwrap();
    assert_eq!(resolved.status, JobStatus::Completed);
    assert_eq!(resolved.provider_id.as_deref(), Some("pk1"));
    assert_eq!(
        resolved.output.as_deref(),
        Some("Simulated output for text_generation job")
    );
    assert!(resolved.resolved_at.is_some());

    market.shutdown().await;
}

#[tokio::test]
async fn job_against_unserved_type_resolves_unassigned() {
    let market = Marketplace::start(Config::default()).unwrap();
    register(&market, "pk1", &["text_generation"]);

    let job = submit(&market, "video_generation", "a cat video");
    let resolved = market.wait_resolved(job.id, WAIT).await.unwrap();

    assert_eq!(resolved.status, JobStatus::Unassigned);
    let error = resolved.error.unwrap();
    assert!(error.contains("video_generation"));
    assert!(resolved.provider_id.is_none());

    // The unserved type is now visible as requested demand
    let types = market.list_job_types();
    let entry = types.iter().find(|t| t.name == "video_generation").unwrap();
    assert!(entry.requested);
    assert_eq!(entry.request_count, 1);

    market.shutdown().await;
}

#[tokio::test]
async fn resolved_listing_keeps_unassigned_jobs_visible() {
    let market = Marketplace::start(Config::default()).unwrap();
    register(&market, "pk1", &["translation"]);

    let good = submit(&market, "translation", "bonjour");
    let bad = submit(&market, "video_generation", "unserved");
    market.wait_resolved(good.id, WAIT).await.unwrap();
    market.wait_resolved(bad.id, WAIT).await.unwrap();

    let resolved = market.list_resolved();
    assert_eq!(resolved.len(), 2);
    assert!(resolved.iter().any(|j| j.status == JobStatus::Completed));
    assert!(resolved.iter().any(|j| j.status == JobStatus::Unassigned));

    market.shutdown().await;
}

#[tokio::test]
async fn round_robin_alternates_between_providers() {
    // One worker serializes dispatch, making the assignment order exact
    let mut config = Config::default();
    config.dispatch_workers = 1;
    let market = Marketplace::start(config).unwrap();

    register(&market, "pk_a", &["text_generation"]);
    register(&market, "pk_b", &["text_generation"]);

    let mut assigned = Vec::new();
    for i in 0..4 {
        let job = submit(&market, "text_generation", &format!("prompt {i}"));
        let resolved = market.wait_resolved(job.id, WAIT).await.unwrap();
        assigned.push(resolved.provider_id.unwrap());
    }

    assert_eq!(assigned, vec!["pk_a", "pk_b", "pk_a", "pk_b"]);

    market.shutdown().await;
}

#[tokio::test]
async fn least_loaded_spreads_jobs_evenly() {
    let mut config = Config::default().with_policy(SelectionPolicy::LeastLoaded);
    config.dispatch_workers = 1;
    let market = Marketplace::start(config).unwrap();

    register(&market, "pk_a", &["image_generation"]);
    register(&market, "pk_b", &["image_generation"]);

    let mut counts = std::collections::HashMap::new();
    for i in 0..6 {
        let job = submit(&market, "image_generation", &format!("image {i}"));
        let resolved = market.wait_resolved(job.id, WAIT).await.unwrap();
        *counts.entry(resolved.provider_id.unwrap()).or_insert(0u32) += 1;
    }

    assert_eq!(counts.get("pk_a"), Some(&3));
    assert_eq!(counts.get("pk_b"), Some(&3));

    market.shutdown().await;
}

#[tokio::test]
async fn invoker_failure_marks_job_failed() {
    let market =
        Marketplace::with_invoker(Config::default(), Arc::new(FailingInvoker {})).unwrap();
    register(&market, "pk1", &["translation"]);

    let job = submit(&market, "translation", "bonjour");
    let resolved = market.wait_resolved(job.id, WAIT).await.unwrap();

    assert_eq!(resolved.status, JobStatus::Failed);
    assert!(resolved.error.unwrap().contains("backend unreachable"));

    market.shutdown().await;
}

#[tokio::test]
async fn slow_invocation_times_out_to_unassigned() {
    let mut config = Config::default();
    config.dispatch_timeout = Duration::from_millis(50);
    let invoker = Arc::new(SlowInvoker {
        delay: Duration::from_secs(30),
    });
    let market = Marketplace::with_invoker(config, invoker).unwrap();
    register(&market, "pk1", &["text_generation"]);

    let job = submit(&market, "text_generation", "hello");
    let resolved = market.wait_resolved(job.id, WAIT).await.unwrap();

    assert_eq!(resolved.status, JobStatus::Unassigned);
    assert!(resolved.error.unwrap().contains("timed out"));
}

#[tokio::test]
async fn wait_resolved_times_out_while_invocation_runs() {
    let invoker = Arc::new(SlowInvoker {
        delay: Duration::from_secs(30),
    });
    let market = Marketplace::with_invoker(Config::default(), invoker).unwrap();
    register(&market, "pk1", &["text_generation"]);

    let job = submit(&market, "text_generation", "hello");
    let err = market
        .wait_resolved(job.id, Duration::from_millis(50))
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::WaitTimeout(id) if id == job.id));
}

#[tokio::test]
async fn ratings_average_through_the_facade() {
    let market = Marketplace::start(Config::default()).unwrap();
    register(&market, "pk1", &["text_generation"]);

    assert_eq!(market.average_rating("pk1"), 0.0);

    market.rate_provider("pk1", 3, None).unwrap();
    market
        .rate_provider("pk1", 5, Some("solid work".to_string()))
        .unwrap();

    assert_eq!(market.average_rating("pk1"), 4.0);
    let summary = market.rating_summary("pk1");
    assert_eq!(summary.rating_count, 2);

    let err = market.rate_provider("ghost", 4, None).unwrap_err();
    assert!(err.is_not_found());

    market.shutdown().await;
}

#[tokio::test]
async fn review_round_trip_through_the_facade() {
    let market = Marketplace::start(Config::default()).unwrap();

    let review = market
        .add_review(PostReview {
            rating: 5,
            text: "great".to_string(),
            author: AuthorRole::User,
        })
        .unwrap();

    market
        .respond_to_review(
            review.id,
            PostResponse {
                text: "thanks".to_string(),
                author: AuthorRole::Provider,
            },
        )
        .unwrap();

    let reviews = market.list_reviews();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].responses.len(), 1);
    assert_eq!(reviews[0].responses[0].author, AuthorRole::Provider);

    market.shutdown().await;
}

#[tokio::test]
async fn events_report_submission_then_resolution() {
    let market = Marketplace::start(Config::default()).unwrap();
    register(&market, "pk1", &["translation"]);

    let mut events = market.subscribe();
    let job = submit(&market, "translation", "bonjour");

    let first = events.recv().await.unwrap();
    assert!(matches!(&first, JobEvent::Submitted(j) if j.id == job.id));

    let second = events.recv().await.unwrap();
    match second {
        JobEvent::Resolved(resolved) => {
            assert_eq!(resolved.id, job.id);
            assert_eq!(resolved.status, JobStatus::Completed);
        }
        other => panic!("expected a resolution event, got {other:?}"),
    }

    market.shutdown().await;
}

#[tokio::test]
async fn shutdown_drains_already_queued_jobs() {
    let market = Marketplace::start(Config::default()).unwrap();
    register(&market, "pk1", &["text_generation"]);

    let jobs: Vec<Job> = (0..8)
        .map(|i| submit(&market, "text_generation", &format!("prompt {i}")))
        .collect();

    market.shutdown().await;

    for job in jobs {
        let resolved = market.get_job(job.id).unwrap();
        assert_eq!(resolved.status, JobStatus::Completed);
    }
}

#[tokio::test]
async fn snapshot_restore_requeues_pending_jobs() {
    // A very slow invoker keeps the job pending while the snapshot is taken
    let invoker = Arc::new(SlowInvoker {
        delay: Duration::from_secs(60),
    });
    let market = Marketplace::with_invoker(Config::default(), invoker).unwrap();
    register(&market, "pk1", &["text_generation"]);
    market.rate_provider("pk1", 5, None).unwrap();
    let job = submit(&market, "text_generation", "hello");

    let snapshot = market.snapshot();
    assert_eq!(snapshot.providers.len(), 1);
    assert_eq!(snapshot.jobs.len(), 1);
    assert_eq!(snapshot.jobs[0].status, JobStatus::Pending);

    // Restore into a fresh instance with a working invoker
    let restored = Marketplace::restore(Config::default(), snapshot).unwrap();
    let resolved = restored.wait_resolved(job.id, WAIT).await.unwrap();
    assert_eq!(resolved.status, JobStatus::Completed);
    assert_eq!(resolved.provider_id.as_deref(), Some("pk1"));

    // Registry state survived alongside the job
    assert_eq!(restored.average_rating("pk1"), 5.0);
    assert_eq!(restored.list_job_types().len(), 1);

    restored.shutdown().await;
}
