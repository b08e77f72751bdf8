use std::collections::BTreeSet;

use chrono::Utc;
use uuid::Uuid;
use vendo_core::domain::job::{Job, JobOutcome, JobStatus};
use vendo_core::domain::job_type::JobType;
use vendo_core::domain::provider::Provider;
use vendo_core::domain::review::{AuthorRole, Review};
use vendo_core::dto::job::SubmitJob;
use vendo_core::dto::job_type::JobTypeSummary;
use vendo_core::dto::provider::RegisterProvider;

fn sample_job() -> Job {
    Job {
        id: Uuid::new_v4(),
        job_type: "text_generation".to_string(),
        input: "hello".to_string(),
        expected_output_size: Some(1024),
        status: JobStatus::Pending,
        submitter: "user_public_key".to_string(),
        requested_at: Utc::now(),
        resolved_at: None,
        provider_id: None,
        output: None,
        error: None,
    }
}

#[test]
fn job_roundtrips_through_json() {
    let job = sample_job();
    let json = serde_json::to_string(&job).unwrap();
    let recovered: Job = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered.id, job.id);
    assert_eq!(recovered.job_type, job.job_type);
    assert_eq!(recovered.status, JobStatus::Pending);
    assert_eq!(recovered.expected_output_size, Some(1024));
}

#[test]
fn job_status_uses_snake_case_on_the_wire() {
    let json = serde_json::to_value(JobStatus::Unassigned).unwrap();
    assert_eq!(json, serde_json::json!("unassigned"));

    let parsed: JobStatus = serde_json::from_value(serde_json::json!("completed")).unwrap();
    assert_eq!(parsed, JobStatus::Completed);
}

#[test]
fn author_role_uses_lowercase_on_the_wire() {
    let json = serde_json::to_value(AuthorRole::Provider).unwrap();
    assert_eq!(json, serde_json::json!("provider"));

    let parsed: AuthorRole = serde_json::from_value(serde_json::json!("user")).unwrap();
    assert_eq!(parsed, AuthorRole::User);
}

#[test]
fn outcome_roundtrips_through_json() {
    let outcome = JobOutcome::Completed {
        provider_id: "pk1".to_string(),
        output: "Simulated output for text_generation job".to_string(),
    };
    let json = serde_json::to_string(&outcome).unwrap();
    let recovered: JobOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered.status(), JobStatus::Completed);
}

#[test]
fn register_provider_parses_from_json() {
    let req: RegisterProvider = serde_json::from_str(
        r#"{
            "provider_id": "pk1",
            "job_types": ["text_generation", "translation"],
            "endpoint": "https://provider1.com"
        }"#,
    )
    .unwrap();
    assert_eq!(req.provider_id, "pk1");
    assert_eq!(req.job_types.len(), 2);
}

#[test]
fn catalog_summary_counts_providers() {
    let mut providers = BTreeSet::new();
    providers.insert("pk1".to_string());
    providers.insert("pk2".to_string());
    let job_type = JobType {
        name: "image_generation".to_string(),
        requested: false,
        providers,
        request_count: 3,
    };

    let summary = JobTypeSummary::from(&job_type);
    assert_eq!(summary.provider_count, 2);
    assert_eq!(summary.request_count, 3);
    assert!(!summary.requested);
}

#[test]
fn review_thread_roundtrips_through_json() {
    let review = Review {
        id: Uuid::new_v4(),
        rating: 5,
        text: "accurate output".to_string(),
        author: AuthorRole::User,
        created_at: Utc::now(),
        responses: Vec::new(),
    };
    let json = serde_json::to_string(&review).unwrap();
    let recovered: Review = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered.id, review.id);
    assert_eq!(recovered.author, AuthorRole::User);
}

#[test]
fn submit_job_defaults_size_hint_to_none() {
    let req = SubmitJob::new("translation", "bonjour", "user_public_key");
    assert!(req.expected_output_size.is_none());

    let provider = Provider::new("pk1", "https://provider1.com", Utc::now());
    assert!(provider.ratings.is_empty());
}
