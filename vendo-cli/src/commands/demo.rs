//! Demo command handler
//!
//! Runs a scripted walkthrough of the marketplace: seeding the catalog,
//! registering a provider, dispatching jobs, rating, and reviewing.

use std::time::Duration;

use anyhow::Result;
use colored::*;
use vendo_core::domain::review::AuthorRole;
use vendo_core::dto::job::SubmitJob;
use vendo_core::dto::provider::RegisterProvider;
use vendo_core::dto::review::{PostResponse, PostReview};
use vendo_engine::Marketplace;

use crate::config::Config;
use crate::output;

/// How long the demo waits for any single job to resolve
const RESOLVE_WAIT: Duration = Duration::from_secs(10);

/// Run the scripted marketplace walkthrough
pub async fn run_demo(config: &Config) -> Result<()> {
    let market = Marketplace::start(config.seeded_engine_config()?)?;

    println!("{}", "Vendo marketplace demo".bold());
    println!(
        "{}",
        format!(
            "  user: {}  provider: {}",
            config.user_key, config.provider_key
        )
        .dimmed()
    );
    println!();

    // Step 1: the seeded catalog
    println!("{}", "1. Job type catalog".bold());
    for entry in market.list_job_types() {
        output::print_job_type(&entry);
    }
    println!();

    // Step 2: provider registration
    println!("{}", "2. Provider registration".bold());
    let provider = market.register_provider(RegisterProvider {
        provider_id: config.provider_key.clone(),
        job_types: vec![
            "text_generation".to_string(),
            "translation".to_string(),
            "image_generation".to_string(),
        ],
        endpoint: "https://provider1.com".to_string(),
    })?;
    println!(
        "{}",
        format!("✓ Registered {} for {} job type(s)", provider.id, provider.job_types.len())
            .green()
    );
    println!();
    for summary in market.list_providers() {
        output::print_provider_summary(&summary);
    }

    // Step 3: a job someone serves
    println!("{}", "3. Dispatching a text_generation job".bold());
    let job = market.submit_job(SubmitJob::new("text_generation", "hello", &config.user_key))?;
    println!("  Submitted job {}", job.id.to_string().dimmed());
    let resolved = market.wait_resolved(job.id, RESOLVE_WAIT).await?;
    output::print_job_details(&resolved);
    println!();

    // Step 4: a job nobody serves
    println!("{}", "4. Dispatching a video_generation job (no provider)".bold());
    let job = market.submit_job(SubmitJob::new(
        "video_generation",
        "a cat riding a skateboard",
        &config.user_key,
    ))?;
    println!("  Submitted job {}", job.id.to_string().dimmed());
    let resolved = market.wait_resolved(job.id, RESOLVE_WAIT).await?;
    output::print_job_details(&resolved);
    println!();
    println!("  The unserved type now shows up as demand:");
    for entry in market.list_job_types() {
        if entry.requested {
            output::print_job_type(&entry);
        }
    }
    println!();

    // Step 5: rating the provider
    println!("{}", "5. Rating the provider".bold());
    market.rate_provider(&config.provider_key, 3, None)?;
    market.rate_provider(
        &config.provider_key,
        5,
        Some("fast and accurate".to_string()),
    )?;
    let summary = market.rating_summary(&config.provider_key);
    println!(
        "  {} now rated {}",
        config.provider_key,
        output::format_rating(summary.average_rating, summary.rating_count)
    );
    println!();

    // Step 6: a review with a response
    println!("{}", "6. Review thread".bold());
    let review = market.add_review(PostReview {
        rating: 5,
        text: "Great turnaround on text generation.".to_string(),
        author: AuthorRole::User,
    })?;
    market.respond_to_review(
        review.id,
        PostResponse {
            text: "Thanks! Happy to serve more jobs.".to_string(),
            author: AuthorRole::Provider,
        },
    )?;
    for review in market.list_reviews() {
        output::print_review(&review);
    }

    // Step 7: everything that resolved, in resolution order
    println!("{}", "7. Resolved jobs".bold());
    for job in market.list_resolved() {
        output::print_job_summary(&job);
    }

    market.shutdown().await;

    println!("{}", "✓ Demo complete!".green().bold());
    println!();
    println!("{}", "Next steps:".bold());
    println!(
        "  Run {} to drive the marketplace yourself",
        "vendo shell".cyan()
    );

    Ok(())
}
