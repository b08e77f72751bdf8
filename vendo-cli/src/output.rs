//! Output helpers
//!
//! Shared display formatting for marketplace entities, used by both the
//! demo walkthrough and the interactive shell.

use colored::*;
use vendo_core::domain::job::{Job, JobStatus};
use vendo_core::domain::review::Review;
use vendo_core::dto::job_type::JobTypeSummary;
use vendo_core::dto::provider::ProviderSummary;

/// Print a catalog entry
pub fn print_job_type(entry: &JobTypeSummary) {
    let demand = if entry.requested {
        format!("requested ({}x)", entry.request_count).yellow()
    } else {
        "offered".green()
    };

    println!(
        "  {} {:<20} {}  {} provider(s)",
        "▸".cyan(),
        entry.name.bold(),
        demand,
        entry.provider_count
    );
}

/// Print a provider summary
pub fn print_provider_summary(provider: &ProviderSummary) {
    println!("  {} Provider {}", "▸".cyan(), provider.id.bold());
    println!("    Endpoint:   {}", provider.endpoint.dimmed());
    println!("    Job Types:  {}", provider.job_types.join(", "));
    println!(
        "    Rating:     {}",
        format_rating(provider.average_rating, provider.rating_count)
    );
    println!(
        "    Registered: {}",
        provider
            .registered_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    println!();
}

/// Print a job summary
pub fn print_job_summary(job: &Job) {
    let status_colored = colorize_status(&job.status);

    println!("  {} Job {}", "▸".cyan(), job.id.to_string().dimmed());
    println!("    Type:      {}", job.job_type);
    println!("    Status:    {}", status_colored);
    println!(
        "    Requested: {}",
        job.requested_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    if let Some(provider) = &job.provider_id {
        println!("    Provider:  {}", provider.dimmed());
    }
    println!();
}

/// Print detailed job information
pub fn print_job_details(job: &Job) {
    let status_colored = colorize_status(&job.status);

    println!("{}", "Job Details:".bold());
    println!("  ID:        {}", job.id.to_string().cyan());
    println!("  Type:      {}", job.job_type);
    println!("  Status:    {}", status_colored);
    println!("  Submitter: {}", job.submitter.dimmed());
    println!("  Input:     {}", job.input);
    if let Some(size) = job.expected_output_size {
        println!("  Expected:  {} bytes", size);
    }
    println!(
        "  Requested: {}",
        job.requested_at.format("%Y-%m-%d %H:%M:%S")
    );

    if let Some(resolved) = job.resolved_at {
        println!("  Resolved:  {}", resolved.format("%Y-%m-%d %H:%M:%S"));

        let duration = resolved.signed_duration_since(job.requested_at);
        println!("  Duration:  {}ms", duration.num_milliseconds());
    }

    if let Some(provider) = &job.provider_id {
        println!("  Provider:  {}", provider);
    }

    if let Some(output) = &job.output {
        println!("\n{}", "Output:".bold());
        println!("  {}", output.green());
    }

    if let Some(error) = &job.error {
        println!("\n{}", "Error:".bold());
        println!("  {}", error.red());
    }
}

/// Print a review with its response thread
pub fn print_review(review: &Review) {
    println!(
        "  {} {} {} by {}",
        "▸".cyan(),
        "★".repeat(review.rating as usize).yellow(),
        format!("({})", review.id).dimmed(),
        review.author.to_string().bold()
    );
    println!("    {}", review.text);

    for response in &review.responses {
        println!(
            "      {} {}: {}",
            "↳".dimmed(),
            response.author.to_string().bold(),
            response.text
        );
    }
    println!();
}

/// Format an average rating with its sample size
pub fn format_rating(average: f64, count: usize) -> ColoredString {
    if count == 0 {
        "unrated".dimmed()
    } else {
        format!("★ {:.1} ({} rating(s))", average, count).yellow()
    }
}

/// Colorize job status for display
pub fn colorize_status(status: &JobStatus) -> ColoredString {
    let status_str = status.to_string();
    match status {
        JobStatus::Pending => status_str.cyan(),
        JobStatus::Completed => status_str.green(),
        JobStatus::Unassigned => status_str.yellow(),
        JobStatus::Failed => status_str.red(),
    }
}
