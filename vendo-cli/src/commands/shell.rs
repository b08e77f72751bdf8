//! Shell command handler
//!
//! An interactive read-eval-print loop over a live marketplace. Every
//! shell command maps onto one engine operation, so the shell doubles as
//! a tour of the public API.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use colored::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use uuid::Uuid;
use vendo_core::domain::review::AuthorRole;
use vendo_core::dto::job::SubmitJob;
use vendo_core::dto::provider::RegisterProvider;
use vendo_core::dto::review::{PostResponse, PostReview};
use vendo_engine::{EngineError, Marketplace, MarketSnapshot};

use crate::config::Config;
use crate::output;

/// How long `submit` waits before reporting a job as still pending
const RESOLVE_WAIT: Duration = Duration::from_secs(10);

/// Run the interactive marketplace shell
pub async fn run_shell(config: &Config, load: Option<String>) -> Result<()> {
    let market = match load {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read snapshot file: {}", path))?;
            let snapshot: MarketSnapshot = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse snapshot file: {}", path))?;
            println!(
                "{}",
                format!("Loaded {} record(s) from {}", snapshot.record_count(), path).dimmed()
            );
            Marketplace::restore(config.engine_config()?, snapshot)?
        }
        None => Marketplace::start(config.seeded_engine_config()?)?,
    };

    println!("{}", "Vendo marketplace shell".bold());
    println!(
        "{}",
        "Type 'help' for available commands, 'quit' to exit.".dimmed()
    );

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("{} ", "vendo>".cyan());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        if matches!(command, "quit" | "exit") {
            break;
        }

        if let Err(e) = run_command(&market, config, command, &args).await {
            println!("{}", format!("✗ {:#}", e).red());
        }
    }

    market.shutdown().await;
    println!("{}", "Goodbye!".dimmed());

    Ok(())
}

/// Route a single shell command to its handler
async fn run_command(
    market: &Marketplace,
    config: &Config,
    command: &str,
    args: &[&str],
) -> Result<()> {
    match command {
        "help" => print_help(),
        "types" => list_types(market),
        "providers" => list_providers(market),
        "provider" => show_provider(market, args)?,
        "register" => register_provider(market, args)?,
        "submit" => submit_job(market, config, args).await?,
        "job" => show_job(market, args)?,
        "jobs" => list_jobs(market),
        "rate" => rate_provider(market, args)?,
        "ratings" => show_ratings(market, args)?,
        "review" => post_review(market, args)?,
        "respond" => respond_to_review(market, args)?,
        "reviews" => list_reviews(market),
        "summary" => print_summary(market),
        "snapshot" => save_snapshot(market, args)?,
        other => bail!("Unknown command: {} (try 'help')", other),
    }

    Ok(())
}

/// Print the command reference
fn print_help() {
    println!("{}", "Available commands:".bold());
    println!("  {}  List catalog entries", "types                               ".cyan());
    println!("  {}  List registered providers", "providers                           ".cyan());
    println!("  {}  Show one provider with its ratings", "provider <id>                       ".cyan());
    println!("  {}  Register or update a provider", "register <id> <type,type> [endpoint]".cyan());
    println!("  {}  Submit a job and wait for it", "submit <type> <input...>            ".cyan());
    println!("  {}  Show one job", "job <id>                            ".cyan());
    println!("  {}  List resolved jobs", "jobs                                ".cyan());
    println!("  {}  Rate a provider", "rate <id> <1-5> [feedback...]       ".cyan());
    println!("  {}  Show a provider's rating history", "ratings <id>                        ".cyan());
    println!("  {}  Post a review as the user", "review <1-5> <text...>              ".cyan());
    println!("  {}  Respond to a review as the provider", "respond <review_id> <text...>       ".cyan());
    println!("  {}  List reviews with responses", "reviews                             ".cyan());
    println!("  {}  Show record counts", "summary                             ".cyan());
    println!("  {}  Save state to a JSON file", "snapshot <path>                     ".cyan());
    println!("  {}  Leave the shell", "quit                                ".cyan());
}

/// List all catalog entries
fn list_types(market: &Marketplace) {
    let types = market.list_job_types();

    if types.is_empty() {
        println!("{}", "No job types in the catalog.".yellow());
    } else {
        println!("{}", format!("Found {} job type(s):", types.len()).bold());
        for entry in types {
            output::print_job_type(&entry);
        }
    }
}

/// List all registered providers
fn list_providers(market: &Marketplace) {
    let providers = market.list_providers();

    if providers.is_empty() {
        println!("{}", "No providers registered.".yellow());
    } else {
        println!(
            "{}",
            format!("Found {} registered provider(s):", providers.len()).bold()
        );
        println!();
        for provider in providers {
            output::print_provider_summary(&provider);
        }
    }
}

/// Show one provider and its rating history
fn show_provider(market: &Marketplace, args: &[&str]) -> Result<()> {
    let [provider_id] = args else {
        bail!("Usage: provider <id>");
    };

    let provider = market.get_provider(provider_id)?;
    let summary = market.rating_summary(provider_id);

    println!("{}", "Provider Details:".bold());
    println!("  ID:         {}", provider.id.cyan());
    println!("  Endpoint:   {}", provider.endpoint);
    println!(
        "  Job Types:  {}",
        provider.job_types.iter().cloned().collect::<Vec<_>>().join(", ")
    );
    println!(
        "  Rating:     {}",
        output::format_rating(summary.average_rating, summary.rating_count)
    );
    println!(
        "  Registered: {}",
        provider.registered_at.format("%Y-%m-%d %H:%M:%S")
    );

    Ok(())
}

/// Register or update a provider
fn register_provider(market: &Marketplace, args: &[&str]) -> Result<()> {
    let (provider_id, types, endpoint) = match args {
        [id, types] => (*id, *types, format!("https://{}.example", id)),
        [id, types, endpoint] => (*id, *types, endpoint.to_string()),
        _ => bail!("Usage: register <id> <type,type> [endpoint]"),
    };

    let job_types: Vec<String> = types
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    let provider = market.register_provider(RegisterProvider {
        provider_id: provider_id.to_string(),
        job_types,
        endpoint,
    })?;

    println!(
        "{}",
        format!(
            "✓ Registered {} for {} job type(s)",
            provider.id,
            provider.job_types.len()
        )
        .green()
    );

    Ok(())
}

/// Submit a job and wait briefly for its resolution
async fn submit_job(market: &Marketplace, config: &Config, args: &[&str]) -> Result<()> {
    let [job_type, input @ ..] = args else {
        bail!("Usage: submit <type> <input...>");
    };
    if input.is_empty() {
        bail!("Usage: submit <type> <input...>");
    }

    let job = market.submit_job(SubmitJob::new(*job_type, input.join(" "), &config.user_key))?;
    println!("  Submitted job {}", job.id.to_string().dimmed());

    match market.wait_resolved(job.id, RESOLVE_WAIT).await {
        Ok(resolved) => output::print_job_details(&resolved),
        Err(EngineError::WaitTimeout(_)) => {
            println!(
                "{}",
                "Job is still pending; check it later with 'job <id>'.".yellow()
            );
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Show one job by id
fn show_job(market: &Marketplace, args: &[&str]) -> Result<()> {
    let [id] = args else {
        bail!("Usage: job <id>");
    };

    let job_id = Uuid::parse_str(id).context("Invalid job id")?;
    let job = market.get_job(job_id)?;
    output::print_job_details(&job);

    Ok(())
}

/// List resolved jobs in resolution order
fn list_jobs(market: &Marketplace) {
    let jobs = market.list_resolved();

    if jobs.is_empty() {
        println!("{}", "No resolved jobs yet.".yellow());
    } else {
        println!("{}", format!("Found {} resolved job(s):", jobs.len()).bold());
        println!();
        for job in jobs {
            output::print_job_summary(&job);
        }
    }
}

/// Rate a provider
fn rate_provider(market: &Marketplace, args: &[&str]) -> Result<()> {
    let [provider_id, rating, feedback @ ..] = args else {
        bail!("Usage: rate <id> <1-5> [feedback...]");
    };

    let rating: u8 = rating.parse().context("Rating must be a number from 1 to 5")?;
    let feedback = if feedback.is_empty() {
        None
    } else {
        Some(feedback.join(" "))
    };

    market.rate_provider(provider_id, rating, feedback)?;

    let summary = market.rating_summary(provider_id);
    println!(
        "{} {} now rated {}",
        "✓".green(),
        provider_id,
        output::format_rating(summary.average_rating, summary.rating_count)
    );

    Ok(())
}

/// Show a provider's full rating history
fn show_ratings(market: &Marketplace, args: &[&str]) -> Result<()> {
    let [provider_id] = args else {
        bail!("Usage: ratings <id>");
    };

    // Resolve first so unknown providers error instead of printing nothing
    market.get_provider(provider_id)?;

    let ratings = market.provider_ratings(provider_id);
    if ratings.is_empty() {
        println!("{}", "No ratings yet for this provider.".yellow());
        return Ok(());
    }

    let summary = market.rating_summary(provider_id);
    println!(
        "{} {}",
        format!("Ratings for {}:", provider_id).bold(),
        output::format_rating(summary.average_rating, summary.rating_count)
    );
    for rating in ratings {
        let feedback = rating.feedback.as_deref().unwrap_or("-");
        println!(
            "  {} {}  {}  {}",
            "▸".cyan(),
            "★".repeat(rating.rating as usize).yellow(),
            rating.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
            feedback
        );
    }

    Ok(())
}

/// Post a review authored by the user
fn post_review(market: &Marketplace, args: &[&str]) -> Result<()> {
    let [rating, text @ ..] = args else {
        bail!("Usage: review <1-5> <text...>");
    };
    if text.is_empty() {
        bail!("Usage: review <1-5> <text...>");
    }

    let rating: u8 = rating.parse().context("Rating must be a number from 1 to 5")?;
    let review = market.add_review(PostReview {
        rating,
        text: text.join(" "),
        author: AuthorRole::User,
    })?;

    println!(
        "{} Posted review {}",
        "✓".green(),
        review.id.to_string().dimmed()
    );

    Ok(())
}

/// Respond to a review, authored by the provider
fn respond_to_review(market: &Marketplace, args: &[&str]) -> Result<()> {
    let [review_id, text @ ..] = args else {
        bail!("Usage: respond <review_id> <text...>");
    };
    if text.is_empty() {
        bail!("Usage: respond <review_id> <text...>");
    }

    let review_id = Uuid::parse_str(review_id).context("Invalid review id")?;
    market.respond_to_review(
        review_id,
        PostResponse {
            text: text.join(" "),
            author: AuthorRole::Provider,
        },
    )?;

    println!("{} Response posted", "✓".green());

    Ok(())
}

/// List all reviews with their response threads
fn list_reviews(market: &Marketplace) {
    let reviews = market.list_reviews();

    if reviews.is_empty() {
        println!("{}", "No reviews posted yet.".yellow());
    } else {
        println!("{}", format!("Found {} review(s):", reviews.len()).bold());
        println!();
        for review in reviews {
            output::print_review(&review);
        }
    }
}

/// Print record counts across all stores
fn print_summary(market: &Marketplace) {
    println!("{}", "Marketplace summary:".bold());
    println!("  Job types:     {}", market.list_job_types().len());
    println!("  Providers:     {}", market.list_providers().len());
    println!("  Resolved jobs: {}", market.list_resolved().len());
    println!("  Reviews:       {}", market.list_reviews().len());
}

/// Save the full marketplace state to a JSON file
fn save_snapshot(market: &Marketplace, args: &[&str]) -> Result<()> {
    let [path] = args else {
        bail!("Usage: snapshot <path>");
    };

    let snapshot = market.snapshot();
    let json = serde_json::to_string_pretty(&snapshot)
        .context("Failed to serialize snapshot")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write snapshot to {}", path))?;

    println!(
        "{}",
        format!("✓ Saved {} record(s) to {}", snapshot.record_count(), path).green()
    );

    Ok(())
}
