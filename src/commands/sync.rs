//! `miler sync` command.

use std::env;
use std::path::Path;

use tracing::info;

use crate::adapters::live::connect;
use crate::cli::{ScheduleArgs, SyncArgs};
use crate::config::TrackerConfig;
use crate::context::ServiceContext;
use crate::schedule::Interval;
use crate::sync::{apply, format_plan, format_report, reconcile};

use super::desired_milestones;

/// Execute the `sync` command.
///
/// When `MILER_REPLAY` names a cassette, tracker and clock are served from
/// it and no connection is made. When `MILER_RECORD` names a file, the live
/// session is captured there.
///
/// # Errors
///
/// Returns an error string if configuration is invalid, the tracker cannot
/// be reached, or any milestone write failed.
pub fn run(args: &SyncArgs) -> Result<(), String> {
    // Reject a bad interval before any network traffic.
    args.schedule.interval.parse::<Interval>().map_err(|e| e.to_string())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    runtime.block_on(async {
        let ctx = context_for(args).await?;
        sync_with_context(&ctx, &args.schedule, args.dry_run).await
    })
}

async fn context_for(args: &SyncArgs) -> Result<ServiceContext, String> {
    if let Some(path) = env_path("MILER_REPLAY") {
        info!(path = %path, "replaying session from cassette");
        return ServiceContext::replaying(Path::new(&path));
    }

    let config = TrackerConfig::new(
        args.url.as_deref(),
        args.token.as_deref(),
        args.namespace.as_deref(),
        args.project.as_deref(),
        args.api,
        args.allow_http,
    )
    .map_err(|e| e.to_string())?;
    let tracker = connect(&config).await.map_err(|e| e.to_string())?;

    Ok(match env_path("MILER_RECORD") {
        Some(path) => {
            info!(path = %path, "recording session to cassette");
            ServiceContext::recording(Path::new(&path), tracker)
        }
        None => ServiceContext::live(tracker),
    })
}

fn env_path(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// List, reconcile and apply against the context's tracker.
///
/// # Errors
///
/// Returns an error string if the schedule is invalid, listing fails, the
/// desired set is inconsistent, or any create/reopen failed.
pub async fn sync_with_context(
    ctx: &ServiceContext,
    schedule: &ScheduleArgs,
    dry_run: bool,
) -> Result<(), String> {
    let desired = desired_milestones(schedule, ctx.clock.as_ref()).map_err(|e| e.to_string())?;

    let remote = ctx
        .tracker
        .list_milestones()
        .await
        .map_err(|e| format!("Failed to list milestones: {e}"))?;

    let plan = reconcile(&desired, &remote).map_err(|e| e.to_string())?;
    info!(
        create = plan.to_create.len(),
        reopen = plan.to_reactivate.len(),
        open = plan.already_open.len(),
        "reconciled milestones"
    );

    if dry_run {
        println!("Dry run, would perform:");
        println!("{}", format_plan(&plan));
        return Ok(());
    }

    let report = apply(ctx.tracker.as_ref(), &plan).await;
    println!("Sync complete:");
    println!("{}", format_report(&report));

    if report.failures.is_empty() {
        Ok(())
    } else {
        let attempted = plan.to_create.len() + plan.to_reactivate.len();
        Err(format!("{} of {attempted} milestone writes failed", report.failures.len()))
    }
}
