//! Command handlers. Each one maps tracker errors to a readable message and
//! leaves the stored dataset alone unless the whole operation succeeded.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Context;
use notefollow_tracker::TrackerError;

use crate::render;
use crate::CliTracker;

/// Look up a creator and print a preview.
pub(crate) async fn run_check(tracker: &CliTracker, creator_id: &str) -> anyhow::Result<()> {
    let creator = tracker
        .check_profile(creator_id)
        .await
        .map_err(user_error)?;
    print!("{}", render::creator_preview(&creator));
    Ok(())
}

/// First-time setup. The tracker refuses to overwrite an existing dataset.
pub(crate) async fn run_track(tracker: &CliTracker, creator_id: &str) -> anyhow::Result<()> {
    let creator = tracker
        .check_profile(creator_id)
        .await
        .map_err(user_error)?;
    print!("{}", render::creator_preview(&creator));

    let dataset = tracker.start_tracking_with(&creator).map_err(user_error)?;
    println!("now tracking '{}'", dataset.creator_id);
    Ok(())
}

pub(crate) async fn run_refresh(tracker: &CliTracker) -> anyhow::Result<()> {
    tracker.refresh().await.map_err(user_error)?;
    let view = tracker.dashboard().map_err(user_error)?;
    print!("{}", render::dashboard(&view));
    Ok(())
}

pub(crate) fn run_show(tracker: &CliTracker) -> anyhow::Result<()> {
    let view = tracker.dashboard().map_err(user_error)?;
    print!("{}", render::dashboard(&view));
    Ok(())
}

pub(crate) async fn run_change(
    tracker: &CliTracker,
    creator_id: &str,
    yes: bool,
) -> anyhow::Result<()> {
    let confirmed = yes
        || confirm("Changing the creator deletes all recorded data. Continue?")?;
    if !confirmed {
        println!("cancelled");
        return Ok(());
    }

    let dataset = tracker
        .change_creator(creator_id, true)
        .await
        .map_err(user_error)?;
    println!("now tracking '{}'", dataset.creator_id);
    Ok(())
}

pub(crate) fn run_export(tracker: &CliTracker, out: Option<&Path>) -> anyhow::Result<()> {
    let export = tracker.export().map_err(user_error)?;
    let dir = out.unwrap_or_else(|| Path::new("."));
    let path = dir.join(&export.filename);

    std::fs::write(&path, &export.bytes)
        .with_context(|| format!("failed to write export to {}", path.display()))?;
    tracing::info!(path = %path.display(), "exported dataset");
    println!("exported to {}", path.display());
    Ok(())
}

pub(crate) fn run_import(tracker: &CliTracker, file: &Path, yes: bool) -> anyhow::Result<()> {
    let bytes = std::fs::read(file)
        .with_context(|| format!("failed to read import file {}", file.display()))?;

    let confirmed = yes || confirm("Importing overwrites the current data. Continue?")?;
    if !confirmed {
        println!("cancelled");
        return Ok(());
    }

    let imported = tracker.import(&bytes, true).map_err(user_error)?;
    for warning in &imported.warnings {
        println!("warning: {warning}");
    }
    println!(
        "imported {} records for '{}'",
        imported.dataset.records.len(),
        imported.dataset.creator_id
    );
    Ok(())
}

pub(crate) fn run_reset(tracker: &CliTracker, yes: bool) -> anyhow::Result<()> {
    let confirmed = yes || confirm("Delete all data? This cannot be undone.")?;
    if !confirmed {
        println!("cancelled");
        return Ok(());
    }

    tracker.reset(true).map_err(user_error)?;
    println!("all data deleted");
    Ok(())
}

/// Ask a yes/no question on stdin; anything but `y`/`yes` declines.
fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Turns tracker failures into the messages a user should see.
fn user_error(err: TrackerError) -> anyhow::Error {
    tracing::debug!(error = ?err, "command failed");
    match err {
        TrackerError::NotTracking => {
            anyhow::anyhow!("no creator is tracked yet; run `notefollow track <creator-id>` first")
        }
        TrackerError::Busy => {
            anyhow::anyhow!("another notefollow command is updating the data; try again shortly")
        }
        TrackerError::AlreadyTracking { creator_id } => anyhow::anyhow!(
            "already tracking '{creator_id}'; use `notefollow change <creator-id>` to switch creators"
        ),
        TrackerError::Fetch(notefollow_client::ClientError::NotFound { creator_id }) => {
            anyhow::anyhow!("creator '{creator_id}' was not found")
        }
        TrackerError::Fetch(e) => anyhow::anyhow!("failed to fetch data: {e}"),
        TrackerError::Import(e) => {
            anyhow::anyhow!("import failed; check the file format ({e})")
        }
        TrackerError::Persistence(e) => anyhow::anyhow!("failed to save data: {e}"),
        other => anyhow::Error::new(other),
    }
}
