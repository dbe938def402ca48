use anyhow::{Context, Result};

use binspect::diff::{Change, diff};

use crate::cli_runtime::{Session, resolve_bin};

use super::picker;

pub(super) fn handle_diff(
    from: Option<String>,
    to: Option<String>,
    bin: Option<String>,
    json: bool,
) -> Result<()> {
    let mut session = Session::open()?;
    let client = session.client()?;
    let bin = resolve_bin(&mut session, &client, bin.as_deref(), false)?;
    let records = client
        .get_requests(&bin.id, None)
        .context("fetch requests")?;

    let Some(left) = picker::select_record(from.as_deref(), &records)? else {
        println!("Nothing to diff yet");
        return Ok(());
    };
    let Some(right) = picker::select_record(to.as_deref(), &records)? else {
        println!("Nothing to diff yet");
        return Ok(());
    };

    let report = diff(left, right);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "changes": &report.changes,
                "noMaterialDifferences": report.no_material_differences(),
            }))
            .context("serialize diff json")?
        );
        return Ok(());
    }

    for change in &report.changes {
        println!("{}", render_change(change));
    }
    if report.no_material_differences() {
        println!("No material differences");
    } else {
        println!("{} changes", report.changes.len());
    }
    Ok(())
}

pub(super) fn render_change(change: &Change) -> String {
    match change {
        Change::Method { from, to } => format!("method: {} -> {}", from, to),
        Change::Path { from, to } => format!("path: {} -> {}", from, to),
        Change::Size { from, to } => format!("size: {} -> {}", from, to),
        Change::HeaderAdded { name, value } => format!("header +{}: {}", name, value),
        Change::HeaderRemoved { name, value } => format!("header -{}: {}", name, value),
        Change::HeaderChanged { name, from, to } => {
            format!("header {}: {} -> {}", name, from, to)
        }
    }
}
