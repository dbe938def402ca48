use anyhow::{Context, Result};

use binspect::model::RequestRecord;
use binspect::remote::{ExportFormat, RemoteClient};

use crate::cli_runtime::{Session, capture_url, resolve_bin};

use super::{picker, render};

fn snapshot(client: &RemoteClient, bin_id: &str) -> Result<Vec<RequestRecord>> {
    client.get_requests(bin_id, None).context("fetch requests")
}

pub(super) fn handle_requests(bin: Option<String>, json: bool) -> Result<()> {
    let mut session = Session::open()?;
    let client = session.client()?;
    let bin = resolve_bin(&mut session, &client, bin.as_deref(), false)?;
    let records = snapshot(&client, &bin.id)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&records).context("serialize requests json")?
        );
        return Ok(());
    }

    if records.is_empty() {
        println!(
            "No requests yet (send one to {})",
            capture_url(&client, &bin)
        );
        return Ok(());
    }
    for (i, record) in records.iter().enumerate() {
        println!("{}", render::request_line((i + 1) as u64, record));
    }
    Ok(())
}

pub(super) fn handle_show(r#ref: Option<String>, bin: Option<String>, json: bool) -> Result<()> {
    let mut session = Session::open()?;
    let client = session.client()?;
    let bin = resolve_bin(&mut session, &client, bin.as_deref(), false)?;
    let records = snapshot(&client, &bin.id)?;

    let Some(record) = picker::select_record(r#ref.as_deref(), &records)? else {
        println!(
            "No requests yet (send one to {})",
            capture_url(&client, &bin)
        );
        return Ok(());
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(record).context("serialize request json")?
        );
    } else {
        render::print_record(record);
    }
    Ok(())
}

pub(super) fn handle_open(r#ref: Option<String>, bin: Option<String>) -> Result<()> {
    let mut session = Session::open()?;
    let client = session.client()?;
    let bin = resolve_bin(&mut session, &client, bin.as_deref(), false)?;
    let records = snapshot(&client, &bin.id)?;

    let Some(record) = picker::select_record(r#ref.as_deref(), &records)? else {
        println!(
            "No requests yet (send one to {})",
            capture_url(&client, &bin)
        );
        return Ok(());
    };

    println!(
        "{}/bins/{}/requests/{}",
        client.base_url(),
        bin.id,
        record.id
    );
    Ok(())
}

pub(super) fn handle_replay(
    r#ref: Option<String>,
    target: String,
    bin: Option<String>,
) -> Result<()> {
    let mut session = Session::open()?;
    let client = session.client()?;
    let bin = resolve_bin(&mut session, &client, bin.as_deref(), false)?;
    let records = snapshot(&client, &bin.id)?;

    let Some(record) = picker::select_record(r#ref.as_deref(), &records)? else {
        println!("No requests to replay yet");
        return Ok(());
    };

    let outcome = client.replay(record, &target).context("replay")?;
    println!(
        "{} {} -> {} {}",
        record.method,
        render::display_path(record),
        outcome.status,
        outcome.body_preview
    );
    Ok(())
}

pub(super) fn handle_export(format: String, bin: Option<String>) -> Result<()> {
    let format = ExportFormat::parse(&format)
        .with_context(|| format!("unknown export format `{}` (use json or curl)", format))?;

    let mut session = Session::open()?;
    let client = session.client()?;
    let bin = resolve_bin(&mut session, &client, bin.as_deref(), false)?;

    let payload = client.get_export(&bin.id, format).context("export")?;
    println!("{}", payload);
    Ok(())
}
