use anyhow::{Context, Result};

use binspect::context;
use binspect::model::short_id;
use binspect::remote::ApiError;

use crate::cli_runtime::{Session, capture_url, resolve_bin};

pub(super) fn handle_init(name: Option<String>, global: bool, json: bool) -> Result<()> {
    let mut session = Session::open()?;
    let client = session.client()?;
    let bin = client.create_bin(name.as_deref()).context("create bin")?;

    context::set_active_bin(&mut session.doc, &session.workspace, &bin.id, global);
    context::push_recent(&mut session.doc, &session.workspace, &bin.id, global);
    session.save()?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&bin).context("serialize bin json")?
        );
    } else {
        let kind = if bin.is_temporary { "temporary bin" } else { "bin" };
        println!("Created {} {} ({})", kind, bin.name, short_id(&bin.id));
        println!("Capture URL: {}", capture_url(&client, &bin));
    }
    Ok(())
}

pub(super) fn handle_use(id: String, global: bool) -> Result<()> {
    let mut session = Session::open()?;
    let client = session.client()?;

    // An explicitly typed id failing to resolve must not clear anything.
    let bin = match client.get_bin(&id) {
        Ok(bin) => bin,
        Err(ApiError::NotFound) => anyhow::bail!("bin `{}` not found", id),
        Err(err) => return Err(anyhow::Error::from(err)),
    };

    context::set_active_bin(&mut session.doc, &session.workspace, &bin.id, global);
    context::push_recent(&mut session.doc, &session.workspace, &bin.id, global);
    session.save()?;

    println!("Now using {} ({})", bin.name, short_id(&bin.id));
    Ok(())
}

pub(super) fn handle_bin(global: bool, json: bool) -> Result<()> {
    let mut session = Session::open()?;
    let client = session.client()?;
    let bin = resolve_bin(&mut session, &client, None, global)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&bin).context("serialize bin json")?
        );
    } else {
        println!("bin: {} ({})", bin.name, bin.id);
        println!("capture: {}", capture_url(&client, &bin));
        if let Some(count) = bin.request_count {
            println!("requests: {}", count);
        }
    }
    Ok(())
}

pub(super) fn handle_bins(json: bool) -> Result<()> {
    let session = Session::open()?;
    let client = session.client()?;
    let bins = client.list_bins().context("list bins")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&bins).context("serialize bins json")?
        );
        return Ok(());
    }

    if bins.is_empty() {
        println!("No bins yet (run `binspect init`)");
        return Ok(());
    }
    for bin in bins {
        let count = bin
            .request_count
            .map(|c| format!("{} requests", c))
            .unwrap_or_default();
        let temp = if bin.is_temporary { " (temporary)" } else { "" };
        println!("{} {}{} {}", short_id(&bin.id), bin.name, temp, count);
    }
    Ok(())
}

pub(super) fn handle_recent(global: bool) -> Result<()> {
    let session = Session::open()?;
    let recent = context::recent_bins(&session.doc, &session.workspace, global);

    if recent.is_empty() {
        println!("No recently used bins");
        return Ok(());
    }
    for id in recent {
        println!("{}", id);
    }
    Ok(())
}

pub(super) fn handle_clear(global: bool) -> Result<()> {
    let mut session = Session::open()?;
    context::clear_active_bin(&mut session.doc, &session.workspace, global);
    session.save()?;
    println!("Cleared active bin");
    Ok(())
}

pub(super) fn handle_delete(id: Option<String>, global: bool) -> Result<()> {
    let mut session = Session::open()?;
    let client = session.client()?;
    let bin = resolve_bin(&mut session, &client, id.as_deref(), global)?;

    client.delete_bin(&bin.id).context("delete bin")?;

    // Drop every trace of the deleted bin from the stored context.
    if context::active_bin(&session.doc, &session.workspace, global).as_deref() == Some(bin.id.as_str()) {
        context::clear_active_bin(&mut session.doc, &session.workspace, global);
    }
    if let Some(entries) = session
        .doc
        .recent_bins_by_workspace
        .get_mut(&session.workspace)
    {
        entries.retain(|existing| existing != &bin.id);
    }
    session.save()?;

    println!("Deleted {} ({})", bin.name, short_id(&bin.id));
    Ok(())
}
