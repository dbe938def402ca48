use anyhow::{Context, Result};

use binspect::store;

use crate::ConfigCommands;
use crate::cli_runtime::Session;

pub(super) fn handle_login(api_key: String) -> Result<()> {
    let mut session = Session::open()?;
    session.doc.api_key = Some(api_key);
    session.save()?;
    println!("API key stored");
    Ok(())
}

pub(super) fn handle_whoami(json: bool) -> Result<()> {
    let session = Session::open()?;
    let client = session.client()?;
    let who = client.whoami().context("whoami")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&who).context("serialize whoami json")?
        );
        return Ok(());
    }
    println!("name: {}", who.name.as_deref().unwrap_or("-"));
    println!("email: {}", who.email.as_deref().unwrap_or("-"));
    if let Some(plan) = who.plan {
        println!("plan: {}", plan);
    }
    Ok(())
}

pub(super) fn handle_config(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show { json } => {
            let session = Session::open()?;
            let effective_url = store::base_url(&session.doc);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "path": session.store.path(),
                        "baseUrl": effective_url,
                        "apiKey": session.doc.api_key.is_some(),
                    }))
                    .context("serialize config json")?
                );
                return Ok(());
            }
            println!("config: {}", session.store.path().display());
            println!("url: {}", effective_url);
            println!(
                "api key: {}",
                if session.doc.api_key.is_some() {
                    "set"
                } else {
                    "not set"
                }
            );
        }
        ConfigCommands::Set { url } => {
            let mut session = Session::open()?;
            let mut changed = false;
            if let Some(url) = url {
                session.doc.base_url = url;
                changed = true;
            }
            if !changed {
                anyhow::bail!("nothing to set (use --url)");
            }
            session.save()?;
            println!("Configuration updated");
        }
    }
    Ok(())
}
