use anyhow::{Context, Result};
use clap::Parser;

use binspect::context;
use binspect::model::ContextDoc;
use binspect::remote::{ApiError, Bin, RemoteClient};
use binspect::store::{self, ContextStore};

use crate::Commands;

#[derive(Parser)]
#[command(name = "binspect")]
#[command(about = "Capture, inspect, replay and tail HTTP requests", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::cli_exec::handle_command(cli.command)
}

/// Everything a command needs: the persisted context document and the
/// workspace key it was resolved under. Constructed once per invocation;
/// no hidden global state.
pub(crate) struct Session {
    pub(crate) store: ContextStore,
    pub(crate) doc: ContextDoc,
    pub(crate) workspace: String,
}

impl Session {
    pub(crate) fn open() -> Result<Session> {
        let store = ContextStore::open_default()?;
        let doc = store.read()?;
        let cwd = std::env::current_dir().context("get current dir")?;
        let workspace = context::key_for(&cwd);
        Ok(Session {
            store,
            doc,
            workspace,
        })
    }

    pub(crate) fn save(&self) -> Result<()> {
        self.store.write(&self.doc)
    }

    pub(crate) fn client(&self) -> Result<RemoteClient> {
        RemoteClient::new(store::base_url(&self.doc), self.doc.api_key.clone())
    }
}

/// Resolve the bin a command operates on: an explicit override first, then
/// the stored context for the scope. Stored ids are re-checked against the
/// backend; one that no longer resolves is cleared before the failure is
/// reported, so a deleted bin cannot stick permanently.
pub(crate) fn resolve_bin(
    session: &mut Session,
    client: &RemoteClient,
    explicit: Option<&str>,
    global: bool,
) -> Result<Bin> {
    if let Some(id) = explicit {
        return match client.get_bin(id) {
            Ok(bin) => Ok(bin),
            Err(ApiError::NotFound) => anyhow::bail!("bin `{}` not found", id),
            Err(err) => Err(anyhow::Error::from(err)),
        };
    }

    let stored = context::active_bin(&session.doc, &session.workspace, global).context(
        "no active bin (run `binspect init` or `binspect use <id>`)",
    )?;

    match client.get_bin(&stored) {
        Ok(bin) => Ok(bin),
        Err(ApiError::NotFound) => {
            context::clear_active_bin(&mut session.doc, &session.workspace, global);
            session.save()?;
            anyhow::bail!("active bin `{}` no longer exists; selection cleared", stored)
        }
        Err(err) => Err(anyhow::Error::from(err)),
    }
}

pub(crate) fn capture_url(client: &RemoteClient, bin: &Bin) -> String {
    format!("{}/b/{}", client.base_url(), bin.public_id)
}
