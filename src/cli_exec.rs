use anyhow::Result;

use crate::Commands;

mod bins;
mod diff;
mod identity;
mod listen;
mod picker;
mod render;
mod requests;

pub(crate) fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Init { name, global, json } => bins::handle_init(name, global, json),
        Commands::Use { id, global } => bins::handle_use(id, global),
        Commands::Bin { global, json } => bins::handle_bin(global, json),
        Commands::Bins { json } => bins::handle_bins(json),
        Commands::Recent { global } => bins::handle_recent(global),
        Commands::Clear { global } => bins::handle_clear(global),
        Commands::Delete { id, global } => bins::handle_delete(id, global),
        Commands::Requests { bin, json } => requests::handle_requests(bin, json),
        Commands::Show { r#ref, bin, json } => requests::handle_show(r#ref, bin, json),
        Commands::Open { r#ref, bin } => requests::handle_open(r#ref, bin),
        Commands::Export { format, bin } => requests::handle_export(format, bin),
        Commands::Replay { r#ref, target, bin } => requests::handle_replay(r#ref, target, bin),
        Commands::Diff {
            from,
            to,
            bin,
            json,
        } => diff::handle_diff(from, to, bin, json),
        Commands::Listen {
            last,
            target,
            bin,
            global,
        } => listen::handle_listen(last, target, bin, global),
        Commands::Login { api_key } => identity::handle_login(api_key),
        Commands::Whoami { json } => identity::handle_whoami(json),
        Commands::Config { command } => identity::handle_config(command),
    }
}
