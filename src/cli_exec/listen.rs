use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use crossterm::tty::IsTty;

use binspect::context;
use binspect::diff;
use binspect::remote::RemoteClient;
use binspect::tail::{self, POLL_INTERVAL, TailState};

use crate::cli_runtime::{Session, capture_url, resolve_bin};

use super::{diff as diff_cmd, render};

pub(super) fn handle_listen(
    last: Option<String>,
    target: Option<String>,
    bin: Option<String>,
    global: bool,
) -> Result<()> {
    let mut session = Session::open()?;
    let client = session.client()?;
    let bin = resolve_bin(&mut session, &client, bin.as_deref(), global)?;
    context::push_recent(&mut session.doc, &session.workspace, &bin.id, global);
    session.save()?;

    let look_back = last.as_deref().and_then(tail::parse_look_back);
    let mut state = TailState::new(tail::now_ms(), look_back);

    println!("Listening on {} ({})", bin.name, capture_url(&client, &bin));

    let interactive = io::stdin().is_tty();
    if interactive {
        println!("Keys: r replay latest, d diff latest vs previous, q quit");
        terminal::enable_raw_mode().context("enable raw mode")?;
    }
    let outcome = run_loop(&client, &bin.id, &mut state, target.as_deref(), interactive);
    if interactive {
        terminal::disable_raw_mode().context("disable raw mode")?;
    }
    outcome
}

/// One logical thread of control, two event sources: an interval tick that
/// polls the backend, and (on a terminal) keypresses. Tick fetch failures
/// are swallowed whole; the loop only ends on an explicit quit key or
/// process interrupt.
fn run_loop(
    client: &RemoteClient,
    bin_id: &str,
    state: &mut TailState,
    target: Option<&str>,
    interactive: bool,
) -> Result<()> {
    let mut next_tick = Instant::now();
    loop {
        if Instant::now() >= next_tick {
            if let Ok(batch) = client.get_requests(bin_id, Some(state.watermark())) {
                for (index, record) in state.ingest(batch) {
                    say(&render::request_line(index, &record))?;
                }
            }
            next_tick = Instant::now() + POLL_INTERVAL;
        }

        if interactive {
            if event::poll(Duration::from_millis(250)).context("poll input")? {
                if let Event::Key(key) = event::read().context("read event")? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('r') => replay_latest(client, state, target)?,
                        KeyCode::Char('d') => diff_latest(state)?,
                        _ => {}
                    }
                }
            }
        } else {
            std::thread::sleep(next_tick.saturating_duration_since(Instant::now()));
        }
    }
}

/// Raw mode needs an explicit carriage return on every line.
fn say(line: &str) -> Result<()> {
    let mut out = io::stdout();
    write!(out, "{}\r\n", line).context("write line")?;
    out.flush().context("flush stdout")
}

fn replay_latest(client: &RemoteClient, state: &TailState, target: Option<&str>) -> Result<()> {
    let Some(record) = state.latest() else {
        return say("nothing captured yet");
    };
    let Some(target) = target else {
        return say("pass --target to enable replay");
    };
    match client.replay(record, target) {
        Ok(outcome) => say(&format!(
            "replayed {} {} -> {}",
            record.method,
            render::display_path(record),
            outcome.status
        )),
        Err(err) => say(&format!("replay failed: {:#}", anyhow::Error::from(err))),
    }
}

fn diff_latest(state: &TailState) -> Result<()> {
    let (Some(latest), Some(previous)) = (state.latest(), state.previous()) else {
        return say("need two captured requests to diff");
    };
    let report = diff::diff(previous, latest);
    for change in &report.changes {
        say(&diff_cmd::render_change(change))?;
    }
    if report.no_material_differences() {
        say("no material differences")?;
    }
    Ok(())
}
