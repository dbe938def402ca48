use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::cursor::MoveUp;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::queue;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::tty::IsTty;

use binspect::model::RequestRecord;
use binspect::refs::{self, PICKER_LIMIT};

use super::render;

/// Resolve a ref token, falling back to an interactive picker when no token
/// was given on a terminal. `Ok(None)` is the soft path: empty snapshot, or
/// the picker was cancelled. Ambiguous and missing-ref failures stay hard.
pub(super) fn select_record<'a>(
    token: Option<&str>,
    snapshot: &'a [RequestRecord],
) -> Result<Option<&'a RequestRecord>> {
    if snapshot.is_empty() {
        return Ok(None);
    }
    if token.is_none() && io::stdin().is_tty() {
        return pick(snapshot);
    }
    refs::resolve(token, snapshot)
        .map(Some)
        .map_err(anyhow::Error::from)
}

/// Single-choice list over the newest records, arrow keys + enter.
fn pick<'a>(snapshot: &'a [RequestRecord]) -> Result<Option<&'a RequestRecord>> {
    let rows: Vec<&RequestRecord> = snapshot.iter().take(PICKER_LIMIT).collect();
    terminal::enable_raw_mode().context("enable raw mode")?;
    let picked = run_picker(&rows);
    terminal::disable_raw_mode().context("disable raw mode")?;
    Ok(picked?.map(|index| rows[index]))
}

fn run_picker(rows: &[&RequestRecord]) -> Result<Option<usize>> {
    let mut out = io::stdout();
    let mut selected = 0usize;
    let mut drawn = false;
    loop {
        if drawn {
            queue!(out, MoveUp(rows.len() as u16)).context("move cursor")?;
        }
        for (i, record) in rows.iter().enumerate() {
            let marker = if i == selected { ">" } else { " " };
            queue!(out, Clear(ClearType::CurrentLine)).context("clear line")?;
            write!(
                out,
                "{} {}\r\n",
                marker,
                render::request_line((i + 1) as u64, record)
            )
            .context("write row")?;
        }
        out.flush().context("flush")?;
        drawn = true;

        if !event::poll(Duration::from_millis(250)).context("poll")? {
            continue;
        }
        match event::read().context("read event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Up | KeyCode::Char('k') => selected = selected.saturating_sub(1),
                KeyCode::Down | KeyCode::Char('j') => {
                    selected = (selected + 1).min(rows.len().saturating_sub(1));
                }
                KeyCode::Enter => return Ok(Some(selected)),
                KeyCode::Esc | KeyCode::Char('q') => return Ok(None),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(None);
                }
                _ => {}
            },
            _ => {}
        }
    }
}
