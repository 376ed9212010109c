use std::io::{self, IsTerminal, Write};

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use unicode_width::UnicodeWidthChar;

use crate::config::Config;
use crate::datetime::format_fest_date;
use crate::event::Event;
use crate::filter::FilterState;

const HEADERS: [&str; 5] = ["ID", "Name", "Branch", "Category", "Rounds"];

const RED: &str = "31";
const YELLOW: &str = "33";
const CYAN: &str = "36";

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let setting = cfg.get("color").unwrap_or_default();
        let color = match setting.trim().to_ascii_lowercase().as_str() {
            "" | "on" | "yes" | "true" | "1" => true,
            "off" | "no" | "false" | "0" => false,
            other => return Err(anyhow!("color must be on or off, not {other}")),
        };

        Ok(Self { color })
    }

    #[tracing::instrument(skip(self, events, state, now))]
    pub fn print_event_table(
        &mut self,
        events: &[&Event],
        state: &FilterState,
        now: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        if state.searching() {
            writeln!(out, "search: {:?}", state.query)?;
        } else if state.has_structured_constraints() {
            writeln!(
                out,
                "filters: branch={} day={} category={}",
                state.branch, state.day, state.category
            )?;
        }

        if events.is_empty() {
            writeln!(out, "No events found")?;
            return Ok(());
        }

        let rows: Vec<[String; 5]> = events
            .iter()
            .map(|event| self.event_row(event, now))
            .collect();

        let mut widths = HEADERS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(visible_width(cell));
            }
        }

        for (header, width) in HEADERS.iter().zip(widths) {
            write!(out, "{header:<width$} ")?;
        }
        writeln!(out)?;

        for width in widths {
            write!(out, "{:-<width$} ", "")?;
        }
        writeln!(out)?;

        for row in &rows {
            for (cell, width) in row.iter().zip(widths) {
                let pad = width.saturating_sub(visible_width(cell));
                write!(out, "{cell}{:pad$} ", "")?;
            }
            writeln!(out)?;
        }

        Ok(())
    }

    #[tracing::instrument(skip(self, event))]
    pub fn print_event_info(&mut self, event: &Event) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        writeln!(out, "{:<9}{}", "id", event.id)?;
        writeln!(out, "{:<9}{}", "name", event.name)?;
        writeln!(out, "{:<9}{}", "branch", event.branch.name)?;
        writeln!(out, "{:<9}{}", "category", event.category)?;

        for round in &event.rounds {
            writeln!(
                out,
                "round {:<3}{}",
                round.number,
                format_fest_date(round.date)
            )?;
        }

        Ok(())
    }

    fn event_row(&self, event: &Event, now: DateTime<Utc>) -> [String; 5] {
        let rounds = event
            .rounds
            .iter()
            .map(|round| {
                let date = format_fest_date(round.date);
                if round.date < now {
                    self.paint(RED, &date)
                } else {
                    date
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        [
            self.paint(YELLOW, &event.id.to_string()),
            event.name.clone(),
            self.paint(CYAN, event.branch.name.label()),
            event.category.label().to_string(),
            rounds,
        ]
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color && io::stdout().is_terminal() {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            for escaped in chars.by_ref() {
                if escaped == 'm' {
                    break;
                }
            }
        } else {
            width += ch.width().unwrap_or(0);
        }
    }
    width
}
