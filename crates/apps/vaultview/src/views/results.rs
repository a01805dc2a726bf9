//! Search results panel - one numbered row per result

use chrono::{Local, NaiveDateTime};
use vault::{EmailPath, InMemoryViewPort, Region, SearchResultItem, messages};

/// Longest snippet shown under a row
const SNIPPET_WIDTH: usize = 100;

/// Compact date like a mail list: time today, weekday this week, else month/day
pub fn format_date(received: NaiveDateTime, now: NaiveDateTime) -> String {
    if received.date() == now.date() {
        received.format("%H:%M").to_string()
    } else if (now - received).num_days() < 7 && received <= now {
        received.format("%a").to_string()
    } else {
        received.format("%b %d").to_string()
    }
}

fn row_date(item: &SearchResultItem) -> String {
    match item.received_at() {
        Some(received) => format_date(received, Local::now().naive_local()),
        None => item.datetime_received.clone().unwrap_or_default(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() <= width {
        return text;
    }
    let cut: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", cut)
}

/// Render a single result row
pub fn render_row(index: usize, item: &SearchResultItem, active: Option<&EmailPath>) -> String {
    let marker = if active == Some(&item.path) { '>' } else { ' ' };
    let mut row = format!(
        "{} {:>3}. {}  | {}  {}",
        marker,
        index + 1,
        item.subject,
        item.sender,
        row_date(item)
    );
    if !item.snippet.trim().is_empty() {
        row.push_str(&format!("\n        {}", truncate(&item.snippet, SNIPPET_WIDTH)));
    }
    row
}

/// Render the results region
pub fn render(port: &InMemoryViewPort) -> String {
    let mut out = String::new();

    if port.has_back_to_recent() {
        out.push_str(&format!("[{}]  (type \"recent\")\n", messages::BACK_TO_RECENT));
    }

    let rows = port.result_rows();
    if rows.is_empty() {
        let state = port.state(Region::Results);
        if let Some(message) = state.message(Region::Results) {
            out.push_str(message);
            out.push('\n');
        }
        return out;
    }

    out.push_str(&format!("{} results\n", rows.len()));
    for (index, item) in rows.iter().enumerate() {
        out.push_str(&render_row(index, item, port.active()));
        out.push('\n');
    }
    out
}
