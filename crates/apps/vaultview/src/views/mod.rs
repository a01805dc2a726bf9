//! Text rendering of the client's regions

pub mod message;
pub mod results;

use vault::{InMemoryViewPort, Region, ViewMode};

const RULE_CHAR: char = '-';

fn rule(width: usize) -> String {
    RULE_CHAR.to_string().repeat(width)
}

/// Render the recent-emails panel
pub fn render_recent(port: &InMemoryViewPort, last_query: &str) -> String {
    let mut out = String::from("Recent Emails\n");

    let rows = port.recent_rows();
    if rows.is_empty() {
        if let Some(message) = port
            .state(Region::Recent)
            .message(Region::Recent)
            .filter(|m| !m.is_empty())
        {
            out.push_str(message);
            out.push('\n');
        }
    } else {
        for (index, item) in rows.iter().enumerate() {
            out.push_str(&results::render_row(index, item, port.active()));
            out.push('\n');
        }
    }

    out.push_str("Type \"search <text>\" to search the archive, \"check\" to fetch new mail.\n");
    if !last_query.is_empty() {
        out.push_str(&format!(
            "Results for \"{}\" are kept, type \"results\" to return to them.\n",
            last_query
        ));
    }
    out
}

/// Render whichever panel is visible, then the message panel
pub fn render_screen(port: &InMemoryViewPort, last_query: &str, width: usize) -> String {
    let mut out = String::new();

    match port.view_mode() {
        ViewMode::RecentEmails => out.push_str(&render_recent(port, last_query)),
        ViewMode::SearchResults => out.push_str(&results::render(port)),
    }

    out.push_str(&rule(width));
    out.push('\n');
    out.push_str(&message::render(port, width));
    out
}
