//! Message panel - the selected email body and its attachments

use log::warn;
use vault::{AttachmentDescriptor, InMemoryViewPort, Region};

/// Convert an email body to wrapped plain text
pub fn html_to_text(html: &str, width: usize) -> String {
    html2text::from_read(html.as_bytes(), width).unwrap_or_else(|e| {
        warn!("Failed to convert email body: {}", e);
        html.to_string()
    })
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Render the attachment list with 1-based numbers for `save <n>`
pub fn render_attachments(attachments: &[AttachmentDescriptor]) -> String {
    let mut out = String::new();
    for (index, attachment) in attachments.iter().enumerate() {
        out.push_str(&format!("  [{}] {}", index + 1, attachment.filename));
        if let Some(size) = attachment.size {
            out.push_str(&format!(" ({})", format_size(size)));
        }
        out.push('\n');
    }
    out
}

/// Render the content pane followed by the attachment pane
pub fn render(port: &InMemoryViewPort, width: usize) -> String {
    let mut out = String::new();

    match port.html() {
        Some(html) => out.push_str(&html_to_text(html, width)),
        None => {
            if let Some(message) = port.state(Region::Content).message(Region::Content) {
                out.push_str(message);
                out.push('\n');
            }
        }
    }

    let attachments = port.attachments();
    if !attachments.is_empty() {
        out.push_str("\nAttachments:\n");
        out.push_str(&render_attachments(attachments));
    } else if let Some(message) = port
        .state(Region::Attachments)
        .message(Region::Attachments)
        .filter(|m| !m.is_empty())
    {
        out.push('\n');
        out.push_str(message);
        out.push('\n');
    }

    out
}
