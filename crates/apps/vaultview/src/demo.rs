//! Canned archive for `--demo`

use chrono::{Duration, Local, NaiveDateTime};
use vault::{AttachmentDescriptor, InMemoryArchive, SearchResultItem};

const RECEIVED_FORMAT: &str = "%m/%d/%Y %I:%M %p";

fn received(ago: Duration) -> String {
    let at: NaiveDateTime = Local::now().naive_local() - ago;
    at.format(RECEIVED_FORMAT).to_string()
}

fn attachment(filename: &str, email: &str, size: u64) -> AttachmentDescriptor {
    let mut attachment =
        AttachmentDescriptor::new(filename, format!("/attachments/{}/{}", email, filename));
    attachment.size = Some(size);
    attachment
}

/// Build an archive with a handful of emails
///
/// Searching "outage" answers with a server-reported error, and one more
/// email arrives on the first mail check.
pub fn archive() -> InMemoryArchive {
    let archive = InMemoryArchive::new();

    archive.insert_email(
        SearchResultItem::new("2024/invoice-march.html", "Invoice #1042 for March")
            .with_sender("billing@northwind.example")
            .with_received(received(Duration::hours(2)))
            .with_snippet("Please find attached the invoice for March services."),
        "<h1>Invoice #1042</h1><p>Hello,</p>\
         <p>Please find attached the invoice for <b>March</b> services. \
         Payment is due within 30 days.</p><p>Northwind Billing</p>",
        vec![attachment("invoice-1042.pdf", "2024-invoice-march", 48_213)],
    );

    archive.insert_email(
        SearchResultItem::new("2024/q3-report.html", "Q3 report draft")
            .with_sender("dana@contoso.example")
            .with_received(received(Duration::days(3)))
            .with_snippet("Draft numbers for the Q3 report, comments welcome."),
        "<p>Hi all,</p><p>Here are the draft numbers for Q3.</p>\
         <ul><li>Revenue up 4%</li><li>Churn flat</li></ul><p>Dana</p>",
        vec![
            attachment("q3_report.csv", "2024-q3-report", 3_120),
            attachment("q3_charts.xlsx", "2024-q3-report", 912_004),
        ],
    );

    archive.insert_email(
        SearchResultItem::new("2023/offsite.html", "Team offsite logistics")
            .with_sender("ops@contoso.example")
            .with_received(received(Duration::days(40)))
            .with_snippet("Travel, rooms and the agenda for the offsite."),
        "<p>The offsite runs Tuesday to Thursday.</p><p>Rooms are booked; \
         the agenda follows next week.</p>",
        Vec::new(),
    );

    archive.queue_incoming(
        SearchResultItem::new("2024/standup.html", "Standup moved to 10:00")
            .with_sender("dana@contoso.example")
            .with_received(received(Duration::minutes(5)))
            .with_snippet("Standup moves to 10:00 for the rest of the week."),
        "<p>Standup moves to <b>10:00</b> for the rest of the week.</p>",
        Vec::new(),
    );

    archive.set_server_error("outage", "Search index is rebuilding, try again later");
    archive
}
