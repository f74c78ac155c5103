use blogadmin::api::{CmdMessage, DisplayRecord, MessageLevel, Page};
use blogadmin::model::{BlogRecord, BlogStatus};
use chrono::{DateTime, Utc};
use colored::*;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 16;
const ID_WIDTH: usize = 8;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// One line per post: short id, status, title (category • author), age.
pub fn print_records(records: &[DisplayRecord]) {
    if records.is_empty() {
        println!("No blogs found");
        return;
    }

    let now = Utc::now();
    for dr in records {
        let record = &dr.record;
        let id = short_id(&record.id);
        let status = status_label(record);

        let byline = byline(record);
        let title_content = if byline.is_empty() {
            record.title.clone()
        } else {
            format!("{} ({})", record.title, byline)
        };

        let right = match dr.purge_at {
            Some(purge_at) => format_time_until(purge_at, now),
            None => format_time_ago(record.created_at, now),
        };

        let fixed_width = ID_WIDTH + 2 + status.width() + 1 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let title_display = truncate_to_width(&title_content, available);
        let padding = available.saturating_sub(title_display.width());

        println!(
            "{}  {} {}{}{}",
            format!("{:<width$}", id, width = ID_WIDTH).yellow(),
            colored_status(record, &status),
            title_display,
            " ".repeat(padding),
            right.dimmed()
        );
    }
}

pub fn print_page(page: &Page) {
    if page.total_pages <= 1 {
        return;
    }
    println!(
        "{}",
        format!(
            "Page {} of {} ({} posts)",
            page.number, page.total_pages, page.total_matches
        )
        .dimmed()
    );
}

pub fn print_full_record(dr: &DisplayRecord) {
    let record = &dr.record;
    let now = Utc::now();

    println!("{}", record.title.bold());
    println!("--------------------------------");
    println!("{:<10}{}", "id", record.id);
    println!(
        "{:<10}{}",
        "status",
        colored_status(record, &status_label(record))
    );
    if !record.category.is_empty() {
        println!("{:<10}{}", "category", record.category);
    }
    if !record.author.is_empty() {
        println!("{:<10}{}", "author", record.author);
    }
    if let Some(date) = record.publish_date {
        println!("{:<10}{}", "publish", date.format("%Y-%m-%d"));
    }
    println!(
        "{:<10}{} ({})",
        "created",
        record.created_at.format("%Y-%m-%d %H:%M"),
        format_time_ago(record.created_at, now).trim()
    );
    if let Some(image) = &record.image {
        println!("{:<10}inline, {}", "image", format_bytes(image.len()));
    }
    if let Some(purge_at) = dr.purge_at {
        println!(
            "{:<10}{}",
            "deleted",
            format_time_until(purge_at, now).trim().red()
        );
    }
    if !record.description.is_empty() {
        println!();
        println!("{}", record.description);
    }
}

fn short_id(id: &str) -> String {
    id.chars().take(ID_WIDTH).collect()
}

fn byline(record: &BlogRecord) -> String {
    match (record.category.is_empty(), record.author.is_empty()) {
        (false, false) => format!("{} • {}", record.category, record.author),
        (false, true) => record.category.clone(),
        (true, false) => record.author.clone(),
        (true, true) => String::new(),
    }
}

fn status_label(record: &BlogRecord) -> String {
    if record.is_deleted {
        format!("{:<9}", "deleted")
    } else {
        format!("{:<9}", record.status.to_string())
    }
}

fn colored_status(record: &BlogRecord, label: &str) -> ColoredString {
    if record.is_deleted {
        return label.red();
    }
    match record.status {
        BlogStatus::Published => label.green(),
        BlogStatus::Draft => label.yellow(),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

fn format_time_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = deadline.signed_duration_since(now);
    let mut formatter = timeago::Formatter::new();
    formatter.ago("");
    let time_str = formatter.convert(remaining.to_std().unwrap_or_default());
    let text = format!("purges in {}", time_str.trim_end());
    format!("{:>width$}", text, width = TIME_WIDTH)
}

fn format_bytes(bytes: usize) -> String {
    const UNITS: [&str; 3] = ["B", "KB", "MB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
