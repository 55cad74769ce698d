use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use webnote::commands::summarize::strip_tags;
use webnote::commands::{CmdMessage, MessageLevel};
use webnote::config::WebnoteConfig;
use webnote::model::{Note, NoteId, Priority, TodoItem};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const SELECTED_MARKER: &str = "▸";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn priority_label(priority: Priority) -> colored::ColoredString {
    let label = format!("[{}]", priority);
    match priority {
        Priority::High => label.red(),
        Priority::Medium => label.yellow(),
        Priority::Low => label.dimmed(),
    }
}

pub(super) fn print_notes(notes: &[Note], selected: Option<NoteId>) {
    if notes.is_empty() {
        println!("No notes found.");
        return;
    }

    for note in notes {
        let is_selected = selected == Some(note.id);
        let left_prefix = if is_selected {
            format!("  {} ", SELECTED_MARKER)
        } else {
            "    ".to_string()
        };
        let idx_str = format!("{}. ", note.id);
        let prio = format!("[{}] ", note.priority);

        let preview = strip_tags(&note.content);
        let mut title_content = if preview.is_empty() {
            note.display_title().to_string()
        } else {
            format!("{} {}", note.display_title(), preview)
        };
        if !note.tags.is_empty() {
            title_content = format!("{} #{}", title_content, note.tags.join(" #"));
        }

        let fixed_width = left_prefix.width() + idx_str.width() + prio.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let title_display = truncate_to_width(&title_content, available);
        let padding = available.saturating_sub(title_display.width());

        let idx_colored = if is_selected {
            idx_str.yellow()
        } else {
            idx_str.normal()
        };

        println!(
            "{}{}{} {}{}{}",
            left_prefix,
            idx_colored,
            priority_label(note.priority),
            title_display,
            " ".repeat(padding),
            format_time_ago(note.updated).dimmed()
        );
    }
}

pub(super) fn print_full_note(note: &Note) {
    println!(
        "{} {} {}",
        note.id.to_string().yellow(),
        note.display_title().bold(),
        priority_label(note.priority)
    );
    println!("--------------------------------");
    println!("{}", note.content);

    if !note.tags.is_empty() {
        println!();
        println!("{} {}", "Tags:".dimmed(), note.tags.join(", "));
    }
    if !note.things_to_remember.is_empty() {
        println!();
        println!("{}", "Things to remember:".dimmed());
        for item in &note.things_to_remember {
            println!("  - {}", item);
        }
    }
    if !note.attachments.is_empty() {
        println!();
        println!(
            "{} {} image(s)",
            "Attachments:".dimmed(),
            note.attachments.len()
        );
    }
    println!();
    println!(
        "{}",
        format!(
            "created {} · updated {}",
            note.created.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            note.updated.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        )
        .dimmed()
    );
}

pub(super) fn print_todos(todos: &[TodoItem]) {
    if todos.is_empty() {
        println!("No to-dos.");
        return;
    }

    let now = Utc::now();
    for (i, item) in todos.iter().enumerate() {
        let check = if item.done { "[x]" } else { "[ ]" };
        let text = if item.done {
            item.text.strikethrough().dimmed()
        } else {
            item.text.normal()
        };
        let deadline = match item.deadline {
            Some(d) => {
                let s = format!(" (due {})", d.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
                if d < now && !item.done {
                    s.red()
                } else {
                    s.dimmed()
                }
            }
            None => "".normal(),
        };
        println!(
            "{:>4}. {} {} {}{}",
            i + 1,
            check,
            priority_label(item.priority),
            text,
            deadline
        );
    }
}

pub(super) fn print_config(config: &WebnoteConfig) {
    println!("summarize-url = {}", config.summarize_url);
    println!("summarize-timeout = {}", config.summarize_timeout_secs);
    println!("speak-summaries = {}", config.speak_summaries);
    println!("default-priority = {}", config.default_priority);
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

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
