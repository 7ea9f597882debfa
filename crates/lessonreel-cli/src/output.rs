//! Output formatting for CLI

use lessonreel_core::Lesson;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format options
pub enum OutputFormat {
    Text,
    Json,
    Table,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "text" => OutputFormat::Text,
            _ => OutputFormat::Table,
        }
    }
}

/// Pretty JSON for any serializable value
pub fn to_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

/// One lesson card as a table row
#[derive(Tabled)]
struct LessonRow<'a> {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "ID")]
    id: &'a str,
    #[tabled(rename = "Title")]
    title: &'a str,
    #[tabled(rename = "Duration")]
    duration: &'a str,
    #[tabled(rename = "Description")]
    description: String,
}

/// Render lessons in server order
pub fn format_lessons(lessons: &[Lesson], format: &str) -> String {
    match OutputFormat::from(format) {
        OutputFormat::Json => to_json(&lessons),
        OutputFormat::Text => lessons
            .iter()
            .enumerate()
            .map(|(i, l)| format!("{}. [{}] {} ({})", i + 1, l.id, l.title, l.duration))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Table => {
            let rows = lessons.iter().enumerate().map(|(i, l)| LessonRow {
                index: i + 1,
                id: l.id.as_str(),
                title: &l.title,
                duration: &l.duration,
                description: truncate(&l.description, 60),
            });
            Table::new(rows).with(Style::rounded()).to_string()
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use lessonreel_core::LessonId;

    fn lessons() -> Vec<Lesson> {
        vec![
            Lesson {
                id: LessonId::from("b"),
                title: "Beta".into(),
                description: "x".repeat(100),
                thumbnail: String::new(),
                duration: "2:00".into(),
            },
            Lesson {
                id: LessonId::from("a"),
                title: "Alpha".into(),
                description: "short".into(),
                thumbnail: String::new(),
                duration: "1:00".into(),
            },
        ]
    }

    #[test]
    fn test_text_keeps_order() {
        let text = format_lessons(&lessons(), "text");
        assert_eq!(text, "1. [b] Beta (2:00)\n2. [a] Alpha (1:00)");
    }

    #[test]
    fn test_table_truncates_description() {
        let table = format_lessons(&lessons(), "table");
        assert!(table.contains("Beta"));
        assert!(table.contains('…'));
        assert!(!table.contains(&"x".repeat(100)));
    }

    #[test]
    fn test_json_output() {
        let json: serde_json::Value = serde_json::from_str(&format_lessons(&lessons(), "json")).unwrap();
        assert_eq!(json[1]["id"], "a");
    }
}
