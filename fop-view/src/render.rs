//! Output formats for a derived screen list

use chrono::SecondsFormat;
use fop_common::classify::CategoryLabel;
use fop_common::pipeline::DerivedList;
use fop_common::resolve::resolve_text;
use fop_common::screens::Screen;
use serde::Serialize;
use std::fmt::Write as _;

/// Title shown for a record whose title resolves blank
pub const UNTITLED: &str = "(untitled)";

/// Pill label for the count over the whole counting scope
pub const TOTAL_LABEL: &str = "All";

/// Owned, printable summary of one derivation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenReport {
    pub screen: String,
    pub total: usize,
    pub showing: usize,
    pub counts: Vec<PillCount>,
    pub items: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PillCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// Position in the input file
    pub index: usize,
    pub title: String,
    pub status: String,
    /// RFC 3339, or `None` when no date candidate parsed
    pub date: Option<String>,
}

impl ScreenReport {
    pub fn from_list<L: CategoryLabel>(screen: Screen, list: &DerivedList<'_, L>) -> Self {
        let items = list
            .items
            .iter()
            .map(|item| {
                let title = resolve_text(item.record, screen.title_fields());
                Row {
                    index: item.index,
                    title: if title.trim().is_empty() { UNTITLED.to_string() } else { title },
                    status: item.status.as_str().to_string(),
                    date: item
                        .instant
                        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
                }
            })
            .collect();

        Self {
            screen: screen.name().to_string(),
            total: list.total,
            showing: list.showing,
            counts: list
                .counts
                .iter()
                .map(|(label, count)| PillCount {
                    label: label.as_str().to_string(),
                    count,
                })
                .collect(),
            items,
        }
    }

    pub fn is_truncated(&self) -> bool {
        self.items.len() < self.showing
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text table: pill row, then one line per item
    pub fn to_table(&self) -> String {
        let mut out = String::new();

        let mut pills = vec![format!("{} ({})", TOTAL_LABEL, self.total)];
        pills.extend(self.counts.iter().map(|p| format!("{} ({})", p.label, p.count)));
        let _ = writeln!(out, "{}: {}", self.screen, pills.join("  "));

        if self.showing == 0 {
            let _ = writeln!(out, "No items match the current filters.");
            return out;
        }

        let status_width = self.items.iter().map(|r| r.status.len()).max().unwrap_or(0);
        for row in &self.items {
            let _ = writeln!(
                out,
                "{:>4}  {:<20}  {:<width$}  {}",
                row.index,
                row.date.as_deref().unwrap_or("-"),
                row.status,
                row.title,
                width = status_width
            );
        }

        if self.is_truncated() {
            let _ = writeln!(
                out,
                "Showing {} of {} matching items.",
                self.items.len(),
                self.showing
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fop_common::bus::ViewState;
    use fop_common::screens::requests;
    use serde_json::json;

    #[test]
    fn test_report_rows_and_pills() {
        let records = vec![
            json!({ "Title": "Boots", "Status": "Approved", "Created": "2024-02-01T10:00:00Z" }),
            json!({ "Status": "garbled" }),
        ];
        let list = requests::pipeline(None).derive(&records, &ViewState::default());
        let report = ScreenReport::from_list(Screen::Requests, &list);

        assert_eq!(report.screen, "requests");
        assert_eq!(report.total, 2);
        assert_eq!(report.items[0].title, "Boots");
        assert_eq!(report.items[0].date.as_deref(), Some("2024-02-01T10:00:00Z"));
        assert_eq!(report.items[1].title, UNTITLED);
        assert_eq!(report.items[1].status, "Open");
        assert_eq!(report.items[1].date, None);

        let approved = report.counts.iter().find(|p| p.label == "Approved").unwrap();
        assert_eq!(approved.count, 1);
    }

    #[test]
    fn test_table_empty_state() {
        let list = requests::pipeline(None).derive(&[], &ViewState::default());
        let table = ScreenReport::from_list(Screen::Requests, &list).to_table();
        assert!(table.starts_with("requests: All (0)"));
        assert!(table.contains("No items match"));
    }

    #[test]
    fn test_json_output_shape() {
        let records = vec![json!({ "Title": "Gloves", "Status": "Open" })];
        let list = requests::pipeline(None).derive(&records, &ViewState::default());
        let text = ScreenReport::from_list(Screen::Requests, &list).to_json().unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["showing"], 1);
        assert_eq!(json["items"][0]["title"], "Gloves");
        assert!(json["items"][0]["date"].is_null());
    }
}
