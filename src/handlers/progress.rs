use anyhow::{bail, Result};
use log::debug;
use serde_json::Value;

use crate::cli::input;
use crate::domain::history::{
    activity_trends, headers, sort_for_display, status_counts, summary_row, thought_trends, typed,
};
use crate::domain::{Activity, CollectionKind, ProblemRecord, Record, ThoughtRecord};
use crate::handlers::Page;
use crate::infrastructure::RecordStore;

const COLUMN_WIDTH: usize = 28;

/// Lists, inspects and deletes saved entries.
pub struct ProgressPage<'a> {
    store: &'a RecordStore,
    kind: Option<CollectionKind>,
}

impl<'a> ProgressPage<'a> {
    pub fn new(store: &'a RecordStore, kind: Option<CollectionKind>) -> Self {
        Self { store, kind }
    }

    fn kinds(&self) -> Vec<CollectionKind> {
        match self.kind {
            Some(kind) => vec![kind],
            None => CollectionKind::ALL.to_vec(),
        }
    }

    fn print_collection(&self, kind: CollectionKind) {
        let collection = self.store.collection(kind);
        debug!("Listing {}", collection.path().display());
        let mut records = collection.load_all();
        println!("\n{} ({})", kind.label(), records.len());

        if records.is_empty() {
            println!("  No entries yet.");
            return;
        }
        sort_for_display(kind, &mut records);

        let mut header = vec!["ID"];
        header.extend_from_slice(headers(kind));
        let rows: Vec<Vec<String>> = records
            .iter()
            .map(|record| {
                let mut row = vec![record.identity().unwrap_or("N/A").to_string()];
                row.extend(summary_row(kind, record));
                row
            })
            .collect();

        for line in render_table(&header, &rows) {
            println!("  {}", line);
        }
    }

    pub fn show_trends(&self) -> Result<()> {
        let activities = typed(&self.store.activities().load_all(), Activity::from_record);
        println!("\nActivity Trends");
        match activity_trends(&activities) {
            None => println!("  No activities logged yet."),
            Some(trends) => {
                for point in &trends.points {
                    println!(
                        "  {}  {:<24} pleasure {:>2} → {:<2}  mastery {:>2} → {:<2}",
                        point.date,
                        truncate(&point.name, 24),
                        point.predicted_pleasure,
                        point.actual_pleasure,
                        point.predicted_mastery,
                        point.actual_mastery,
                    );
                }
                println!(
                    "  Average pleasure: predicted {:.1}, actual {:.1} ({:+.1})",
                    trends.avg_predicted_pleasure,
                    trends.avg_actual_pleasure,
                    trends.pleasure_gap()
                );
                println!(
                    "  Average mastery:  predicted {:.1}, actual {:.1} ({:+.1})",
                    trends.avg_predicted_mastery,
                    trends.avg_actual_mastery,
                    trends.mastery_gap()
                );
            }
        }

        let thoughts = typed(
            &self.store.thought_records().load_all(),
            ThoughtRecord::from_record,
        );
        println!("\nThought Record Trends");
        match thought_trends(&thoughts) {
            None => println!("  No thought records yet."),
            Some(trends) => {
                println!("  Records: {}", trends.count);
                println!(
                    "  Average belief: automatic thought {:.0}%, alternative thought {:.0}%",
                    trends.avg_belief_automatic, trends.avg_belief_alternative
                );
                for shift in &trends.emotions {
                    println!(
                        "  {:<12} {:>5.1}% → {:>5.1}%  ({} records)",
                        shift.emotion, shift.avg_initial, shift.avg_final, shift.samples
                    );
                }
            }
        }

        let problems = typed(
            &self.store.problem_solving().load_all(),
            ProblemRecord::from_record,
        );
        println!("\nProblem Status");
        if problems.is_empty() {
            println!("  No problem-solving records yet.");
        } else {
            for (status, count) in status_counts(&problems) {
                println!("  {:<17} {}", status.as_str(), count);
            }
        }

        Ok(())
    }

    /// Deletes one entry of this page's kind.
    pub fn remove(&self, identity: &str, skip_confirm: bool) -> Result<()> {
        let Some(kind) = self.kind else {
            bail!("Choose which kind of entry to delete");
        };
        let collection = self.store.collection(kind);

        let Some(record) = collection.get_one(identity) else {
            bail!("Entry '{}' not found in {}", identity, kind.label());
        };

        if !skip_confirm {
            let summary = summary_row(kind, &record);
            let label = match summary.as_slice() {
                [date, name, ..] => format!("'{}' from {}", name, date),
                _ => format!("'{}'", identity),
            };
            if !input::prompt_confirm_delete(&label)? {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        if !collection.delete(identity) {
            bail!("Failed to delete entry '{}'", identity);
        }

        println!("✓ Entry '{}' deleted", identity);
        Ok(())
    }
}

impl Page for ProgressPage<'_> {
    fn show(&mut self) -> Result<()> {
        for kind in self.kinds() {
            self.print_collection(kind);
        }
        println!("\nData directory: {}", self.store.base_dir().display());
        Ok(())
    }

    fn show_with(&mut self, context: Record) -> Result<()> {
        println!();
        for (field, value) in context.fields() {
            println!("{}: {}", field, format_value(value));
        }
        Ok(())
    }
}

/// Flattens a stored value for display; emotion maps become `Anxious: 70%`.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "N/A".to_string(),
        Value::Object(map) => map
            .iter()
            .map(|(name, rating)| match rating {
                Value::Number(n) => format!("{}: {}%", name, n),
                other => format!("{}: {}", name, format_value(other)),
            })
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

pub fn truncate(text: &str, width: usize) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() <= width {
        return single_line;
    }
    let cut: String = single_line.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", cut)
}

fn render_table(header: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| truncate(cell, COLUMN_WIDTH)).collect())
        .collect();

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, title)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(title.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |row: Vec<String>| {
        row.iter()
            .zip(&widths)
            .map(|(cell, &width)| {
                let pad = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_row(header.iter().map(|h| h.to_string()).collect())];
    lines.push(
        widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    lines.extend(cells.into_iter().map(format_row));
    lines
}
