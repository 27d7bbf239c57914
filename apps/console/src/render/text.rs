//! Plain-text drawing of section descriptors and the history table.

use std::fmt;

use crate::models::ResumeSummary;

use super::{AnalysisView, Entry, FieldValue, LabeledList, Placement, Section, SectionBody};

pub const EMPTY_HISTORY: &str = "No resumes uploaded yet.";
const HISTORY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Draws a rendered detail view.
pub struct DetailText<'a>(pub &'a [Section]);

impl fmt::Display for DetailText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let marker = match section.placement {
                Placement::FullWidth => "==",
                Placement::SideBySide => "||",
            };
            writeln!(f, "{marker} {} {marker}", section.title)?;
            match &section.body {
                SectionBody::Identity(entry) => write_entry(f, entry, "")?,
                SectionBody::Analysis(view) => write_analysis(f, view)?,
                SectionBody::Entries(entries) => {
                    for entry in entries {
                        write_entry(f, entry, "- ")?;
                    }
                }
                SectionBody::Groups(groups) => {
                    for group in groups {
                        write_list(f, group, "")?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn write_entry(f: &mut fmt::Formatter<'_>, entry: &Entry, bullet: &str) -> fmt::Result {
    writeln!(f, "{bullet}{}", entry.heading)?;
    for field in &entry.fields {
        writeln!(f, "    {}: {}", field.label, field.value)?;
    }
    for list in &entry.lists {
        write_list(f, list, "    ")?;
    }
    Ok(())
}

fn write_list(f: &mut fmt::Formatter<'_>, list: &LabeledList, indent: &str) -> fmt::Result {
    writeln!(f, "{indent}{}: {}", list.label, list.items.join(", "))
}

fn write_analysis(f: &mut fmt::Formatter<'_>, view: &AnalysisView) -> fmt::Result {
    match view.rating.percent {
        Some(percent) => {
            let filled = usize::from(percent / 10);
            writeln!(
                f,
                "Rating: {} [{}{}]",
                view.rating.score,
                "#".repeat(filled),
                ".".repeat(10 - filled)
            )?;
        }
        None => writeln!(f, "Rating: {}", FieldValue::NotAvailable)?,
    }
    writeln!(f, "Feedback: {}", view.feedback)?;
    for list in &view.lists {
        write_list(f, list, "")?;
    }
    if !view.upskill.is_empty() {
        writeln!(f, "Upskilling:")?;
        for suggestion in &view.upskill {
            writeln!(f, "- {}: {}", suggestion.skill, suggestion.reason)?;
            if !suggestion.resources.is_empty() {
                writeln!(f, "    Resources: {}", suggestion.resources.join(", "))?;
            }
        }
    }
    Ok(())
}

/// Draws the history list, or the empty-state line when there are no rows.
pub struct HistoryTable<'a>(pub &'a [ResumeSummary]);

impl fmt::Display for HistoryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "{EMPTY_HISTORY}");
        }

        let rows: Vec<[String; 5]> = self
            .0
            .iter()
            .map(|r| {
                [
                    r.id.to_string(),
                    r.file_name.clone(),
                    FieldValue::from_opt(r.name.as_deref()).to_string(),
                    FieldValue::from_opt(r.email.as_deref()).to_string(),
                    r.uploaded_at.format(HISTORY_TIMESTAMP_FORMAT).to_string(),
                ]
            })
            .collect();

        let header = ["ID", "File Name", "Name", "Email", "Uploaded"];
        let mut widths = header.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_row(f, &header, &widths)?;
        for row in &rows {
            write_row(f, row, &widths)?;
        }
        Ok(())
    }
}

fn write_row<S: AsRef<str>>(
    f: &mut fmt::Formatter<'_>,
    cells: &[S],
    widths: &[usize],
) -> fmt::Result {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell.as_ref()))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(f, "{}", line.trim_end())
}
