//! Bulk CSV import and export of the roster.
//!
//! Import layout:
//!   Employee Name, Designation, Experience, <skill columns...>
//!
//! A skill cell that is empty or "0" means the skill is not granted.
//! Numeric cells are taken as-is, anything else counts as proficiency 3.
//! A row with fewer fields than the header is skipped whole.

use crate::{
    error::{GapError, GapResult},
    roster::{parse_experience, EmployeeUpdate, Roster},
    types::Proficiency,
};
use serde::{Deserialize, Serialize};

/// Leading columns before the skill columns.
pub const FIXED_COLUMNS: [&str; 3] = ["Employee Name", "Designation", "Experience"];

/// Proficiency assumed for a non-numeric skill cell.
pub const DEFAULT_IMPORT_PROFICIENCY: Proficiency = 3;

/// Rendered in place of a missing designation or experience.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub rows_applied: usize,
    pub employees_created: usize,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based line number in the input.
    pub line: usize,
    pub reason: String,
}

/// Split one CSV line into fields.
///
/// Commas inside double quotes do not split. Each field is trimmed and
/// stripped of its surrounding quotes; a doubled quote inside a quoted
/// field is one literal quote.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field).trim().to_string()),
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_string());
    fields
}

/// Interpret a skill cell. `None` means the skill is not granted.
pub fn parse_skill_cell(cell: &str) -> Option<Proficiency> {
    let cell = cell.trim();
    if cell.is_empty() || cell == "0" {
        return None;
    }
    Some(cell.parse().unwrap_or(DEFAULT_IMPORT_PROFICIENCY))
}

/// Parse an import file into merge requests.
///
/// Fails only when there is no usable header. Bad rows are reported in
/// the returned skip list and otherwise ignored.
pub fn parse_import(text: &str) -> GapResult<(Vec<EmployeeUpdate>, Vec<SkippedRow>)> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
        .filter(|(_, l)| !l.trim().is_empty());

    let Some((_, header_line)) = lines.next() else {
        return Err(GapError::InputIncomplete("CSV file is empty.".into()));
    };
    let headers = split_csv_line(header_line);
    if headers.len() < FIXED_COLUMNS.len() {
        return Err(GapError::MalformedRecord {
            location: "header".into(),
            reason: format!(
                "expected at least the columns {}, found {} column(s)",
                FIXED_COLUMNS.join(", "),
                headers.len()
            ),
        });
    }
    let skill_headers = &headers[FIXED_COLUMNS.len()..];

    let mut updates = Vec::new();
    let mut skipped = Vec::new();
    for (line, raw) in lines {
        let fields = split_csv_line(raw);
        if fields.len() < headers.len() {
            skipped.push(SkippedRow {
                line,
                reason: format!("expected {} fields, found {}", headers.len(), fields.len()),
            });
            continue;
        }
        let name = fields[0].as_str();
        if name.is_empty() {
            skipped.push(SkippedRow { line, reason: "missing employee name".into() });
            continue;
        }

        let designation = fields[1].as_str();
        let mut update = EmployeeUpdate {
            name: name.to_string(),
            designation: (!designation.is_empty()).then(|| designation.to_string()),
            experience: parse_experience(&fields[2]),
            ..Default::default()
        };
        for (skill, cell) in skill_headers.iter().zip(&fields[FIXED_COLUMNS.len()..]) {
            if skill.is_empty() {
                continue;
            }
            if let Some(level) = parse_skill_cell(cell) {
                update.skills.insert(skill.clone(), level);
            }
        }
        updates.push(update);
    }
    Ok((updates, skipped))
}

/// Import `text` into `roster` with merge-insert semantics.
pub fn import_csv(roster: &mut Roster, text: &str) -> GapResult<ImportSummary> {
    let (updates, skipped) = parse_import(text)?;
    let mut summary = ImportSummary { skipped, ..Default::default() };

    for update in updates {
        if roster.find_by_name(&update.name).is_none() {
            summary.employees_created += 1;
        }
        roster.upsert(update);
        summary.rows_applied += 1;
    }
    for row in &summary.skipped {
        log::warn!("CSV line {} skipped: {}", row.line, row.reason);
    }
    log::info!(
        "Imported {} rows ({} new employees, {} skipped)",
        summary.rows_applied,
        summary.employees_created,
        summary.skipped.len()
    );
    Ok(summary)
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Render the roster as CSV. Every field is quoted; every distinct skill
/// becomes a column, missing ones render as 0.
pub fn export_csv(roster: &Roster) -> String {
    let skills = roster.distinct_skills();

    let header: Vec<String> = FIXED_COLUMNS
        .iter()
        .copied()
        .chain(skills.iter().copied())
        .map(quote)
        .collect();
    let mut out = header.join(",");
    out.push('\n');

    for employee in roster {
        let experience = employee
            .experience
            .map(|y| y.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let mut row = vec![
            quote(&employee.name),
            quote(employee.designation.as_deref().unwrap_or(NOT_AVAILABLE)),
            quote(&experience),
        ];
        row.extend(
            skills
                .iter()
                .map(|s| quote(&employee.proficiency(s).unwrap_or(0).to_string())),
        );
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// A template file showing the import layout.
pub fn sample_csv() -> String {
    [
        "Employee Name,Designation,Experience,Python,Machine Learning,Communication,Project Management",
        "\"John Doe\",\"Software Engineer\",\"5\",\"4\",\"3\",\"0\",\"2\"",
        "\"Jane Smith\",\"UX Designer\",\"3\",\"0\",\"0\",\"4\",\"0\"",
        "\"Lee, Sam\",\"Team Lead\",\"8\",\"2\",\"0\",\"5\",\"4\"",
    ]
    .join("\n")
        + "\n"
}
