//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

use crate::api::Page;
use crate::auth::{GuardDecision, User};
use crate::cli::OutputFormat;
use crate::records::{
    Appointment, MedicalEvent, MedicineSubmission, Registration, SchoolClass, Status, Student,
    UserAccount,
};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

fn status_color(status: &Status) -> Color {
    match status {
        Status::Approved | Status::Completed => Color::Green,
        Status::Rejected | Status::Cancelled => Color::Red,
        Status::Pending | Status::InProgress => Color::Yellow,
        Status::Other(_) => Color::Reset,
    }
}

/// A record that can be shown as a table row
pub trait TableRow {
    fn headers() -> Vec<&'static str>;
    fn cells(&self) -> Vec<String>;

    fn row_status(&self) -> Option<&Status> {
        None
    }
}

fn status_label(status: &Option<Status>) -> String {
    status
        .as_ref()
        .map(|s| s.label().to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

impl TableRow for Appointment {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Student", "Reason", "Time", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            opt(&self.student_name),
            self.reason.clone(),
            opt(&self.appointment_time),
            status_label(&self.status),
        ]
    }

    fn row_status(&self) -> Option<&Status> {
        self.status.as_ref()
    }
}

impl TableRow for MedicalEvent {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Student", "Type", "Severity", "Occurred", "Description"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            opt(&self.student_name),
            self.event_type.clone(),
            opt(&self.severity),
            opt(&self.occurred_at),
            self.description.clone(),
        ]
    }

    fn row_status(&self) -> Option<&Status> {
        self.status.as_ref()
    }
}

impl TableRow for MedicineSubmission {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Student", "Medicine", "Dosage", "Period", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            opt(&self.student_name),
            self.medicine_name.clone(),
            opt(&self.dosage),
            format!("{} → {}", opt(&self.start_date), opt(&self.end_date)),
            status_label(&self.status),
        ]
    }

    fn row_status(&self) -> Option<&Status> {
        self.status.as_ref()
    }
}

impl TableRow for Registration {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Student", "Campaign", "Registered", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            opt(&self.student_name),
            opt(&self.campaign_name),
            opt(&self.registered_at),
            status_label(&self.status),
        ]
    }

    fn row_status(&self) -> Option<&Status> {
        self.status.as_ref()
    }
}

impl TableRow for UserAccount {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Email", "Phone", "Role", "Active"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.full_name.clone(),
            self.email.clone(),
            opt(&self.phone),
            self.role.to_string(),
            if self.active { "yes" } else { "no" }.to_string(),
        ]
    }
}

impl TableRow for SchoolClass {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Grade", "Students"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            opt(&self.grade),
            self.student_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]
    }
}

impl TableRow for Student {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Class", "Date of birth", "Gender"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.full_name.clone(),
            opt(&self.class_name),
            opt(&self.date_of_birth),
            opt(&self.gender),
        ]
    }
}

/// Build a table of records
pub fn render_table<T: TableRow>(rows: &[T]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            T::headers()
                .into_iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );

    for row in rows {
        let color = row.row_status().map(status_color);
        let cells = row.cells();
        let last = cells.len().saturating_sub(1);
        table.add_row(cells.into_iter().enumerate().map(|(i, text)| {
            match color {
                Some(color) if i == last => Cell::new(text).fg(color),
                _ => Cell::new(text),
            }
        }));
    }

    table
}

/// Print a list of records in the requested format
pub fn print_rows<T: TableRow + Serialize>(rows: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            if rows.is_empty() {
                info("No records found.");
            } else {
                println!("{}", render_table(rows));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(rows)?),
    }
    Ok(())
}

/// Footer with paging position
pub fn print_page_footer<T>(page: &Page<T>, shown: usize) {
    println!(
        "{}",
        format!(
            "Page {}/{} · {} shown · {} total",
            page.page_num,
            page.total_pages.max(1),
            shown,
            page.total_items
        )
        .dimmed()
    );
}

/// Print the logged-in identity
pub fn print_user(user: &User) {
    println!("{}", "Session".bold().underline());
    println!();
    println!("  {} {}", "User ID:".bold(), user.id);
    println!("  {} {}", "Email:".bold(), user.email);
    println!("  {} {}", "Role:".bold(), user.role.to_string().cyan());

    if !user.student_ids.is_empty() {
        println!("  {} {}", "Students:".bold(), user.student_ids.join(", "));
    }

    if let Some(exp) = user.expires_at {
        let expires = chrono::DateTime::from_timestamp(exp, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| exp.to_string());
        println!("  {} {}", "Expires:".bold(), expires);
    }
}

/// Print a guard decision for a route
pub fn print_decision(path: &str, decision: &GuardDecision) {
    let text = decision.to_string();
    let colored = match decision {
        GuardDecision::Allow => text.green(),
        GuardDecision::Pending => text.yellow(),
        GuardDecision::Redirect(_) | GuardDecision::RedirectToLogin => text.yellow(),
        GuardDecision::Forbidden => text.red(),
    };
    println!("{} {}", path.bold(), colored);
}
