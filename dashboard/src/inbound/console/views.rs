//! Text rendering of the dashboard views.
//!
//! Which management view renders is a pure function of the signed-in
//! user's role. This is presentation only; it grants nothing.

use serde_json::Value;

use crate::domain::slices::CollectionState;
use crate::domain::{Error, Notification, Product, Resource, Role, User};

/// Loading indicator shown while a fetch is outstanding.
pub const LOADING: &str = "Loading...";

/// Management view selected by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardView {
    /// Users table, for admins.
    UserManagement,
    /// Products table, for everyone else.
    ProductManagement,
}

/// Pick the management view for `user`. Anything but an admin session,
/// including no session at all, gets the products view.
pub fn dashboard_view(user: Option<&User>) -> DashboardView {
    match user.map(User::role) {
        Some(Role::Admin) => DashboardView::UserManagement,
        Some(Role::User) | None => DashboardView::ProductManagement,
    }
}

/// Header title for `user`.
pub fn header_title(user: Option<&User>) -> &'static str {
    match dashboard_view(user) {
        DashboardView::UserManagement => "Admin Dashboard",
        DashboardView::ProductManagement => "Product Dashboard",
    }
}

/// An entity that renders as one table row.
pub trait TableRow: Resource {
    /// Column headings.
    const HEADINGS: &'static [&'static str];

    /// Cell values, one per heading.
    fn cells(&self) -> Vec<String>;
}

impl TableRow for User {
    const HEADINGS: &'static [&'static str] = &["ID", "Username", "Email", "Role", "Created"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.username().to_owned(),
            self.email().to_owned(),
            self.role().to_string(),
            self.created_at().format("%Y-%m-%d").to_string(),
        ]
    }
}

impl TableRow for Product {
    const HEADINGS: &'static [&'static str] = &["ID", "Name", "Description", "Price"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.name().to_owned(),
            self.description().to_owned(),
            self.display_price(),
        ]
    }
}

/// Render a collection: the loading indicator while fetching, the error
/// when the last operation failed, otherwise the table.
pub fn render_collection<E: TableRow>(state: &CollectionState<E>) -> Vec<String> {
    if state.loading() {
        return vec![LOADING.to_owned()];
    }
    if let Some(error) = state.error() {
        return vec![format!("Error: {error}")];
    }
    if state.is_empty() {
        return vec![format!("No {} found.", E::KIND.plural())];
    }
    let rows: Vec<Vec<String>> = state.items().iter().map(TableRow::cells).collect();
    render_table(E::HEADINGS, &rows)
}

fn render_table(headings: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headings.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(headings.iter().copied(), &widths));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(format_row(row.iter().map(String::as_str), &widths));
    }
    lines
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_owned()
}

/// One line per toast.
pub fn render_toasts(toasts: &[Notification]) -> Vec<String> {
    toasts.iter().map(ToString::to_string).collect()
}

/// Render an error, listing per-field messages carried in its details.
pub fn render_error(error: &Error) -> Vec<String> {
    let mut lines = vec![format!("error: {}", error.message())];
    if let Some(Value::Object(fields)) = error.details().and_then(|d| d.get("fields")) {
        lines.extend(fields.iter().map(|(field, message)| match message {
            Value::String(text) => format!("  {field}: {text}"),
            other => format!("  {field}: {other}"),
        }));
    }
    lines
}
