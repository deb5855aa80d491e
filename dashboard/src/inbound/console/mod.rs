//! Line-oriented console front end.
//!
//! Stands in for the browser views: pages are [`Route`]s, the dashboard
//! renders the management view chosen by [`dashboard_view`], and the add
//! and edit modals run the form schemas before anything is dispatched.

pub mod command;
pub mod modals;
pub mod routes;
pub mod session;
pub mod views;

pub use command::{parse_line, Assignment, Command, Parsed};
pub use modals::{field_errors_error, modal_title, ModalMode, ResourceForm};
pub use routes::{Navigation, Route};
pub use session::{ConsoleSession, Reply};
pub use views::{dashboard_view, header_title, DashboardView, TableRow};
