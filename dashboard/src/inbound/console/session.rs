//! Interactive console session.
//!
//! A [`ConsoleSession`] tracks the current page and turns each command into
//! slice operations, returning the lines to print. Toasts are not part of
//! the reply; the caller drains them from the shared queue.

use tracing::debug;

use crate::app::AppState;
use crate::domain::forms::{LoginForm, ProductForm, ResetPasswordForm, UpdatePasswordForm, UserForm};
use crate::domain::slices::{CollectionSlice, Rejection};
use crate::domain::{DashboardResult, Error, Resource, ResourceId};

use super::command::{parse_line, Assignment, Command, Parsed};
use super::modals::{field_errors_error, modal_title, ModalMode, ResourceForm};
use super::routes::{Navigation, Route};
use super::views::{
    dashboard_view, header_title, render_collection, render_toasts, DashboardView, TableRow,
};

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print these lines and keep reading.
    Output(Vec<String>),
    /// Leave the console.
    Quit,
}

/// One user's walk through the dashboard pages.
pub struct ConsoleSession<'a> {
    app: &'a AppState,
    route: Route,
}

impl<'a> ConsoleSession<'a> {
    /// Start on the login page.
    pub fn new(app: &'a AppState) -> Self {
        Self {
            app,
            route: Route::Login,
        }
    }

    /// Page currently shown.
    pub fn route(&self) -> Route {
        self.route
    }

    /// Management view the dashboard page shows for the current session.
    pub fn view(&self) -> DashboardView {
        dashboard_view(self.app.auth().snapshot().user())
    }

    /// Lines describing the current page, without fetching.
    pub fn render(&self) -> Vec<String> {
        match self.route {
            Route::Login => vec![
                "Sign in".to_owned(),
                "  login <username> <password>".to_owned(),
                format!("  goto {}", Route::ForgotPassword),
            ],
            Route::ForgotPassword => vec![
                "Reset password".to_owned(),
                "  forgot <email>".to_owned(),
                "  reset-password <token> <password> <confirm>".to_owned(),
                format!("  goto {}", Route::Login),
            ],
            Route::Dashboard => self.render_dashboard(),
        }
    }

    /// Parse and run one console line.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] for malformed commands, invalid form input,
    /// dashboard commands issued elsewhere, unknown ids and backend
    /// rejections. The session stays usable after any error.
    pub async fn execute(&mut self, line: &str) -> DashboardResult<Reply> {
        match parse_line(line)? {
            Parsed::Empty => Ok(Reply::Output(Vec::new())),
            Parsed::Help(text) => Ok(Reply::Output(text.lines().map(str::to_owned).collect())),
            Parsed::Command(command) => self.run(command).await,
        }
    }

    async fn run(&mut self, command: Command) -> DashboardResult<Reply> {
        debug!(route = %self.route, "console command");
        let lines = match command {
            Command::Quit => return Ok(Reply::Quit),
            Command::Login { username, password } => self.login(username, password).await?,
            Command::Logout => {
                self.app.auth().logout();
                self.route = Route::Login;
                self.render()
            }
            Command::Goto { path } => self.goto(&path).await,
            Command::Forgot { email } => {
                let address = ResetPasswordForm { email }
                    .validate()
                    .map_err(|errors| field_errors_error(&errors))?;
                self.app
                    .auth()
                    .reset_password(&address)
                    .await
                    .map_err(rejected)?;
                Vec::new()
            }
            Command::ResetPassword {
                token,
                password,
                confirm,
            } => {
                let update = UpdatePasswordForm {
                    token,
                    password: password.into(),
                    confirm_password: confirm.into(),
                }
                .validate()
                .map_err(|errors| field_errors_error(&errors))?;
                self.app
                    .auth()
                    .update_password(&update)
                    .await
                    .map_err(rejected)?;
                self.route = Route::Login;
                self.render()
            }
            Command::Refresh => {
                self.require_dashboard()?;
                self.enter_dashboard().await
            }
            Command::Show => self.render(),
            Command::Add { fields } => {
                self.require_dashboard()?;
                match self.view() {
                    DashboardView::UserManagement => {
                        add::<UserForm>(self.app.users(), &fields).await?
                    }
                    DashboardView::ProductManagement => {
                        add::<ProductForm>(self.app.products(), &fields).await?
                    }
                }
            }
            Command::Edit { id, fields } => {
                self.require_dashboard()?;
                let target = ResourceId::new(id);
                match self.view() {
                    DashboardView::UserManagement => {
                        edit::<UserForm>(self.app.users(), &target, &fields).await?
                    }
                    DashboardView::ProductManagement => {
                        edit::<ProductForm>(self.app.products(), &target, &fields).await?
                    }
                }
            }
            Command::Delete { id } => {
                self.require_dashboard()?;
                let target = ResourceId::new(id);
                match self.view() {
                    DashboardView::UserManagement => delete(self.app.users(), &target).await?,
                    DashboardView::ProductManagement => {
                        delete(self.app.products(), &target).await?
                    }
                }
            }
            Command::Toasts => {
                let toasts = self.app.toasts().visible();
                if toasts.is_empty() {
                    vec!["No notifications.".to_owned()]
                } else {
                    render_toasts(&toasts)
                }
            }
            Command::Dismiss => {
                self.app.toasts().dismiss_all();
                Vec::new()
            }
        };
        Ok(Reply::Output(lines))
    }

    async fn login(&mut self, username: String, password: String) -> DashboardResult<Vec<String>> {
        let credentials = LoginForm::new(username, password)
            .validate()
            .map_err(|errors| field_errors_error(&errors))?;
        self.app
            .auth()
            .login(&credentials)
            .await
            .map_err(|rejection| Error::unauthorized(rejection.message()))?;
        self.route = Route::Dashboard;
        Ok(self.enter_dashboard().await)
    }

    async fn goto(&mut self, path: &str) -> Vec<String> {
        let navigation = Route::resolve(path);
        self.route = navigation.route();
        let mut lines = Vec::new();
        if let Navigation::Redirect(route) = navigation {
            lines.push(format!("Redirected to {route}"));
        }
        if self.route == Route::Dashboard {
            lines.extend(self.enter_dashboard().await);
        } else {
            lines.extend(self.render());
        }
        lines
    }

    /// Mounting a management view fetches its collection. A rejected fetch
    /// is rendered from slice state rather than returned.
    async fn enter_dashboard(&self) -> Vec<String> {
        let fetched = match self.view() {
            DashboardView::UserManagement => self.app.users().fetch_all().await,
            DashboardView::ProductManagement => self.app.products().fetch_all().await,
        };
        if let Err(rejection) = fetched {
            debug!(reason = rejection.message(), "dashboard rendered with fetch error");
        }
        self.render_dashboard()
    }

    fn render_dashboard(&self) -> Vec<String> {
        let auth = self.app.auth().snapshot();
        let mut lines = vec![header_title(auth.user()).to_owned()];
        if let Some(user) = auth.user() {
            lines.push(format!("Signed in as {} ({})", user.username(), user.role()));
        }
        lines.extend(match self.view() {
            DashboardView::UserManagement => self.app.users().with_state(render_collection),
            DashboardView::ProductManagement => {
                self.app.products().with_state(render_collection)
            }
        });
        lines
    }

    fn require_dashboard(&self) -> DashboardResult<()> {
        if self.route == Route::Dashboard {
            Ok(())
        } else {
            Err(Error::invalid_request(format!(
                "only available on {}; current page is {}",
                Route::Dashboard,
                self.route
            )))
        }
    }
}

fn rejected(rejection: Rejection) -> Error {
    Error::service_unavailable(rejection.message())
}

fn fill<F: ResourceForm>(form: &mut F, fields: &[Assignment]) -> DashboardResult<()> {
    fields
        .iter()
        .try_for_each(|assignment| form.assign(&assignment.field, &assignment.value))
}

async fn add<F>(slice: &CollectionSlice<F::Entity>, fields: &[Assignment]) -> DashboardResult<Vec<String>>
where
    F: ResourceForm,
    F::Entity: TableRow,
{
    let mut form = F::blank();
    fill(&mut form, fields)?;
    let draft = form.submit().map_err(|errors| field_errors_error(&errors))?;
    let created = slice.create(draft).await.map_err(rejected)?;

    let mut lines = vec![format!(
        "{}: {}",
        modal_title(<F::Entity as Resource>::KIND, ModalMode::Add),
        created.id()
    )];
    lines.extend(slice.with_state(render_collection));
    Ok(lines)
}

async fn edit<F>(
    slice: &CollectionSlice<F::Entity>,
    id: &ResourceId,
    fields: &[Assignment],
) -> DashboardResult<Vec<String>>
where
    F: ResourceForm,
    F::Entity: TableRow,
{
    let kind = <F::Entity as Resource>::KIND;
    let current = slice
        .with_state(|state| state.find(id).map(Resource::to_draft))
        .ok_or_else(|| Error::not_found(format!("{} {id} not found", kind.label())))?;
    let mut form = F::prefill(&current);
    fill(&mut form, fields)?;
    let draft = form.submit().map_err(|errors| field_errors_error(&errors))?;
    slice.update(id, draft).await.map_err(rejected)?;

    let mut lines = vec![format!("{}: {id}", modal_title(kind, ModalMode::Edit))];
    lines.extend(slice.with_state(render_collection));
    Ok(lines)
}

async fn delete<E: TableRow>(
    slice: &CollectionSlice<E>,
    id: &ResourceId,
) -> DashboardResult<Vec<String>> {
    slice.delete(id).await.map_err(rejected)?;
    Ok(slice.with_state(render_collection))
}
