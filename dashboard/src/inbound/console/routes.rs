//! Page routing.

use std::fmt;

/// Pages the console can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Sign-in page.
    Login,
    /// Password reset request page.
    ForgotPassword,
    /// Role-dependent management view.
    Dashboard,
}

/// Outcome of resolving a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The path names a page.
    Direct(Route),
    /// The path was replaced by another page's path.
    Redirect(Route),
}

impl Navigation {
    /// Page finally shown.
    pub fn route(self) -> Route {
        match self {
            Self::Direct(route) | Self::Redirect(route) => route,
        }
    }
}

impl Route {
    /// Canonical path of the page.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::ForgotPassword => "/forgot-password",
            Self::Dashboard => "/dashboard",
        }
    }

    /// Map a path to a page. `/` and unknown paths redirect to the login
    /// page. A single trailing slash is ignored.
    pub fn resolve(path: &str) -> Navigation {
        let trimmed = path.trim();
        let normalized = match trimmed.strip_suffix('/') {
            Some(rest) if !rest.is_empty() => rest,
            _ => trimmed,
        };
        match normalized {
            "/login" => Navigation::Direct(Self::Login),
            "/forgot-password" => Navigation::Direct(Self::ForgotPassword),
            "/dashboard" => Navigation::Direct(Self::Dashboard),
            _ => Navigation::Redirect(Self::Login),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
