//! Form schemas evaluated before any slice operation is dispatched.
//!
//! Each form holds raw field input as typed by the user. `validate` either
//! yields the typed draft the slices accept, or one message per invalid
//! field. Field errors never reach the asynchronous error channel.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use zeroize::Zeroizing;

use super::auth::{AccessToken, LoginCredentials};
use super::product::ProductDraft;
use super::user::{Role, UserDraft};

/// Minimum username length, in characters.
pub const USERNAME_MIN: usize = 3;
/// Maximum username length, in characters.
pub const USERNAME_MAX: usize = 20;
/// Minimum password length accepted by the login and password forms.
pub const PASSWORD_MIN: usize = 6;
/// Minimum product name length.
pub const PRODUCT_NAME_MIN: usize = 3;
/// Maximum product name length.
pub const PRODUCT_NAME_MAX: usize = 100;
/// Minimum product description length.
pub const DESCRIPTION_MIN: usize = 10;
/// Maximum product description length.
pub const DESCRIPTION_MAX: usize = 500;
/// Lowest accepted price.
pub const PRICE_MIN: f64 = 0.01;
/// Highest accepted price.
pub const PRICE_MAX: f64 = 999_999.99;

/// Per-field validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// Message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Whether every field passed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of invalid fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Fields and messages in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn record(&mut self, field: &'static str, outcome: Result<(), String>) {
        if let Err(message) = outcome {
            self.0.entry(field).or_insert(message);
        }
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Whether `value` is a syntactically valid email address.
///
/// # Panics
///
/// Panics on first use if the built-in email pattern fails to compile.
pub fn is_valid_email(value: &str) -> bool {
    #[expect(clippy::expect_used, reason = "the pattern is a compile-time constant")]
    static RE: LazyLock<Regex> = LazyLock::new(|| {
        // Leading dots and consecutive dots are rejected separately.
        let pattern = r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$";
        Regex::new(pattern).expect("valid regex")
    });
    !value.starts_with('.') && !value.contains("..") && RE.is_match(value)
}

fn length_between(
    value: &str,
    min: usize,
    max: usize,
    too_short: &str,
    too_long: &str,
) -> Result<(), String> {
    let length = value.chars().count();
    if length < min {
        return Err(too_short.to_owned());
    }
    if length > max {
        return Err(too_long.to_owned());
    }
    Ok(())
}

fn min_length(value: &str, min: usize, message: &str) -> Result<(), String> {
    length_between(value, min, usize::MAX, message, message)
}

fn email(value: &str) -> Result<(), String> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err("Invalid email address".to_owned())
    }
}

/// Raw input of the add/edit user modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    /// Username field.
    pub username: String,
    /// Email field.
    pub email: String,
    /// Role selector value.
    pub role: String,
}

impl UserForm {
    /// Prefill the form from an existing draft, as the edit modal does.
    pub fn from_draft(draft: &UserDraft) -> Self {
        Self {
            username: draft.username.clone(),
            email: draft.email.clone(),
            role: draft.role.as_str().to_owned(),
        }
    }

    /// Run the user schema.
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::forms::UserForm;
    ///
    /// let form = UserForm {
    ///     username: "ab".into(),
    ///     email: "ab@example.com".into(),
    ///     role: "user".into(),
    /// };
    /// let errors = form.validate().unwrap_err();
    /// assert_eq!(
    ///     errors.get("username"),
    ///     Some("Username must be at least 3 characters")
    /// );
    /// ```
    pub fn validate(&self) -> Result<UserDraft, FieldErrors> {
        let mut errors = FieldErrors::default();
        errors.record(
            "username",
            length_between(
                &self.username,
                USERNAME_MIN,
                USERNAME_MAX,
                "Username must be at least 3 characters",
                "Username must be less than 20 characters",
            ),
        );
        errors.record("email", email(&self.email));
        let role = self.role.parse::<Role>().ok();
        if role.is_none() {
            errors.record("role", Err("Role must be either admin or user".to_owned()));
        }

        match role {
            Some(role) => errors.into_result(|| UserDraft {
                username: self.username.clone(),
                email: self.email.clone(),
                role,
            }),
            None => Err(errors),
        }
    }
}

/// Raw input of the add/edit product modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    /// Name field.
    pub name: String,
    /// Description field.
    pub description: String,
    /// Price field as typed.
    pub price: String,
}

impl ProductForm {
    /// Prefill the form from an existing draft.
    pub fn from_draft(draft: &ProductDraft) -> Self {
        Self {
            name: draft.name.clone(),
            description: draft.description.clone(),
            price: format!("{:.2}", draft.price),
        }
    }

    /// Run the product schema.
    pub fn validate(&self) -> Result<ProductDraft, FieldErrors> {
        let mut errors = FieldErrors::default();
        errors.record(
            "name",
            length_between(
                &self.name,
                PRODUCT_NAME_MIN,
                PRODUCT_NAME_MAX,
                "Name must be at least 3 characters",
                "Name must be less than 100 characters",
            ),
        );
        errors.record(
            "description",
            length_between(
                &self.description,
                DESCRIPTION_MIN,
                DESCRIPTION_MAX,
                "Description must be at least 10 characters",
                "Description must be less than 500 characters",
            ),
        );
        let price = parse_price(&self.price);
        errors.record(
            "price",
            price.as_ref().map(|_| ()).map_err(|message| message.clone()),
        );

        match price {
            Ok(price) => errors.into_result(|| ProductDraft {
                name: self.name.clone(),
                description: self.description.clone(),
                price,
            }),
            Err(_) => Err(errors),
        }
    }
}

fn parse_price(raw: &str) -> Result<f64, String> {
    let price = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| "Price must be a number".to_owned())?;
    if price < PRICE_MIN {
        return Err("Price must be greater than 0".to_owned());
    }
    if price > PRICE_MAX {
        return Err("Price must be less than 1,000,000".to_owned());
    }
    Ok(price)
}

/// Raw input of the sign-in page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Username field.
    pub username: String,
    /// Password field.
    pub password: Zeroizing<String>,
}

impl LoginForm {
    /// Build a form from raw values.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Run the login schema.
    pub fn validate(&self) -> Result<LoginCredentials, FieldErrors> {
        let mut errors = FieldErrors::default();
        errors.record(
            "username",
            min_length(
                &self.username,
                USERNAME_MIN,
                "Username must be at least 3 characters",
            ),
        );
        errors.record(
            "password",
            min_length(
                &self.password,
                PASSWORD_MIN,
                "Password must be at least 6 characters",
            ),
        );
        if !errors.is_empty() {
            return Err(errors);
        }
        LoginCredentials::try_from_parts(&self.username, &self.password).map_err(|err| {
            let mut refused = FieldErrors::default();
            refused.record("username", Err(err.to_string()));
            refused
        })
    }
}

/// Raw input of the forgot-password page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetPasswordForm {
    /// Address the reset link goes to.
    pub email: String,
}

impl ResetPasswordForm {
    /// Run the reset schema, returning the address.
    pub fn validate(&self) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::default();
        errors.record("email", email(self.email.trim()));
        errors.into_result(|| self.email.trim().to_owned())
    }
}

/// Validated password change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordUpdate {
    /// Reset token from the emailed link.
    pub token: AccessToken,
    /// New password.
    pub password: Zeroizing<String>,
}

/// Raw input of the set-new-password page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePasswordForm {
    /// Reset token field.
    pub token: String,
    /// New password field.
    pub password: Zeroizing<String>,
    /// Confirmation field.
    pub confirm_password: Zeroizing<String>,
}

impl UpdatePasswordForm {
    /// Run the password schema.
    pub fn validate(&self) -> Result<PasswordUpdate, FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.token.trim().is_empty() {
            errors.record("token", Err("Reset token is required".to_owned()));
        }
        errors.record(
            "password",
            min_length(
                &self.password,
                PASSWORD_MIN,
                "Password must be at least 6 characters",
            ),
        );
        if self.password != self.confirm_password {
            errors.record(
                "confirmPassword",
                Err("Passwords do not match".to_owned()),
            );
        }
        errors.into_result(|| PasswordUpdate {
            token: AccessToken::new(self.token.trim()),
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests;
