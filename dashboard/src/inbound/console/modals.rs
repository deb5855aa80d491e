//! Add/edit modals.
//!
//! A modal holds the raw form, accepts field assignments, and hands the
//! slice a draft only when the schema passes.

use serde_json::{Map, Value};

use crate::domain::forms::{FieldErrors, ProductForm, UserForm};
use crate::domain::{Error, Product, Resource, ResourceKind, Role, User};

/// Whether the modal creates or edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    /// Blank form, creates on submit.
    Add,
    /// Prefilled form, updates on submit.
    Edit,
}

/// Modal title, e.g. `Add user` or `Edit product`.
pub fn modal_title(kind: ResourceKind, mode: ModalMode) -> String {
    let verb = match mode {
        ModalMode::Add => "Add",
        ModalMode::Edit => "Edit",
    };
    format!("{verb} {}", kind.label().to_ascii_lowercase())
}

/// Raw form behind a modal.
pub trait ResourceForm: Sized {
    /// Entity the form edits.
    type Entity: Resource;

    /// Field names, in display order.
    const FIELDS: &'static [&'static str];

    /// Form as the add modal opens it.
    fn blank() -> Self;

    /// Form as the edit modal opens it.
    fn prefill(draft: &<Self::Entity as Resource>::Draft) -> Self;

    /// Mutable slot for `field`, if the form has one.
    fn slot(&mut self, field: &str) -> Option<&mut String>;

    /// Run the schema.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages when any field is invalid.
    fn submit(&self) -> Result<<Self::Entity as Resource>::Draft, FieldErrors>;

    /// Overwrite one field with raw input.
    ///
    /// # Errors
    ///
    /// Returns an `invalid_request` [`Error`] naming the known fields when
    /// `field` is not one of them.
    fn assign(&mut self, field: &str, value: &str) -> Result<(), Error> {
        let Some(slot) = self.slot(field) else {
            return Err(Error::invalid_request(format!(
                "unknown {} field {field:?}; expected one of: {}",
                <Self::Entity as Resource>::KIND.label().to_ascii_lowercase(),
                Self::FIELDS.join(", ")
            )));
        };
        value.clone_into(slot);
        Ok(())
    }
}

impl ResourceForm for UserForm {
    type Entity = User;

    const FIELDS: &'static [&'static str] = &["username", "email", "role"];

    fn blank() -> Self {
        Self {
            role: Role::User.as_str().to_owned(),
            ..Self::default()
        }
    }

    fn prefill(draft: &<User as Resource>::Draft) -> Self {
        Self::from_draft(draft)
    }

    fn slot(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "username" => Some(&mut self.username),
            "email" => Some(&mut self.email),
            "role" => Some(&mut self.role),
            _ => None,
        }
    }

    fn submit(&self) -> Result<<User as Resource>::Draft, FieldErrors> {
        self.validate()
    }
}

impl ResourceForm for ProductForm {
    type Entity = Product;

    const FIELDS: &'static [&'static str] = &["name", "description", "price"];

    fn blank() -> Self {
        Self::default()
    }

    fn prefill(draft: &<Product as Resource>::Draft) -> Self {
        Self::from_draft(draft)
    }

    fn slot(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "name" => Some(&mut self.name),
            "description" => Some(&mut self.description),
            "price" => Some(&mut self.price),
            _ => None,
        }
    }

    fn submit(&self) -> Result<<Product as Resource>::Draft, FieldErrors> {
        self.validate()
    }
}

/// Convert schema failures into an `invalid_request` error whose details
/// carry `{"fields": {name: message}}`.
pub fn field_errors_error(errors: &FieldErrors) -> Error {
    let fields: Map<String, Value> = errors
        .iter()
        .map(|(field, message)| (field.to_owned(), Value::String(message.to_owned())))
        .collect();
    Error::invalid_request("Please fix the highlighted fields")
        .with_details(serde_json::json!({ "fields": fields }))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{ErrorCode, ProductDraft, UserDraft};
    use rstest::rstest;

    #[rstest]
    #[case(ResourceKind::User, ModalMode::Add, "Add user")]
    #[case(ResourceKind::User, ModalMode::Edit, "Edit user")]
    #[case(ResourceKind::Product, ModalMode::Add, "Add product")]
    #[case(ResourceKind::Product, ModalMode::Edit, "Edit product")]
    fn titles(#[case] kind: ResourceKind, #[case] mode: ModalMode, #[case] expected: &str) {
        assert_eq!(modal_title(kind, mode), expected);
    }

    #[rstest]
    fn blank_user_form_defaults_to_user_role() {
        assert_eq!(UserForm::blank().role, "user");
    }

    #[rstest]
    fn assigned_user_form_submits() {
        let mut form = UserForm::blank();
        form.assign("username", "testuser").expect("known field");
        form.assign("email", "test@example.com").expect("known field");

        assert_eq!(
            form.submit(),
            Ok(UserDraft {
                username: "testuser".to_owned(),
                email: "test@example.com".to_owned(),
                role: Role::User,
            })
        );
    }

    #[rstest]
    fn unknown_field_is_rejected() {
        let mut form = ProductForm::blank();
        let err = form.assign("colour", "red").expect_err("unknown field");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert!(err.message().contains("name, description, price"));
    }

    #[rstest]
    fn prefilled_product_form_keeps_untouched_fields() {
        let draft = ProductDraft {
            name: "Product 1".to_owned(),
            description: "Description for product 1".to_owned(),
            price: 99.99,
        };
        let mut form = ProductForm::prefill(&draft);
        form.assign("price", "120").expect("known field");

        let submitted = form.submit().expect("valid");
        assert_eq!(submitted.name, "Product 1");
        assert!((submitted.price - 120.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn field_errors_become_details() {
        let mut form = ProductForm::blank();
        form.assign("name", "ab").expect("known field");
        let errors = form.submit().expect_err("invalid");

        let err = field_errors_error(&errors);

        assert_eq!(err.message(), "Please fix the highlighted fields");
        let fields = &err.details().expect("details")["fields"];
        assert_eq!(fields["name"], "Name must be at least 3 characters");
        assert_eq!(fields["price"], "Price must be a number");
    }
}
