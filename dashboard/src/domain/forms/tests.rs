//! Tests for the form schemas.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn valid_user_form() -> UserForm {
    UserForm {
        username: "testuser".to_owned(),
        email: "test@example.com".to_owned(),
        role: "user".to_owned(),
    }
}

#[fixture]
fn valid_product_form() -> ProductForm {
    ProductForm {
        name: "Desk lamp".to_owned(),
        description: "Warm light for late reading".to_owned(),
        price: "49.90".to_owned(),
    }
}

#[rstest]
fn valid_user_form_yields_draft(valid_user_form: UserForm) {
    let draft = valid_user_form.validate().expect("valid form");
    assert_eq!(draft.username, "testuser");
    assert_eq!(draft.email, "test@example.com");
    assert_eq!(draft.role, Role::User);
}

#[rstest]
#[case("ab", "Username must be at least 3 characters")]
#[case("abcdefghijklmnopqrstu", "Username must be less than 20 characters")]
fn username_bounds(mut valid_user_form: UserForm, #[case] username: &str, #[case] message: &str) {
    valid_user_form.username = username.to_owned();
    let errors = valid_user_form.validate().expect_err("invalid username");
    assert_eq!(errors.get("username"), Some(message));
    assert_eq!(errors.len(), 1);
}

#[rstest]
#[case("abc")]
#[case("abcdefghijklmnopqrst")]
fn username_boundaries_are_inclusive(mut valid_user_form: UserForm, #[case] username: &str) {
    valid_user_form.username = username.to_owned();
    assert!(valid_user_form.validate().is_ok());
}

#[rstest]
fn username_length_counts_characters_not_bytes(mut valid_user_form: UserForm) {
    valid_user_form.username = "äöü".to_owned();
    assert!(valid_user_form.validate().is_ok());
}

#[rstest]
#[case("plainaddress")]
#[case("@example.com")]
#[case("user@")]
#[case("user@example")]
#[case(".user@example.com")]
#[case("us..er@example.com")]
#[case("user@example.c")]
fn rejects_malformed_email(mut valid_user_form: UserForm, #[case] email: &str) {
    valid_user_form.email = email.to_owned();
    let errors = valid_user_form.validate().expect_err("invalid email");
    assert_eq!(errors.get("email"), Some("Invalid email address"));
}

#[rstest]
#[case("user1@example.com")]
#[case("first.last+tag@sub.example.co.uk")]
fn accepts_well_formed_email(#[case] email: &str) {
    assert!(is_valid_email(email));
}

#[rstest]
#[case("")]
#[case("Admin")]
#[case("superuser")]
fn rejects_unknown_roles(mut valid_user_form: UserForm, #[case] role: &str) {
    valid_user_form.role = role.to_owned();
    let errors = valid_user_form.validate().expect_err("invalid role");
    assert_eq!(errors.get("role"), Some("Role must be either admin or user"));
}

#[rstest]
fn reports_one_message_per_invalid_field() {
    let form = UserForm {
        username: "ab".to_owned(),
        email: "nope".to_owned(),
        role: "root".to_owned(),
    };
    let errors = form.validate().expect_err("all fields invalid");
    assert_eq!(errors.len(), 3);
    assert_eq!(
        errors.to_string(),
        "email: Invalid email address; role: Role must be either admin or user; \
         username: Username must be at least 3 characters"
    );
}

#[rstest]
fn edit_form_prefills_from_draft() {
    let draft = UserDraft {
        username: "grace".to_owned(),
        email: "grace@example.com".to_owned(),
        role: Role::Admin,
    };
    let form = UserForm::from_draft(&draft);
    assert_eq!(form.role, "admin");
    assert_eq!(form.validate(), Ok(draft));
}

#[rstest]
fn valid_product_form_yields_draft(valid_product_form: ProductForm) {
    let draft = valid_product_form.validate().expect("valid form");
    assert_eq!(draft.name, "Desk lamp");
    assert!((draft.price - 49.90).abs() < f64::EPSILON);
}

#[rstest]
#[case("0", "Price must be greater than 0")]
#[case("0.001", "Price must be greater than 0")]
#[case("-5", "Price must be greater than 0")]
#[case("1000000", "Price must be less than 1,000,000")]
#[case("abc", "Price must be a number")]
#[case("", "Price must be a number")]
#[case("NaN", "Price must be a number")]
#[case("inf", "Price must be a number")]
fn price_bounds(mut valid_product_form: ProductForm, #[case] price: &str, #[case] message: &str) {
    valid_product_form.price = price.to_owned();
    let errors = valid_product_form.validate().expect_err("invalid price");
    assert_eq!(errors.get("price"), Some(message));
}

#[rstest]
#[case("0.01")]
#[case("999999.99")]
fn price_boundaries_are_inclusive(mut valid_product_form: ProductForm, #[case] price: &str) {
    valid_product_form.price = price.to_owned();
    assert!(valid_product_form.validate().is_ok());
}

#[rstest]
#[case(2, "Name must be at least 3 characters")]
#[case(101, "Name must be less than 100 characters")]
fn product_name_bounds(
    mut valid_product_form: ProductForm,
    #[case] length: usize,
    #[case] message: &str,
) {
    valid_product_form.name = "n".repeat(length);
    let errors = valid_product_form.validate().expect_err("invalid name");
    assert_eq!(errors.get("name"), Some(message));
}

#[rstest]
#[case(9, "Description must be at least 10 characters")]
#[case(501, "Description must be less than 500 characters")]
fn description_bounds(
    mut valid_product_form: ProductForm,
    #[case] length: usize,
    #[case] message: &str,
) {
    valid_product_form.description = "d".repeat(length);
    let errors = valid_product_form.validate().expect_err("invalid description");
    assert_eq!(errors.get("description"), Some(message));
}

#[rstest]
fn login_form_requires_minimum_lengths() {
    let errors = LoginForm::new("", "").validate().expect_err("empty form");
    assert_eq!(
        errors.get("username"),
        Some("Username must be at least 3 characters")
    );
    assert_eq!(
        errors.get("password"),
        Some("Password must be at least 6 characters")
    );
}

#[rstest]
fn login_form_yields_credentials() {
    let credentials = LoginForm::new("admin", "secret1")
        .validate()
        .expect("valid login");
    assert_eq!(credentials.username(), "admin");
    assert_eq!(credentials.password(), "secret1");
}

#[rstest]
fn login_form_keeps_padded_username() {
    let credentials = LoginForm::new(" admin ", "password")
        .validate()
        .expect("valid login");
    assert_eq!(credentials.username(), " admin ");
}

#[rstest]
fn login_form_refuses_whitespace_username() {
    let errors = LoginForm::new("    ", "password")
        .validate()
        .expect_err("blank username");
    assert_eq!(errors.get("username"), Some("username must not be empty"));
}

#[rstest]
fn reset_form_checks_email() {
    let form = ResetPasswordForm {
        email: "not-an-email".to_owned(),
    };
    assert_eq!(
        form.validate().expect_err("bad email").get("email"),
        Some("Invalid email address")
    );
    let form = ResetPasswordForm {
        email: " ada@example.com ".to_owned(),
    };
    assert_eq!(form.validate(), Ok("ada@example.com".to_owned()));
}

#[rstest]
fn update_password_form_requires_matching_confirmation() {
    let form = UpdatePasswordForm {
        token: "reset-token".to_owned(),
        password: Zeroizing::new("secret1".to_owned()),
        confirm_password: Zeroizing::new("secret2".to_owned()),
    };
    let errors = form.validate().expect_err("mismatch");
    assert_eq!(errors.get("confirmPassword"), Some("Passwords do not match"));
}

#[rstest]
fn update_password_form_yields_update() {
    let form = UpdatePasswordForm {
        token: "reset-token".to_owned(),
        password: Zeroizing::new("secret1".to_owned()),
        confirm_password: Zeroizing::new("secret1".to_owned()),
    };
    let update = form.validate().expect("valid update");
    assert_eq!(update.token.expose(), "reset-token");
    assert_eq!(update.password.as_str(), "secret1");
}
