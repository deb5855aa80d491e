//! Console command grammar.
//!
//! A line is split into shell-like words, then parsed by `clap` without a
//! binary name. Form fields are passed as `field=value` words; quote values
//! that contain spaces: `add name="Desk lamp" price=12.50`.

use std::str::FromStr;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::domain::Error;

/// One `field=value` word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Form field name.
    pub field: String,
    /// Raw value as typed.
    pub value: String,
}

impl FromStr for Assignment {
    type Err = String;

    fn from_str(word: &str) -> Result<Self, Self::Err> {
        match word.split_once('=') {
            Some((field, value)) if !field.trim().is_empty() => Ok(Self {
                field: field.trim().to_owned(),
                value: value.to_owned(),
            }),
            _ => Err(format!("expected field=value, got {word:?}")),
        }
    }
}

/// Parsed console line.
#[derive(Debug, Parser)]
#[command(
    name = "dashboard",
    no_binary_name = true,
    disable_version_flag = true,
    about = "Admin dashboard console"
)]
pub struct CommandLine {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Console commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Sign in.
    Login {
        /// Account name; `admin` opens the user-management view.
        username: String,
        /// Password, at least six characters.
        password: String,
    },
    /// Sign out and forget the stored token.
    Logout,
    /// Open a page by path.
    Goto {
        /// Path such as `/dashboard`.
        path: String,
    },
    /// Request a password reset email.
    Forgot {
        /// Address to send the reset link to.
        email: String,
    },
    /// Set a new password with a reset token.
    ResetPassword {
        /// Token from the reset link.
        token: String,
        /// New password.
        password: String,
        /// New password again.
        confirm: String,
    },
    /// Fetch the current collection again and show it.
    #[command(visible_alias = "list")]
    Refresh,
    /// Show the current page without fetching.
    Show,
    /// Open the add modal and submit it.
    Add {
        /// Field values as `field=value`.
        #[arg(value_parser = parse_assignment)]
        fields: Vec<Assignment>,
    },
    /// Open the edit modal for an entity and submit it.
    Edit {
        /// Identifier of the entity to edit.
        id: String,
        /// Changed field values as `field=value`.
        #[arg(value_parser = parse_assignment)]
        fields: Vec<Assignment>,
    },
    /// Delete an entity.
    Delete {
        /// Identifier of the entity to delete.
        id: String,
    },
    /// List toasts that are still visible.
    Toasts,
    /// Close every visible toast.
    Dismiss,
    /// Leave the console.
    #[command(visible_alias = "exit")]
    Quit,
}

fn parse_assignment(word: &str) -> Result<Assignment, String> {
    word.parse()
}

/// Result of parsing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// Nothing but whitespace.
    Empty,
    /// A command to run.
    Command(Command),
    /// Help text requested with `help` or `--help`.
    Help(String),
}

/// Raised when a line has an unterminated quote.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unterminated {quote} quote")]
pub struct UnterminatedQuote {
    quote: char,
}

/// Split a line into words. Single or double quotes group characters,
/// including whitespace, and may appear mid-word.
///
/// # Errors
///
/// Returns [`UnterminatedQuote`] when a quote is left open.
pub fn split_words(line: &str) -> Result<Vec<String>, UnterminatedQuote> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match (quote, ch) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(ch);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(open) = quote {
        return Err(UnterminatedQuote { quote: open });
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Parse one console line.
///
/// # Errors
///
/// Returns an `invalid_request` [`Error`] for malformed lines and unknown
/// commands.
pub fn parse_line(line: &str) -> Result<Parsed, Error> {
    let words = split_words(line).map_err(|err| Error::invalid_request(err.to_string()))?;
    if words.is_empty() {
        return Ok(Parsed::Empty);
    }
    match CommandLine::try_parse_from(words) {
        Ok(parsed) => Ok(Parsed::Command(parsed.command)),
        Err(err) if err.kind() == clap::error::ErrorKind::DisplayHelp => {
            Ok(Parsed::Help(err.render().to_string()))
        }
        Err(err) if err.kind() == clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            Ok(Parsed::Help(err.render().to_string()))
        }
        Err(err) => Err(Error::invalid_request(err.render().to_string().trim_end())),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn assignment(field: &str, value: &str) -> Assignment {
        Assignment {
            field: field.to_owned(),
            value: value.to_owned(),
        }
    }

    #[rstest]
    #[case("login admin secret", vec!["login", "admin", "secret"])]
    #[case("  spaced   out  ", vec!["spaced", "out"])]
    #[case(r#"add name="Desk lamp" price=12"#, vec!["add", "name=Desk lamp", "price=12"])]
    #[case("say 'it''s'", vec!["say", "its"])]
    #[case(r#"edit 1 description="""#, vec!["edit", "1", "description="])]
    #[case(r#"login "" pw"#, vec!["login", "", "pw"])]
    fn splits_words(#[case] line: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_words(line).expect("balanced quotes"), expected);
    }

    #[rstest]
    fn reports_unterminated_quote() {
        let err = split_words("add name=\"Desk").expect_err("open quote");
        assert_eq!(err.to_string(), "unterminated \" quote");
    }

    #[rstest]
    fn parses_login() {
        assert_eq!(
            parse_line("login admin password").expect("parse"),
            Parsed::Command(Command::Login {
                username: "admin".to_owned(),
                password: "password".to_owned(),
            })
        );
    }

    #[rstest]
    fn parses_edit_with_assignments() {
        assert_eq!(
            parse_line(r#"edit 2 username=updateduser role=admin"#).expect("parse"),
            Parsed::Command(Command::Edit {
                id: "2".to_owned(),
                fields: vec![
                    assignment("username", "updateduser"),
                    assignment("role", "admin"),
                ],
            })
        );
    }

    #[rstest]
    #[case("list")]
    #[case("refresh")]
    fn list_is_an_alias_for_refresh(#[case] line: &str) {
        assert_eq!(
            parse_line(line).expect("parse"),
            Parsed::Command(Command::Refresh)
        );
    }

    #[rstest]
    fn parses_dismiss() {
        assert_eq!(
            parse_line("dismiss").expect("parse"),
            Parsed::Command(Command::Dismiss)
        );
    }

    #[rstest]
    fn blank_line_is_empty() {
        assert_eq!(parse_line("   ").expect("parse"), Parsed::Empty);
    }

    #[rstest]
    fn help_is_returned_as_text() {
        let Parsed::Help(text) = parse_line("help").expect("parse") else {
            panic!("expected help text");
        };
        assert!(text.contains("reset-password"));
    }

    #[rstest]
    #[case("frobnicate")]
    #[case("add price")]
    #[case("delete")]
    fn malformed_commands_are_invalid_requests(#[case] line: &str) {
        let err = parse_line(line).expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
