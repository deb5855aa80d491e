//! Inbound adapters driving the application.
//!
//! - **console**: line-oriented front end standing in for the browser views

pub mod console;
