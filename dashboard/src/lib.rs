//! Role-gated admin dashboard core.
//!
//! Authentication and two resource collections (users and products) are
//! held in state slices that talk to the backend only through ports. The
//! bundled simulated backend answers after a configurable delay, so the
//! whole dashboard runs without a server.
//!
//! - [`domain`]: entities, form schemas, ports and slices.
//! - [`outbound`]: simulated backend, token stores, toast queue.
//! - [`inbound`]: console front end standing in for the browser views.
//! - [`app`]: configuration and composition root.

pub mod app;
pub mod domain;
pub mod inbound;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
