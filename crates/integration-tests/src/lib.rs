//! Integration test support for Pocket Store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pocket-store-integration-tests
//! ```
//!
//! Nothing here talks to the real DummyJSON service:
//!
//! - [`FakeApi`] serves canned users and categories in process, with
//!   optional gates to hold a category fetch open
//! - [`StubServer`] serves canned JSON over a loopback socket so the real
//!   HTTP client can be exercised end to end
//! - [`fixtures`] builds users and products

pub mod fixtures;

mod fake;
mod stub_server;

pub use fake::FakeApi;
pub use stub_server::StubServer;
