//! Test support: disposable databases, fixtures and in-memory fakes.

pub(crate) mod helpers;
pub(crate) mod server;

mod context;

pub(crate) use context::TestContext;
