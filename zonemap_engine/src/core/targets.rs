//! String definitions for the different log targets for the [`tracing`] crate,
//! used in macros like [`tracing::warn`]

pub const MANAGER: &str = concat!(env!("CARGO_PKG_NAME"), "::manager");
pub const RESOLVER: &str = concat!(env!("CARGO_PKG_NAME"), "::resolver");
pub const DEFRAG: &str = concat!(env!("CARGO_PKG_NAME"), "::defrag");
pub const TREE: &str = concat!(env!("CARGO_PKG_NAME"), "::tree");
