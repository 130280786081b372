//! Blockdrop (workspace facade crate).
//!
//! This package keeps the `blockdrop::{core,adapter,term,input,types}` public
//! API stable while the implementation lives in dedicated crates under
//! `crates/`.

pub use blockdrop_adapter as adapter;
pub use blockdrop_core as core;
pub use blockdrop_input as input;
pub use blockdrop_term as term;
pub use blockdrop_types as types;
