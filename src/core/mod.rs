//! Core types shared across modules.

mod link;

pub use link::LinkKind;
