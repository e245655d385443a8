//! Host-side asset reference processing.
//!
//! The pipeline finds asset references in compiled output and resolves each
//! one through an [`AssetPathResolver`](crate::resolver::AssetPathResolver).
//! Which resolver is plugged in decides whether paths get versioned.

pub mod stylesheet;

pub use stylesheet::rewrite_file;
