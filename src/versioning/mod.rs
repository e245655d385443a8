//! Release-based asset path versioning.
//!
//! ```text
//! versioning/
//! ├── policy     # VersioningPolicy: is versioning on, which host
//! ├── strategy   # Strategy: prefix / extension insertion
//! ├── token      # VersionToken: current release identifier
//! ├── trace      # Trace: "Changing ... to ..." notices
//! └── versioner  # PathVersioner: strategy + trace
//! ```

mod policy;
pub mod strategy;
mod token;
mod trace;
mod versioner;

pub use policy::VersioningPolicy;
pub use strategy::Strategy;
pub use token::{DEFAULT_VERSION_ENV, VersionToken};
pub use trace::Trace;
pub use versioner::PathVersioner;
