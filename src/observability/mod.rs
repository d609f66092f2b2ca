//! Observability for parkdata
//!
//! Structured JSON logging to stderr plus lifecycle scopes.
//!
//! ```ignore
//! use parkdata::observability::{Event, Logger, ObservationScope};
//!
//! Logger::info("CONFIG_LOADED", &[("path", "parkdata.json")]);
//! Event::DuplicateKey.emit(&[("key", "legalName")]);
//!
//! let scope = ObservationScope::new("PARSE");
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::ObservationScope;
