//! orbeon-xml - typed access to Orbeon form definitions and form data
//!
//! ```text
//! definition XML → Builder (binds, controls, sanitized names)
//!                     ↓ Arc<Builder>
//! instance XML   → Runner (raw values, decoded values) → RunnerForm
//! ```

pub mod binding;
pub mod builder;
pub mod config;
pub mod error;
pub mod registry;
pub mod resources;
pub mod runner;
pub mod value;
pub mod xml;

pub use binding::{Bind, Control, ControlElement, ControlKind, InstancePath};
pub use builder::{sanitize_name, Builder};
pub use config::FormConfig;
pub use error::{DecodeError, FixSuggestion, FormError, Result};
pub use runner::{Runner, RunnerForm, RunnerOptions};
pub use value::FormValue;
