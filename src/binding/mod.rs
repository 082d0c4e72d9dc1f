//! Binding Module - binds, controls and instance paths
//!
//! - `bind`: `xf:bind` nodes (id, name, declared type, parent)
//! - `control`: typed controls presenting a bind in the form body
//! - `path`: where a control's value lives in instance data
//!
//! Data flow:
//! ```text
//! fr-form-binds → Bind ──┐
//!                        ├─→ Control (kind from body tag or registry)
//! fr:body element ───────┘        ↓
//!                           InstancePath (//form/<parent>/<name>)
//!                                 ↓
//!                        decode(text) → FormValue
//! ```

mod bind;
mod control;
mod path;

pub use bind::Bind;
pub use control::{Control, ControlElement, ControlKind};
pub use path::InstancePath;
