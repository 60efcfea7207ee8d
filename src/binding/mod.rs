//! Automatic validation wiring
//!
//! Fields are described by [`FieldDescriptor`]s supplied by the caller. The
//! ones that qualify are turned into [`FieldControl`]s whose validators are
//! installed from their declared attributes.

pub mod control;
pub mod descriptor;
pub mod form;

pub use control::{FieldControl, Interceptor};
pub use descriptor::{ElementKind, FieldDescriptor};
pub use form::{Form, discover};
