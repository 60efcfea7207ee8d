//! Validator registry, predicates and messages
//!
//! Validators are identified by [`ValidatorKey`]. A [`ValidatorRegistry`]
//! evaluates them against a field value and reports each outcome to a
//! [`ValiditySink`].

pub mod key;
pub mod messages;
pub mod registry;
pub mod sink;
pub mod validators;

pub use key::ValidatorKey;
pub use messages::MessageCatalog;
pub use registry::ValidatorRegistry;
pub use sink::{FieldState, ValiditySink};
