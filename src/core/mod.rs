//! Core module containing the validator registry and its supporting types

pub mod error;
pub mod field;
pub mod pending;
pub mod validation;

pub use error::{ConfigError, Error, MessageError, Result, ValidationError};
pub use field::{Attributes, FieldContext};
pub use pending::PendingResources;
pub use validation::{FieldState, MessageCatalog, ValidatorKey, ValidatorRegistry, ValiditySink};
