//! # bs-validation
//!
//! Declarative form-field validation: a registry of named validators, default
//! error messages, and automatic wiring of validators onto form fields.
//!
//! ## Features
//!
//! - **Built-in validators**: required, email, url, number, digits, min/max,
//!   length/minlength/maxlength, pattern, equalTo
//! - **Default messages**: human-readable templates with the field's bound
//!   substituted (`{{validValue}}`), overridable from YAML configuration
//! - **Pluggable validity sinks**: results are reported per key to any
//!   [`ValiditySink`](core::ValiditySink)
//! - **Auto-wiring**: fields described by their element kind, model binding and
//!   attributes get their validators installed in declaration order
//! - **Pending includes**: track included templates so each is wired once
//!
//! ## Quick Start
//!
//! ```rust
//! use bs_validation::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(ValidatorRegistry::default());
//! let fields = vec![
//!     FieldDescriptor::new("age", ElementKind::Input)
//!         .with_model("person.age")
//!         .with_attribute("digits", "")
//!         .with_attribute("min", "18"),
//! ];
//!
//! let mut form = Form::wire(registry, ValidationConfig::default_config(), &fields).unwrap();
//! form.set_value("age", "16").unwrap();
//!
//! assert!(!form.is_valid());
//! assert_eq!(
//!     form.errors().unwrap()["age"],
//!     vec!["Please enter a value greater than or equal to 18.".to_string()]
//! );
//! ```

pub mod binding;
pub mod config;
pub mod core;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Attributes, ConfigError, Error, FieldContext, FieldState, MessageCatalog, MessageError,
        PendingResources, ValidationError, ValidatorKey, ValidatorRegistry, ValiditySink,
    };

    // === Binding ===
    pub use crate::binding::{ElementKind, FieldControl, FieldDescriptor, Form, discover};

    // === Config ===
    pub use crate::config::ValidationConfig;
}
