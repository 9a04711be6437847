//! Transform pipeline for cros-config sources.
//!
//! A source describes families of devices as `devices → products → skus`,
//! with `{{var}}` placeholders resolved against the variables visible at
//! each level. This crate flattens such a source into one record per SKU,
//! validates the result against the bundled JSON schema, enforces identity
//! uniqueness and optionally strips build-only elements.
//!
//! ```
//! use cros_config_schema::transform_config;
//!
//! let source = r#"
//! chromeos:
//!   devices:
//!     - $name: "some"
//!       products:
//!         - $key-id: "SOME"
//!       skus:
//!         - $sku-id: 2
//!           config:
//!             name: "{{$name}}"
//!             identity:
//!               sku-id: "{{$sku-id}}"
//! "#;
//! let json = transform_config(source).unwrap();
//! assert!(json.contains(r#""sku-id": 2"#));
//! ```

pub mod doc;
pub mod error;
pub mod filter;
pub mod flatten;
pub mod node;
pub mod pipeline;
pub mod schema;
pub mod scope;
pub mod template;
pub mod validate;

pub use error::{Error, Result, SchemaViolation};
pub use filter::{BUILD_ONLY_ELEMENTS, filter_build_elements};
pub use flatten::{flatten, parse_source, to_canonical_json, transform_config, transform_tree};
pub use node::{Node, Scalar};
pub use pipeline::{TransformOptions, run, transform_and_validate};
pub use schema::{DEFAULT_SCHEMA, default_schema, load_schema};
pub use scope::VariableScope;
pub use validate::{validate_config, validate_config_schema};
