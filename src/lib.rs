//! Seeded randomness and parameter introspection base for model types.
//!
//! This crate provides the foundational pieces shared by estimator-style
//! model types:
//!
//! - **Seeding**: [`SeedGenerator`], a reproducible pseudo-random generator
//!   a model owns as a named field, built from an optional seed.
//! - **Parameter registry**: [`ParamDescriptor`] tables declaring, once per
//!   type, which attributes a model exposes and how to read and write them.
//! - **Accessor surface**: the [`Model`] trait, with `get_params` /
//!   `set_params` over the registry and seed plumbing on top of the
//!   generator.
//! - **Values and errors**: [`ParamValue`] dynamic values with deep-clone
//!   semantics, and [`ModelError`] for rejected names and assignments.
//!
//! Names classify by convention (see [`params::is_param_name`]): no leading
//! or trailing underscore means public parameter; a trailing underscore
//! marks a fitted attribute (excluded from parameters); a leading
//! underscore marks an internal one.
//!
//! # Example
//!
//! ```
//! use modelbase::{assign, Model, ParamDescriptor, ParamValue, SeedGenerator};
//!
//! struct Perceptron {
//!     learning_rate: f64,
//!     seed: SeedGenerator,
//! }
//!
//! impl Perceptron {
//!     fn new(random_seed: Option<u64>) -> Self {
//!         Self {
//!             learning_rate: 0.01,
//!             seed: SeedGenerator::new(random_seed),
//!         }
//!     }
//! }
//!
//! impl Model for Perceptron {
//!     fn param_descriptors() -> &'static [ParamDescriptor<Self>] {
//!         static DESCRIPTORS: &[ParamDescriptor<Perceptron>] = &[ParamDescriptor::new(
//!             "learning_rate",
//!             "Step size for weight updates.",
//!             |m: &Perceptron| ParamValue::from(m.learning_rate),
//!             |m: &mut Perceptron, v| assign("learning_rate", &mut m.learning_rate, v),
//!         )];
//!         DESCRIPTORS
//!     }
//!
//!     fn seed_generator(&self) -> &SeedGenerator {
//!         &self.seed
//!     }
//!
//!     fn seed_generator_mut(&mut self) -> &mut SeedGenerator {
//!         &mut self.seed
//!     }
//! }
//!
//! let mut model = Perceptron::new(Some(42));
//! model
//!     .set_params([("learning_rate", ParamValue::from(0.1))])
//!     .unwrap();
//! assert_eq!(model.get_params(true)["learning_rate"].as_f64(), Some(0.1));
//! ```
//!
//! # Modules
//!
//! - [`rng`]: the seeding component.
//! - [`params`]: name classification and descriptor tables.
//! - [`model`]: the base trait.
//! - [`value`]: dynamic parameter values.
//! - [`dyn_value`]: the external-value trait.
//! - [`error`]: error types.

pub mod dyn_value;
pub mod error;
pub mod model;
pub mod params;
pub mod rng;
pub mod value;

// Re-export commonly used types at the crate root for convenience
pub use dyn_value::DynValue;
pub use error::{ModelError, Result};
pub use model::Model;
pub use params::{find_descriptor, is_param_name, ParamDescriptor, ParamInfo};
pub use rng::SeedGenerator;
pub use value::{assign, FromParam, ParamValue};
