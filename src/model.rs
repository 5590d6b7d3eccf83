//! The estimator base trait.
//!
//! # Overview
//!
//! [`Model`] is the uniform surface shared by model types: reproducible
//! seeding through a [`SeedGenerator`] field, and parameter access through
//! the type's static descriptor table.
//!
//! Implementors provide three things: the descriptor table and a pair of
//! accessors for the seed generator field. Everything else is derived.
//! Constructors of concrete models take `random_seed: Option<u64>` and
//! build the generator from it.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::Result;
use crate::params::{find_descriptor, is_param_name, ParamDescriptor, ParamInfo};
use crate::rng::SeedGenerator;
use crate::value::ParamValue;

/// Base trait for model types with seeded randomness and introspectable
/// parameters.
///
/// # Example
///
/// ```
/// use modelbase::{assign, Model, ParamDescriptor, ParamValue, SeedGenerator};
///
/// struct Ridge {
///     alpha: f64,
///     seed: SeedGenerator,
/// }
///
/// impl Ridge {
///     fn new(random_seed: Option<u64>) -> Self {
///         Self {
///             alpha: 1.0,
///             seed: SeedGenerator::new(random_seed),
///         }
///     }
/// }
///
/// impl Model for Ridge {
///     fn param_descriptors() -> &'static [ParamDescriptor<Self>] {
///         static DESCRIPTORS: &[ParamDescriptor<Ridge>] = &[ParamDescriptor::new(
///             "alpha",
///             "L2 penalty strength.",
///             |m: &Ridge| ParamValue::from(m.alpha),
///             |m: &mut Ridge, v| assign("alpha", &mut m.alpha, v),
///         )];
///         DESCRIPTORS
///     }
///
///     fn seed_generator(&self) -> &SeedGenerator {
///         &self.seed
///     }
///
///     fn seed_generator_mut(&mut self) -> &mut SeedGenerator {
///         &mut self.seed
///     }
/// }
///
/// let mut model = Ridge::new(Some(7));
/// model.set_params([("alpha", ParamValue::from(0.5))]).unwrap();
/// assert_eq!(model.get_params(true)["alpha"].as_f64(), Some(0.5));
/// ```
pub trait Model: Sized + 'static {
    /// Returns the type's declared attribute table.
    fn param_descriptors() -> &'static [ParamDescriptor<Self>];

    /// Returns the seeding component.
    fn seed_generator(&self) -> &SeedGenerator;

    /// Returns the seeding component mutably.
    fn seed_generator_mut(&mut self) -> &mut SeedGenerator;

    /// Returns the raw seed this model was constructed with.
    fn random_seed(&self) -> Option<u64> {
        self.seed_generator().random_seed()
    }

    /// Draws one seed value from the model's generator, uniform over
    /// `[0, 2^31 - 1)`. Advances the generator state.
    fn make_random_seed(&mut self) -> u64 {
        self.seed_generator_mut().make_random_seed()
    }

    /// Returns the model's public parameters.
    ///
    /// Only declared names passing [`is_param_name`] appear; fitted and
    /// private attributes are excluded. With `deep` true every value is
    /// detached from the instance via [`ParamValue::deep_clone`]; with
    /// `deep` false, [`ParamValue::External`] values keep sharing the
    /// instance's handles.
    fn get_params(&self, deep: bool) -> BTreeMap<&'static str, ParamValue> {
        Self::param_descriptors()
            .iter()
            .filter(|d| is_param_name(d.name()))
            .map(|d| {
                let value = d.get_from(self);
                let value = if deep { value.deep_clone() } else { value };
                (d.name(), value)
            })
            .collect()
    }

    /// Overwrites parameters from `(name, value)` pairs, in order.
    ///
    /// Each name must pass [`is_param_name`] and be declared, and each value
    /// must convert to the parameter's type. The first failure aborts the
    /// call; assignments already applied for earlier pairs stay applied.
    /// Returns `&mut Self` for chaining.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidParamName`] for private or unknown names,
    /// [`ModelError::ParamTypeMismatch`] for inconvertible values.
    ///
    /// [`ModelError::InvalidParamName`]: crate::error::ModelError::InvalidParamName
    /// [`ModelError::ParamTypeMismatch`]: crate::error::ModelError::ParamTypeMismatch
    fn set_params<I, K>(&mut self, params: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, ParamValue)>,
        K: AsRef<str>,
    {
        for (name, value) in params {
            let name = name.as_ref();
            let descriptor = find_descriptor(Self::param_descriptors(), name)?;
            descriptor.set_on(self, value)?;
            debug!(param = descriptor.name(), "model parameter updated");
        }
        Ok(self)
    }

    /// Returns the schema of every declared attribute, fitted and private
    /// ones included (flagged by [`ParamInfo::param`]).
    fn describe_params() -> Vec<ParamInfo> {
        Self::param_descriptors().iter().map(|d| d.info()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::assign;

    #[derive(Debug)]
    struct Toy {
        alpha: f64,
        shuffle: bool,
        solver: String,
        loss_: Option<f64>,
        _scratch: i64,
        seed: SeedGenerator,
    }

    impl Toy {
        fn new(random_seed: Option<u64>) -> Self {
            Self {
                alpha: 0.1,
                shuffle: true,
                solver: "sgd".to_string(),
                loss_: None,
                _scratch: 0,
                seed: SeedGenerator::new(random_seed),
            }
        }
    }

    impl Model for Toy {
        fn param_descriptors() -> &'static [ParamDescriptor<Self>] {
            static DESCRIPTORS: &[ParamDescriptor<Toy>] = &[
                ParamDescriptor::new(
                    "alpha",
                    "Step size.",
                    |m: &Toy| ParamValue::from(m.alpha),
                    |m: &mut Toy, v| assign("alpha", &mut m.alpha, v),
                ),
                ParamDescriptor::new(
                    "shuffle",
                    "Whether to shuffle between epochs.",
                    |m: &Toy| ParamValue::from(m.shuffle),
                    |m: &mut Toy, v| assign("shuffle", &mut m.shuffle, v),
                ),
                ParamDescriptor::new(
                    "solver",
                    "Optimization backend.",
                    |m: &Toy| ParamValue::from(m.solver.clone()),
                    |m: &mut Toy, v| assign("solver", &mut m.solver, v),
                ),
                ParamDescriptor::new(
                    "loss_",
                    "Final training loss.",
                    |m: &Toy| ParamValue::from(m.loss_),
                    |m: &mut Toy, v| {
                        m.loss_ = v.as_f64();
                        Ok(())
                    },
                ),
                ParamDescriptor::new(
                    "_scratch",
                    "Internal workspace.",
                    |m: &Toy| ParamValue::from(m._scratch),
                    |m: &mut Toy, v| assign("_scratch", &mut m._scratch, v),
                ),
            ];
            DESCRIPTORS
        }

        fn seed_generator(&self) -> &SeedGenerator {
            &self.seed
        }

        fn seed_generator_mut(&mut self) -> &mut SeedGenerator {
            &mut self.seed
        }
    }

    #[test]
    fn test_get_params_excludes_non_param_names() {
        let mut model = Toy::new(None);
        model.loss_ = Some(0.03);

        let params = model.get_params(true);
        assert_eq!(params.len(), 3);
        assert!(params.contains_key("alpha"));
        assert!(params.contains_key("shuffle"));
        assert!(params.contains_key("solver"));
        assert!(!params.contains_key("loss_"));
        assert!(!params.contains_key("_scratch"));
    }

    #[test]
    fn test_get_params_reads_current_values() {
        let mut model = Toy::new(None);
        let params = model.get_params(true);
        assert_eq!(params["alpha"].as_f64(), Some(0.1));

        model.alpha = 0.9;
        let params = model.get_params(true);
        assert_eq!(params["alpha"].as_f64(), Some(0.9));
    }

    #[test]
    fn test_set_params_then_get_params() {
        let mut model = Toy::new(None);
        model
            .set_params([
                ("alpha", ParamValue::from(0.5)),
                ("solver", ParamValue::from("adam")),
            ])
            .unwrap();

        let params = model.get_params(true);
        assert_eq!(params["alpha"].as_f64(), Some(0.5));
        assert_eq!(params["solver"].as_str(), Some("adam"));
    }

    #[test]
    fn test_set_params_chains() {
        let mut model = Toy::new(None);
        model
            .set_params([("alpha", ParamValue::from(0.2))])
            .unwrap()
            .set_params([("shuffle", ParamValue::from(false))])
            .unwrap();
        assert_eq!(model.alpha, 0.2);
        assert!(!model.shuffle);
    }

    #[test]
    fn test_set_params_rejects_unknown_name() {
        let mut model = Toy::new(None);
        let err = model
            .set_params([("unknown_attr", ParamValue::from(1_i64))])
            .unwrap_err();
        assert_eq!(err.param_name(), "unknown_attr");
    }

    #[test]
    fn test_set_params_rejects_private_names() {
        let mut model = Toy::new(None);
        // Declared, but the name shape makes it off-limits.
        assert!(model
            .set_params([("_scratch", ParamValue::from(1_i64))])
            .is_err());
        assert!(model
            .set_params([("loss_", ParamValue::from(0.5))])
            .is_err());
        // Undeclared private names fail the same way.
        assert!(model
            .set_params([("_private", ParamValue::from(1_i64))])
            .is_err());
    }

    #[test]
    fn test_set_params_fails_fast_keeps_earlier_assignments() {
        let mut model = Toy::new(None);
        let err = model
            .set_params([
                ("alpha", ParamValue::from(0.7)),
                ("bogus", ParamValue::from(1_i64)),
                ("shuffle", ParamValue::from(false)),
            ])
            .unwrap_err();

        assert_eq!(err.param_name(), "bogus");
        assert_eq!(model.alpha, 0.7);
        assert!(model.shuffle, "pairs after the failure must not apply");
    }

    #[test]
    fn test_set_params_type_mismatch() {
        let mut model = Toy::new(None);
        let err = model
            .set_params([("alpha", ParamValue::from("fast"))])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parameter alpha expects float, got string"
        );
        assert_eq!(model.alpha, 0.1);
    }

    #[test]
    fn test_seed_surface() {
        let mut a = Toy::new(Some(42));
        let mut b = Toy::new(Some(42));
        assert_eq!(a.random_seed(), Some(42));
        for _ in 0..10 {
            assert_eq!(a.make_random_seed(), b.make_random_seed());
        }
    }

    #[test]
    fn test_empty_registry_gives_empty_params() {
        struct Bare {
            seed: SeedGenerator,
        }

        impl Model for Bare {
            fn param_descriptors() -> &'static [ParamDescriptor<Self>] {
                &[]
            }

            fn seed_generator(&self) -> &SeedGenerator {
                &self.seed
            }

            fn seed_generator_mut(&mut self) -> &mut SeedGenerator {
                &mut self.seed
            }
        }

        let model = Bare {
            seed: SeedGenerator::new(None),
        };
        assert!(model.get_params(true).is_empty());
        assert!(Bare::describe_params().is_empty());
    }

    #[test]
    fn test_describe_params_covers_all_declared() {
        let infos = Toy::describe_params();
        assert_eq!(infos.len(), 5);
        let fitted = infos.iter().find(|i| i.name == "loss_").unwrap();
        assert!(!fitted.param);
        let public = infos.iter().find(|i| i.name == "alpha").unwrap();
        assert!(public.param);
    }
}
