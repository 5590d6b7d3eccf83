//! Parameter name classification and the static descriptor registry.
//!
//! # Overview
//!
//! - [`is_param_name`]: the naming convention separating public parameters
//!   from private and fitted attributes.
//! - [`ParamDescriptor`]: one declared attribute of a model type, with
//!   getter and setter function pointers.
//! - [`ParamInfo`]: serializable schema row describing a declared attribute.
//!
//! A model type declares its attributes once, as a static ordered slice of
//! descriptors. The registry replaces runtime attribute reflection: what a
//! model exposes is exactly what it declares. Entries whose name fails
//! [`is_param_name`] (fitted attributes such as `coef_`, private ones such
//! as `_scratch`) stay visible to [`ParamInfo`] introspection but are
//! excluded from parameter access.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::value::ParamValue;

static PARAM_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^_](?:.*[^_])?$").expect("valid param name regex"));

/// Returns true if `name` denotes a public parameter.
///
/// A name qualifies iff it neither starts nor ends with an underscore. By
/// convention a trailing underscore marks a fitted attribute (populated by
/// training, e.g. `coef_`) and a leading underscore marks an internal one.
/// The empty string never qualifies.
///
/// ```
/// use modelbase::params::is_param_name;
///
/// assert!(is_param_name("alpha"));
/// assert!(is_param_name("max_iter"));
/// assert!(!is_param_name("_scratch"));
/// assert!(!is_param_name("coef_"));
/// ```
pub fn is_param_name(name: &str) -> bool {
    PARAM_NAME_RE.is_match(name)
}

/// One declared attribute of a model type.
///
/// Descriptors are plain data: a name, a human-readable description, and
/// getter/setter function pointers over the concrete model type. Concrete
/// types build a `static` slice of these once, at type-definition time.
#[derive(Debug)]
pub struct ParamDescriptor<M> {
    name: &'static str,
    description: &'static str,
    get: fn(&M) -> ParamValue,
    set: fn(&mut M, ParamValue) -> Result<()>,
}

impl<M> ParamDescriptor<M> {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        get: fn(&M) -> ParamValue,
        set: fn(&mut M, ParamValue) -> Result<()>,
    ) -> Self {
        Self {
            name,
            description,
            get,
            set,
        }
    }

    /// Returns the attribute name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the attribute description.
    #[inline]
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Reads the attribute from a model instance.
    pub fn get_from(&self, model: &M) -> ParamValue {
        (self.get)(model)
    }

    /// Writes the attribute on a model instance.
    pub fn set_on(&self, model: &mut M, value: ParamValue) -> Result<()> {
        (self.set)(model, value)
    }

    /// Returns the schema row for this descriptor.
    pub fn info(&self) -> ParamInfo {
        ParamInfo {
            name: self.name.to_string(),
            description: self.description.to_string(),
            param: is_param_name(self.name),
        }
    }
}

/// Serializable description of one declared attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamInfo {
    /// The attribute name.
    pub name: String,
    /// The human-readable description from the descriptor table.
    pub description: String,
    /// Whether the name qualifies as a public parameter.
    pub param: bool,
}

/// Resolves `name` against a descriptor table.
///
/// The name must pass [`is_param_name`] and be declared; otherwise the call
/// fails with [`ModelError::InvalidParamName`] carrying the rejected name
/// and, when a declared parameter looks similar, a "did you mean" hint.
pub fn find_descriptor<'a, M>(
    descriptors: &'a [ParamDescriptor<M>],
    name: &str,
) -> Result<&'a ParamDescriptor<M>> {
    if is_param_name(name) {
        if let Some(descriptor) = descriptors.iter().find(|d| d.name == name) {
            return Ok(descriptor);
        }
    }
    Err(ModelError::InvalidParamName {
        name: name.to_string(),
        hint: suggestion_hint(descriptors, name),
    })
}

fn suggestion_hint<M>(descriptors: &[ParamDescriptor<M>], name: &str) -> String {
    let similar: Vec<&str> = descriptors
        .iter()
        .map(|d| d.name)
        .filter(|key| is_param_name(key) && overlap(name, key) > 0.5)
        .collect();
    if similar.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: [{}])", similar.join(","))
    }
}

// Trigram overlap between a rejected name and a candidate key.
fn overlap(name: &str, key: &str) -> f32 {
    let name = name.as_bytes();
    let key = key.as_bytes();
    if name.len() < 3 || key.len() < 3 {
        return 0.0;
    }
    let mut matches = 0;
    let mut trials = 0;
    for window in name.windows(3) {
        trials += 1;
        if key.windows(3).any(|k| k == window) {
            matches += 1;
        }
    }
    if trials == 0 {
        0.0
    } else {
        matches as f32 / trials as f32
    }
}
