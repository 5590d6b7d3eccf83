//! Dynamically typed parameter values.
//!
//! [`ParamValue`] is the value type carried by model parameters. Structural
//! `Clone` is the shallow form: owned structure is duplicated but
//! [`ParamValue::External`] handles keep pointing at the same allocation.
//! [`ParamValue::deep_clone`] detaches everything, including externals, via
//! the [`DynValue`] clone capability.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, Serializer};

use crate::dyn_value::DynValue;
use crate::error::{ModelError, Result};

/// A dynamically typed value held by a model parameter.
#[derive(Clone)]
pub enum ParamValue {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<ParamValue>),
    Map(BTreeMap<String, ParamValue>),
    External(Arc<dyn DynValue>),
}

impl ParamValue {
    /// Wraps an arbitrary value into a ParamValue.
    ///
    /// Pass the value itself rather than an `Arc` around it, so that
    /// [`deep_clone`](Self::deep_clone) duplicates the data and not just a
    /// handle.
    pub fn external<T>(value: T) -> Self
    where
        T: DynValue,
    {
        ParamValue::External(Arc::new(value))
    }

    /// Returns a copy that shares nothing with `self`.
    ///
    /// Lists and maps are rebuilt recursively; external values are detached
    /// through [`DynValue::deep_clone`]. Plain `clone()` is the shallow
    /// counterpart: it duplicates owned structure but shares externals.
    pub fn deep_clone(&self) -> ParamValue {
        match self {
            ParamValue::List(items) => {
                ParamValue::List(items.iter().map(ParamValue::deep_clone).collect())
            }
            ParamValue::Map(entries) => ParamValue::Map(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.deep_clone()))
                    .collect(),
            ),
            ParamValue::External(value) => ParamValue::External(value.as_ref().deep_clone()),
            other => other.clone(),
        }
    }

    /// Returns a short label for the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::None => "none",
            ParamValue::Bool(_) => "bool",
            ParamValue::Int(_) => "int",
            ParamValue::Float(_) => "float",
            ParamValue::String(_) => "string",
            ParamValue::List(_) => "list",
            ParamValue::Map(_) => "map",
            ParamValue::External(_) => "external",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ParamValue::None)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a float; integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ParamValue]> {
        match self {
            ParamValue::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, ParamValue>> {
        match self {
            ParamValue::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the payload of an external value.
    ///
    /// The handle stays hidden so that `as_any` and `deep_clone` dispatch on
    /// the stored value rather than on the shared pointer around it.
    pub fn as_external(&self) -> Option<&dyn DynValue> {
        match self {
            ParamValue::External(v) => Some(v.as_ref()),
            _ => None,
        }
    }

    fn to_debug_string(&self) -> String {
        match self {
            ParamValue::None => "None".to_string(),
            ParamValue::Bool(v) => v.to_string(),
            ParamValue::Int(v) => v.to_string(),
            ParamValue::Float(v) => v.to_string(),
            ParamValue::String(v) => format!("\"{}\"", v),
            ParamValue::List(v) => {
                format!(
                    "{:?}",
                    v.iter().map(|x| x.to_debug_string()).collect::<Vec<_>>()
                )
            }
            ParamValue::Map(v) => {
                let items = v
                    .iter()
                    .map(|(k, val)| format!("{:?}: {}", k, val.to_debug_string()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{{}}}", items)
            }
            ParamValue::External(v) => format!("{:?}", v),
        }
    }
}

impl fmt::Debug for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_debug_string())
    }
}

impl Serialize for ParamValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ParamValue::None => serializer.serialize_unit(),
            ParamValue::Bool(v) => serializer.serialize_bool(*v),
            ParamValue::Int(v) => serializer.serialize_i64(*v),
            ParamValue::Float(v) => serializer.serialize_f64(*v),
            ParamValue::String(v) => serializer.serialize_str(v),
            ParamValue::List(v) => v.serialize(serializer),
            ParamValue::Map(v) => v.serialize(serializer),
            // Externals are opaque; render the debug form.
            ParamValue::External(v) => serializer.serialize_str(&format!("{:?}", v)),
        }
    }
}

macro_rules! impl_from {
    ($t:ty, $variant:ident) => {
        impl From<$t> for ParamValue {
            fn from(value: $t) -> Self {
                ParamValue::$variant(value)
            }
        }
    };
}

impl_from!(bool, Bool);
impl_from!(i64, Int);
impl_from!(f64, Float);
impl_from!(String, String);

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        ParamValue::Float(f64::from(value))
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl<T> From<Vec<T>> for ParamValue
where
    T: Into<ParamValue>,
{
    fn from(value: Vec<T>) -> Self {
        ParamValue::List(value.into_iter().map(|v| v.into()).collect())
    }
}

impl<T> From<Option<T>> for ParamValue
where
    T: Into<ParamValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => ParamValue::None,
        }
    }
}

/// Conversion from a [`ParamValue`] into a typed field, used by parameter
/// setters. `EXPECTED` labels the target type in mismatch errors.
pub trait FromParam: Sized {
    const EXPECTED: &'static str;

    fn from_param(value: ParamValue) -> Option<Self>;
}

impl FromParam for bool {
    const EXPECTED: &'static str = "bool";

    fn from_param(value: ParamValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromParam for i64 {
    const EXPECTED: &'static str = "int";

    fn from_param(value: ParamValue) -> Option<Self> {
        value.as_i64()
    }
}

impl FromParam for f64 {
    const EXPECTED: &'static str = "float";

    fn from_param(value: ParamValue) -> Option<Self> {
        value.as_f64()
    }
}

impl FromParam for f32 {
    const EXPECTED: &'static str = "float";

    fn from_param(value: ParamValue) -> Option<Self> {
        value.as_f64().map(|v| v as f32)
    }
}

impl FromParam for usize {
    const EXPECTED: &'static str = "non-negative int";

    fn from_param(value: ParamValue) -> Option<Self> {
        value.as_i64().and_then(|v| usize::try_from(v).ok())
    }
}

impl FromParam for String {
    const EXPECTED: &'static str = "string";

    fn from_param(value: ParamValue) -> Option<Self> {
        match value {
            ParamValue::String(v) => Some(v),
            _ => None,
        }
    }
}

impl FromParam for ParamValue {
    const EXPECTED: &'static str = "value";

    fn from_param(value: ParamValue) -> Option<Self> {
        Some(value)
    }
}

/// Assigns `value` into `field`, reporting a typed mismatch on failure.
///
/// This is the standard setter body for descriptor tables:
///
/// ```
/// use modelbase::value::{assign, ParamValue};
///
/// let mut alpha = 1.0_f64;
/// assign("alpha", &mut alpha, ParamValue::from(0.5)).unwrap();
/// assert_eq!(alpha, 0.5);
///
/// let err = assign("alpha", &mut alpha, ParamValue::from("x")).unwrap_err();
/// assert_eq!(err.to_string(), "Parameter alpha expects float, got string");
/// ```
pub fn assign<T>(name: &str, field: &mut T, value: ParamValue) -> Result<()>
where
    T: FromParam,
{
    let actual = value.type_name();
    match T::from_param(value) {
        Some(converted) => {
            *field = converted;
            Ok(())
        }
        None => Err(ModelError::ParamTypeMismatch {
            name: name.to_string(),
            expected: T::EXPECTED,
            actual,
        }),
    }
}
