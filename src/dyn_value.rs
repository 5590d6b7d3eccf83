//! Shared dynamic value trait for externally typed parameters.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Trait for dynamically-typed values stored behind [`ParamValue::External`].
///
/// `deep_clone` is the clone capability that lets `get_params(deep)` detach
/// a value from the owning instance. The blanket impl delegates to the
/// value's own `Clone`, so any `Clone + Debug + Send + Sync` type qualifies.
/// Store the value itself, not a shared handle to it, or the detach will
/// only duplicate the handle.
///
/// [`ParamValue::External`]: crate::value::ParamValue::External
pub trait DynValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn deep_clone(&self) -> Arc<dyn DynValue>;
}

impl<T> DynValue for T
where
    T: Any + fmt::Debug + Clone + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn deep_clone(&self) -> Arc<dyn DynValue> {
        Arc::new(self.clone())
    }
}
