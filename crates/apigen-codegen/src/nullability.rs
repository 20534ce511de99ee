//! Lookup of functions and parameters that deal in null values.

use apigen_core::NullabilityConfig;

/// Answers whether a result may be null or a parameter accepts null.
pub trait Nullability {
    fn result_may_be_null(&self, function: &str) -> bool;

    /// `param` is the target-language parameter name.
    fn param_accepts_null(&self, function: &str, param: &str) -> bool;
}

impl Nullability for NullabilityConfig {
    fn result_may_be_null(&self, function: &str) -> bool {
        self.results.contains(function)
    }

    fn param_accepts_null(&self, function: &str, param: &str) -> bool {
        self.params
            .get(function)
            .is_some_and(|params| params.contains(param))
    }
}
