//! Required-parameter checks.

use crate::core::Params;
use crate::effects::TransitionError;
use stillwater::validation::Validation;

fn present(key: &str, params: &Params) -> Validation<(), Vec<String>> {
    if params.contains_key(key) {
        Validation::Success(())
    } else {
        Validation::Failure(vec![key.to_string()])
    }
}

/// Keys of `required` absent from `params`, in declaration order.
pub fn missing_params(required: &[String], params: &Params) -> Vec<String> {
    let checks = required.iter().map(|key| present(key, params)).collect();
    match Validation::all_vec(checks) {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(missing) => missing,
    }
}

/// Fail with [`TransitionError::MissingParams`] unless every key is present.
pub fn check_required(required: &[String], params: &Params) -> Result<(), TransitionError> {
    let missing = missing_params(required, params);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(TransitionError::MissingParams { missing })
    }
}
