//! Confirmation adapter trait.
//!
//! Applying changes requires an explicit go-ahead per feature. This module
//! defines the `Confirm` trait that provides it, so interactive, automatic
//! and scripted confirmation can be swapped without touching the executor.

use crate::error::Result;
use crate::features::Feature;

/// The only answer that confirms an apply.
pub const CONFIRMATION_WORD: &str = "yes";

/// Checks whether a raw answer confirms an apply.
///
/// Surrounding whitespace is ignored; the comparison is case-sensitive, so
/// `Yes` and `y` do not confirm.
pub fn is_confirmation(answer: &str) -> bool {
    answer.trim() == CONFIRMATION_WORD
}

/// Confirmation adapter trait.
pub trait Confirm: Send + Sync {
    /// Asks whether the planned changes of `feature` should be applied.
    ///
    /// # Returns
    ///
    /// `true` to run apply, `false` to skip it.
    ///
    /// # Errors
    ///
    /// Returns `TfmsError::Io` if the answer cannot be obtained. Callers
    /// treat this as a refusal.
    fn confirm(&self, feature: &Feature) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_exact_yes_confirms() {
        assert!(is_confirmation("yes"));
        assert!(is_confirmation("yes\n"));
        assert!(is_confirmation("  yes  "));

        assert!(!is_confirmation("no"));
        assert!(!is_confirmation(""));
        assert!(!is_confirmation("Yes"));
        assert!(!is_confirmation("y"));
        assert!(!is_confirmation("yes please"));
    }
}
