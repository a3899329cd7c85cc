//! Scripted confirmation adapter for testing.

use crate::error::Result;
use crate::features::Feature;
use crate::tools::confirm::{Confirm, is_confirmation};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Confirmation adapter that replays pre-recorded answers.
///
/// Answers are raw input lines and go through the same check as the
/// interactive prompt. Once the script runs out every further question gets
/// an empty answer.
///
/// # Examples
///
/// ```
/// use tfms_core::Feature;
/// use tfms_core::tools::confirm::Confirm;
/// use tfms_core::tools::confirm_mock::ScriptedConfirmer;
///
/// let confirm = ScriptedConfirmer::new(["yes", "no"]);
/// let feature = Feature::default();
///
/// assert!(confirm.confirm(&feature).unwrap());
/// assert!(!confirm.confirm(&feature).unwrap());
/// assert!(!confirm.confirm(&feature).unwrap());
/// assert_eq!(confirm.asked().len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedConfirmer {
    /// Remaining answers
    answers: Arc<Mutex<VecDeque<String>>>,
    /// Names of the features asked about, in order
    asked: Arc<Mutex<Vec<String>>>,
}

impl ScriptedConfirmer {
    /// Creates a confirmer replaying `answers` in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Arc::new(Mutex::new(answers.into_iter().map(Into::into).collect())),
            asked: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns the names of the features asked about.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl Confirm for ScriptedConfirmer {
    fn confirm(&self, feature: &Feature) -> Result<bool> {
        self.asked.lock().unwrap().push(feature.name.clone());
        let answer = self.answers.lock().unwrap().pop_front().unwrap_or_default();
        Ok(is_confirmation(&answer))
    }
}
