//! Success-or-fallback result for calls whose failure degrades instead of erroring.

use serde::Serialize;

/// Either the collaborator's answer or a substitute value with the reason it was used.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome<T> {
    Succeeded(T),
    Fallback { value: T, reason: String },
}

impl<T> Outcome<T> {
    pub fn fallback(value: T, reason: impl Into<String>) -> Self {
        Outcome::Fallback {
            value,
            reason: reason.into(),
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Succeeded(value) | Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Succeeded(value) | Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            Outcome::Succeeded(_) => None,
            Outcome::Fallback { reason, .. } => Some(reason),
        }
    }
}
