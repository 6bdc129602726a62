use serde::{Deserialize, Serialize};

/// Outcome of a call to the recommendation service.
///
/// Both arms carry a usable value; `Fallback` only records that the service
/// was not the source. Callers proceed the same way in either case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum Suggestion<T> {
    Suggested(T),
    Fallback(T),
}

impl<T> Suggestion<T> {
    pub fn value(&self) -> &T {
        match self {
            Suggestion::Suggested(v) | Suggestion::Fallback(v) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Suggestion::Suggested(v) | Suggestion::Fallback(v) => v,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Suggestion::Fallback(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Suggestion<U> {
        match self {
            Suggestion::Suggested(v) => Suggestion::Suggested(f(v)),
            Suggestion::Fallback(v) => Suggestion::Fallback(f(v)),
        }
    }
}
