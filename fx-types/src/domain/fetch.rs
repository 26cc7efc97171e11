//! Explicit state of a lazily fetched provider resource.

use crate::error::FetchError;

/// What we know about a resource that is fetched on first use.
///
/// Replaces a nullable cache field: callers can tell "never asked" apart
/// from "asked and the provider failed".
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    NotFetched,
    Failed(FetchError),
    Fetched(T),
}

impl<T> FetchState<T> {
    /// Returns the fetched value, if any.
    pub fn fetched(&self) -> Option<&T> {
        match self {
            FetchState::Fetched(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self, FetchState::Fetched(_))
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::NotFetched
    }
}

impl<T> From<Result<T, FetchError>> for FetchState<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => FetchState::Fetched(value),
            Err(err) => FetchState::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_not_fetched() {
        let state: FetchState<u8> = FetchState::default();
        assert_eq!(state, FetchState::NotFetched);
        assert!(state.fetched().is_none());
    }

    #[test]
    fn test_from_result() {
        let ok: FetchState<u8> = Ok(3).into();
        assert_eq!(ok.fetched(), Some(&3));

        let failed: FetchState<u8> = Err(FetchError::Status { status: 500 }).into();
        assert!(!failed.is_fetched());
        assert_eq!(failed, FetchState::Failed(FetchError::Status { status: 500 }));
    }
}
