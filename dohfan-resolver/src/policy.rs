use crate::prelude::QueryError;

/// Every per-server failure of a single resolution, one entry per server,
/// in configuration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregateError {
    errors: Vec<QueryError>,
}

impl AggregateError {
    pub fn new(errors: Vec<QueryError>) -> Self {
        Self { errors }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[QueryError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<QueryError> {
        self.errors
    }
}

impl std::fmt::Display for AggregateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "resolution failed on {} server(s)", self.errors.len())
    }
}

/// What a resolution surfaces to the caller when every server failed, shaped
/// by the configured [`ErrorPolicy`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    Query(QueryError),
    Aggregate(AggregateError),
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query(inner) => inner.fmt(f),
            Self::Aggregate(inner) => inner.fmt(f),
        }
    }
}

/// Decides what part of an aggregated failure becomes visible to the caller.
/// Injected at construction time.
pub trait ErrorPolicy: Send + Sync {
    fn handle(&self, error: AggregateError) -> ResolveError;
}

/// Default policy: surface only the first underlying error and discard the
/// rest. Callers needing the full detail should configure [`CollectAll`]
/// or their own policy.
#[derive(Debug, Default)]
pub struct FirstError;

impl ErrorPolicy for FirstError {
    fn handle(&self, error: AggregateError) -> ResolveError {
        let mut errors = error.into_errors();
        if errors.is_empty() {
            // zero servers configured, there is no first error to pick
            ResolveError::Aggregate(AggregateError::default())
        } else {
            ResolveError::Query(errors.remove(0))
        }
    }
}

/// Surfaces the whole aggregate untouched.
#[derive(Debug, Default)]
pub struct CollectAll;

impl ErrorPolicy for CollectAll {
    fn handle(&self, error: AggregateError) -> ResolveError {
        ResolveError::Aggregate(error)
    }
}
