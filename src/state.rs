use std::{ops::Deref, sync::Arc};

use crate::{
    error::{ApiError, ErrorVerbosity, ErrorVerbosityProvider},
    store::StoreError,
};

/// Shared handler state over one of the book stores.
pub struct ApiState<S> {
    inner: Arc<ApiStateInner<S>>,
}

impl<S> ApiState<S> {
    pub fn new(error_verbosity: ErrorVerbosity, store: S) -> Self {
        Self {
            inner: Arc::new(ApiStateInner {
                error_verbosity,
                store,
            }),
        }
    }

    /// Converts a store failure into an [`ApiError`] with this state's verbosity.
    pub fn store_error(&self, err: StoreError) -> ApiError {
        ApiError::from_store_error(self.error_verbosity, err)
    }
}

impl<S> Clone for ApiState<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> Deref for ApiState<S> {
    type Target = ApiStateInner<S>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct ApiStateInner<S> {
    error_verbosity: ErrorVerbosity,
    pub store: S,
}

impl<S> ErrorVerbosityProvider for ApiState<S> {
    fn error_verbosity(&self) -> ErrorVerbosity {
        self.error_verbosity
    }
}
