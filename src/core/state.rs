use std::sync::Arc;

use crate::core::{config::Settings, redis::RedisHandle};
use crate::repositories::store::GradebookStore;

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    redis: RedisHandle,
    store: Arc<dyn GradebookStore>,
}

impl AppState {
    pub(crate) fn new(
        settings: Settings,
        redis: RedisHandle,
        store: Arc<dyn GradebookStore>,
    ) -> Self {
        Self { inner: Arc::new(InnerState { settings, redis, store }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn redis(&self) -> &RedisHandle {
        &self.inner.redis
    }

    pub(crate) fn store(&self) -> Arc<dyn GradebookStore> {
        self.inner.store.clone()
    }
}
