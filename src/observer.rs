use serde::Serialize;

/// Outcome of one `App::load` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LoadStatus {
    Ready { key: String, items: usize },
    Failed { key: String, error: String },
}

impl LoadStatus {
    pub fn key(&self) -> &str {
        match self {
            LoadStatus::Ready { key, .. } | LoadStatus::Failed { key, .. } => key,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LoadStatus::Ready { .. })
    }
}

/// Receives the status of every load once the cache has been updated.
pub trait LoadObserver: Send + Sync {
    fn on_status(&self, status: &LoadStatus);
}

impl<F> LoadObserver for F
where
    F: Fn(&LoadStatus) + Send + Sync,
{
    fn on_status(&self, status: &LoadStatus) {
        self(status)
    }
}
