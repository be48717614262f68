use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::cache::DatasetCache;
use crate::config::ViewRequest;
use crate::data::{EnrichedDataset, Item};
use crate::domain::ViewKey;
use crate::error::LandscapeError;
use crate::join;
use crate::locator::ResourceLocator;
use crate::observer::{LoadObserver, LoadStatus};
use crate::source::BundleSource;

/// Loads views into the shared cache and answers lookups against it.
pub struct App<S: BundleSource> {
    locator: ResourceLocator,
    source: S,
    cache: Arc<DatasetCache>,
    observer: RwLock<Option<Arc<dyn LoadObserver>>>,
    publish: Mutex<()>,
}

impl<S: BundleSource> App<S> {
    pub fn new(locator: ResourceLocator, source: S, cache: Arc<DatasetCache>) -> Self {
        Self {
            locator,
            source,
            cache,
            observer: RwLock::new(None),
            publish: Mutex::new(()),
        }
    }

    pub fn locator(&self) -> &ResourceLocator {
        &self.locator
    }

    pub fn cache(&self) -> &Arc<DatasetCache> {
        &self.cache
    }

    /// Registers the observer notified after every load. Replaces the
    /// previously registered one.
    ///
    /// The observer runs while loads are serialized on the cache write, so it
    /// must not call `load` on the same `App`.
    pub fn subscribe(&self, observer: Arc<dyn LoadObserver>) {
        *self
            .observer
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(observer);
    }

    pub fn unsubscribe(&self) {
        *self
            .observer
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Fetches the `classify_by`/`key` view, joins it and stores it in the
    /// cache under `{classify_by}_{key}`.
    ///
    /// The observer is notified with the outcome either way. On failure the
    /// cached value for the view, if any, is left in place. Concurrent loads
    /// fetch in parallel; the cache write and the notification happen as one
    /// step, so observers see `Ready` in the order datasets were stored.
    #[instrument(skip(self, base_path, categories), fields(filtered = !categories.is_empty()))]
    pub fn load(
        &self,
        classify_by: &str,
        key: &str,
        base_path: &str,
        categories: &[String],
    ) -> Result<Arc<EnrichedDataset>, LandscapeError> {
        self.load_with_status(classify_by, key, base_path, categories).0
    }

    pub fn load_view(
        &self,
        request: &ViewRequest,
        base_path: &str,
    ) -> Result<Arc<EnrichedDataset>, LandscapeError> {
        self.load(
            request.view.classify_by(),
            request.view.key(),
            base_path,
            &request.categories,
        )
    }

    /// Loads each view in turn. A failing view does not stop the rest.
    pub fn load_all(&self, requests: &[ViewRequest], base_path: &str) -> Vec<LoadStatus> {
        requests
            .iter()
            .map(|request| {
                self.load_with_status(
                    request.view.classify_by(),
                    request.view.key(),
                    base_path,
                    &request.categories,
                )
                .1
            })
            .collect()
    }

    pub fn is_ready(&self, name: &str) -> bool {
        self.cache.has(name)
    }

    pub fn available_keys(&self) -> Vec<String> {
        self.cache.keys().into_iter().collect()
    }

    pub fn dataset(&self, name: &str) -> Option<Arc<EnrichedDataset>> {
        self.cache.get(name)
    }

    pub fn item_by_id(&self, classify_by: &str, key: &str, id: &str) -> Option<Item> {
        let view = ViewKey::new(classify_by, key).ok()?;
        self.cache.lookup_item(&view.cache_key(), id)
    }

    fn load_with_status(
        &self,
        classify_by: &str,
        key: &str,
        base_path: &str,
        categories: &[String],
    ) -> (Result<Arc<EnrichedDataset>, LandscapeError>, LoadStatus) {
        let name = format!("{}_{}", classify_by.trim(), key.trim());
        let joined = ViewKey::new(classify_by, key).and_then(|view| {
            self.fetch_and_join(&view, base_path, categories)
                .map(|dataset| (view, dataset))
        });

        let _publish = self.publish.lock().unwrap_or_else(PoisonError::into_inner);
        let result = joined.map(|(view, dataset)| {
            let dataset = self.cache.put(&view.cache_key(), dataset);
            info!(key = %name, items = dataset.items.len(), "view ready");
            dataset
        });

        let status = match &result {
            Ok(dataset) => LoadStatus::Ready {
                key: name,
                items: dataset.items.len(),
            },
            Err(err) => {
                warn!(key = %name, error = %err, "view load failed");
                LoadStatus::Failed {
                    key: name,
                    error: err.to_string(),
                }
            }
        };
        self.notify(&status);

        (result, status)
    }

    fn fetch_and_join(
        &self,
        view: &ViewKey,
        base_path: &str,
        categories: &[String],
    ) -> Result<EnrichedDataset, LandscapeError> {
        let url = self
            .locator
            .dataset_url(view.classify_by(), view.key(), base_path, categories);
        debug!(%url, "fetching dataset");

        let start = Instant::now();
        let bundle = self.source.fetch(&url)?;
        debug!(latency_ms = start.elapsed().as_millis() as u64, "dataset fetched");

        Ok(join::enrich(bundle, &self.locator))
    }

    fn notify(&self, status: &LoadStatus) {
        let observer = self
            .observer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(observer) = observer {
            observer.on_status(status);
        }
    }
}
