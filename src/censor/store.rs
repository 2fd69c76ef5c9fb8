use std::sync::Arc;

use arc_swap::ArcSwap;
use log::{info, warn};

use super::{
    config::{FilterConfig, FilterConfigError},
    matcher::CompiledMatcher,
    pattern,
};

/// A configuration version together with the matcher compiled from it.
#[derive(Debug, Clone)]
pub struct FilterSnapshot {
    config: FilterConfig,
    matcher: CompiledMatcher,
}

impl FilterSnapshot {
    pub fn compile(config: FilterConfig) -> Result<Self, FilterConfigError> {
        let matcher = pattern::build(&config.terms())?;
        Ok(Self { config, matcher })
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn matcher(&self) -> &CompiledMatcher {
        &self.matcher
    }
}

/// Read-only access to the filter configuration in effect.
pub trait FilterConfigProvider: Send + Sync {
    fn snapshot(&self) -> Arc<FilterSnapshot>;
}

pub type SharedFilterConfigProvider = Arc<dyn FilterConfigProvider>;

/// Holds the active snapshot. Readers never block; a reload replaces the
/// whole snapshot at once.
#[derive(Debug)]
pub struct FilterStore {
    current: ArcSwap<FilterSnapshot>,
}

impl FilterStore {
    pub fn new(config: FilterConfig) -> Result<Self, FilterConfigError> {
        let snapshot = FilterSnapshot::compile(config)?;
        info!(
            "block-list filter ready with {} terms",
            snapshot.matcher().term_count()
        );
        Ok(Self {
            current: ArcSwap::from_pointee(snapshot),
        })
    }

    /// Compiles `config` and swaps it in. On failure the active snapshot is
    /// left untouched.
    pub fn reload(&self, config: FilterConfig) -> Result<(), FilterConfigError> {
        match FilterSnapshot::compile(config) {
            Ok(snapshot) => {
                info!(
                    "reloading block-list filter with {} terms",
                    snapshot.matcher().term_count()
                );
                self.current.store(Arc::new(snapshot));
                Ok(())
            }
            Err(e) => {
                warn!("keeping previous block-list filter: {}", e);
                Err(e)
            }
        }
    }
}

impl FilterConfigProvider for FilterStore {
    fn snapshot(&self) -> Arc<FilterSnapshot> {
        self.current.load_full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::censor::config::FilterConfigBuilder;

    fn config(bad_words: &str) -> FilterConfig {
        FilterConfigBuilder::default()
            .bad_words(bad_words)
            .build()
            .unwrap()
    }

    #[fixture]
    fn store() -> FilterStore {
        FilterStore::new(config("abc")).unwrap()
    }

    #[rstest]
    fn it_must_serve_the_initial_snapshot(store: FilterStore) {
        let snapshot = store.snapshot();
        assert_eq!(snapshot.config().bad_words, "abc");
        assert!(snapshot.matcher().is_match("abc"));
    }

    #[rstest]
    fn it_must_swap_in_a_new_snapshot(store: FilterStore) {
        store.reload(config("xyz")).unwrap();
        let snapshot = store.snapshot();
        assert!(!snapshot.matcher().is_match("abc"));
        assert!(snapshot.matcher().is_match("xyz"));
    }

    #[rstest]
    fn it_must_keep_the_previous_snapshot_on_failure(store: FilterStore) {
        let huge = (0..2_000)
            .map(|i| format!("{}{}", i, "y".repeat(1000)))
            .collect::<Vec<_>>()
            .join(",");
        assert!(store.reload(config(&huge)).is_err());
        let snapshot = store.snapshot();
        assert_eq!(snapshot.config().bad_words, "abc");
        assert!(snapshot.matcher().is_match("abc"));
    }

    #[rstest]
    fn it_must_not_disturb_snapshots_already_handed_out(store: FilterStore) {
        let in_flight = store.snapshot();
        store.reload(config("xyz")).unwrap();
        assert!(in_flight.matcher().is_match("abc"));
        assert!(!in_flight.matcher().is_match("xyz"));
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn it_must_serve_readers_during_reloads(store: FilterStore) {
        let store = Arc::new(store);
        let readers = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    for _ in 0..1000 {
                        let snapshot = store.snapshot();
                        let words = snapshot.config().bad_words.clone();
                        assert!(snapshot.matcher().is_match(&words));
                    }
                })
            })
            .collect::<Vec<_>>();
        for i in 0..100 {
            store.reload(config(&format!("w{}", i))).unwrap();
        }
        for r in readers {
            r.await.unwrap();
        }
    }
}
