//! # Listing Orchestrator
//!
//! Owns the catalog on display and runs every user-triggered cycle against
//! it:
//! 1. Load all: full catalog plus guest recommendations (initial page load)
//! 2. Search: joined lookups, combined; "nothing engaged" falls back to load all
//! 3. Filter: criteria over the catalog currently on display
//!
//! ## Cycle Generations
//!
//! Every cycle takes the next generation number from a `watch` channel.
//! Starting a cycle bumps the number, which cancels any cycle still in
//! flight: its engine future is dropped inside `tokio::select!` and it
//! reports `Superseded`. A cycle commits only while its generation is still
//! the latest, so a stale completion never overwrites a newer one.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, instrument, warn};

use catalog::{CatalogIndex, Item};
use engine::{
    EngineConfig, EngineError, FilterEngine, FilterRequest, Notice, RecommendationAugmenter,
    Recommendations, SearchEngine, SearchQuery, SearchResult,
};
use sources::{InMemorySource, Session, Sources};

/// What the consumer currently sees
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub items: Vec<Item>,
    pub recommended: Vec<Item>,
    pub recommended_count: usize,
    /// Generation of the cycle that produced this snapshot
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// The visible catalog was replaced
    Committed { items: usize },
    /// Nothing was engaged; the visible catalog stays as it was
    Unchanged,
    /// A newer cycle started before this one finished
    Superseded,
    /// A collaborator failed; the visible catalog stays as it was
    Failed { reason: String },
}

/// Result of one cycle, for the caller to present
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub generation: u64,
    pub outcome: CycleOutcome,
    pub notices: Vec<Notice>,
}

impl CycleReport {
    fn new(generation: u64, outcome: CycleOutcome, notices: Vec<Notice>) -> Self {
        Self {
            generation,
            outcome,
            notices,
        }
    }

    fn superseded(generation: u64) -> Self {
        Self::new(generation, CycleOutcome::Superseded, Vec::new())
    }

    fn failed(generation: u64, err: &EngineError, mut notices: Vec<Notice>) -> Self {
        notices.push(Notice::error(err.to_string()));
        Self::new(
            generation,
            CycleOutcome::Failed {
                reason: err.to_string(),
            },
            notices,
        )
    }
}

/// Coordinates the engines over one shared visible catalog
#[derive(Clone)]
pub struct ListingService {
    sources: Sources,
    search_engine: Arc<SearchEngine>,
    filter_engine: Arc<FilterEngine>,
    augmenter: Arc<RecommendationAugmenter>,
    state: Arc<RwLock<CatalogSnapshot>>,
    generation: Arc<watch::Sender<u64>>,
}

impl ListingService {
    /// Create a service over the given collaborators
    ///
    /// # Arguments
    /// * `sources` - Collaborators shared by all engines
    /// * `config` - Per-item lookup limits for the filter engine
    pub fn new(sources: Sources, config: EngineConfig) -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            search_engine: Arc::new(SearchEngine::new(sources.clone())),
            filter_engine: Arc::new(FilterEngine::new(sources.clone()).with_config(config)),
            augmenter: Arc::new(RecommendationAugmenter::new(sources.clone())),
            sources,
            state: Arc::new(RwLock::new(CatalogSnapshot::default())),
            generation: Arc::new(generation),
        }
    }

    /// Build a service over the JSON fixtures in `data_dir`
    pub fn from_dir(data_dir: &Path, latency: Duration, config: EngineConfig) -> Result<Self> {
        let index = CatalogIndex::load_from_dir(data_dir)
            .with_context(|| format!("Failed to load catalog from {}", data_dir.display()))?;
        let source = InMemorySource::new(Arc::new(index)).with_latency(latency);
        Ok(Self::new(Sources::from_shared(Arc::new(source)), config))
    }

    /// Copy of the catalog on display
    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.state.read().await.clone()
    }

    /// Initial page load: full catalog, plus recommendations for guests
    #[instrument(skip(self, session), fields(guest = session.is_guest()))]
    pub async fn load_all(&self, session: &Session) -> CycleReport {
        let (generation, mut cancelled) = self.begin();
        let start = Instant::now();

        let Some(loaded) = self
            .until_superseded(generation, &mut cancelled, self.load(session))
            .await
        else {
            return CycleReport::superseded(generation);
        };

        let report = match loaded {
            Ok((items, recommendations)) => {
                self.commit_load(generation, items, recommendations, Vec::new())
                    .await
            }
            Err(err) => {
                warn!("load cycle {} failed: {}", generation, err);
                CycleReport::failed(generation, &err, Vec::new())
            }
        };
        info!("load cycle {} finished in {:?}", generation, start.elapsed());
        report
    }

    /// Search cycle. When no criterion matched anything the full load runs
    /// instead, within the same generation.
    #[instrument(skip(self, session))]
    pub async fn search(&self, query: &SearchQuery, session: &Session) -> CycleReport {
        let (generation, mut cancelled) = self.begin();
        let start = Instant::now();

        let Some(searched) = self
            .until_superseded(generation, &mut cancelled, self.search_engine.search(query))
            .await
        else {
            return CycleReport::superseded(generation);
        };

        let report = match searched {
            Err(err) => {
                warn!("search cycle {} failed: {}", generation, err);
                CycleReport::failed(generation, &err, Vec::new())
            }
            Ok(outcome) => match outcome.result {
                SearchResult::Items(items) => {
                    self.commit_items(generation, items, outcome.notices).await
                }
                SearchResult::ShowAll => {
                    debug!("search engaged nothing, reloading the full catalog");
                    match self
                        .until_superseded(generation, &mut cancelled, self.load(session))
                        .await
                    {
                        None => CycleReport::superseded(generation),
                        Some(Ok((items, recommendations))) => {
                            self.commit_load(generation, items, recommendations, outcome.notices)
                                .await
                        }
                        Some(Err(err)) => CycleReport::failed(generation, &err, outcome.notices),
                    }
                }
            },
        };
        info!("search cycle {} finished in {:?}", generation, start.elapsed());
        report
    }

    /// Filter cycle over the catalog currently on display
    #[instrument(skip(self))]
    pub async fn filter(&self, request: &FilterRequest) -> CycleReport {
        let (generation, mut cancelled) = self.begin();
        let start = Instant::now();
        let universe = self.state.read().await.items.clone();

        let filtering = self.filter_engine.filter(request, &universe);
        let Some(outcome) = self
            .until_superseded(generation, &mut cancelled, filtering)
            .await
        else {
            return CycleReport::superseded(generation);
        };

        let report = match outcome.result {
            Some(items) => self.commit_items(generation, items, outcome.notices).await,
            None => CycleReport::new(generation, CycleOutcome::Unchanged, outcome.notices),
        };
        info!("filter cycle {} finished in {:?}", generation, start.elapsed());
        report
    }

    pub fn sources(&self) -> &Sources {
        &self.sources
    }

    // ------------------------------------------------------------------------
    // Cycle plumbing
    // ------------------------------------------------------------------------

    /// Take the next generation; any older cycle in flight is now stale
    fn begin(&self) -> (u64, watch::Receiver<u64>) {
        let mut generation = 0;
        self.generation.send_modify(|current| {
            *current += 1;
            generation = *current;
        });
        debug!("cycle {} started", generation);
        (generation, self.generation.subscribe())
    }

    /// Drive `work` unless a newer cycle starts first, in which case `work`
    /// is dropped and `None` is returned.
    async fn until_superseded<T>(
        &self,
        generation: u64,
        cancelled: &mut watch::Receiver<u64>,
        work: impl Future<Output = T>,
    ) -> Option<T> {
        tokio::select! {
            biased;
            _ = cancelled.wait_for(|current| *current != generation) => {
                info!("cycle {} superseded", generation);
                None
            }
            done = work => Some(done),
        }
    }

    /// Full catalog and recommendations, fetched concurrently
    async fn load(
        &self,
        session: &Session,
    ) -> std::result::Result<(Vec<Item>, Option<Recommendations>), EngineError> {
        let (items, recommendations) = tokio::join!(
            self.sources.catalog.fetch_all(),
            self.augmenter.augment(session)
        );
        let items = items.map_err(EngineError::Catalog)?;
        Ok((items, recommendations))
    }

    async fn commit_items(
        &self,
        generation: u64,
        items: Vec<Item>,
        notices: Vec<Notice>,
    ) -> CycleReport {
        let mut state = self.state.write().await;
        if !self.is_current(generation) {
            return CycleReport::superseded(generation);
        }

        let count = items.len();
        state.items = items;
        state.generation = generation;
        CycleReport::new(generation, CycleOutcome::Committed { items: count }, notices)
    }

    async fn commit_load(
        &self,
        generation: u64,
        items: Vec<Item>,
        recommendations: Option<Recommendations>,
        notices: Vec<Notice>,
    ) -> CycleReport {
        let mut state = self.state.write().await;
        if !self.is_current(generation) {
            return CycleReport::superseded(generation);
        }

        let count = items.len();
        let Recommendations { items: recommended, count: recommended_count } =
            recommendations.unwrap_or_default();
        state.items = items;
        state.recommended = recommended;
        state.recommended_count = recommended_count;
        state.generation = generation;
        CycleReport::new(generation, CycleOutcome::Committed { items: count }, notices)
    }

    fn is_current(&self, generation: u64) -> bool {
        *self.generation.borrow() == generation
    }
}
