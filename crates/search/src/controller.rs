//! Search-as-you-type controller
//!
//! Raw terms pushed with [`HeroSearch::submit`] flow through a per-subscriber
//! pipeline:
//!
//! 1. Debounce: a term settles once no newer term arrives within the window
//! 2. Distinct: a settled term equal to the previous settled term is dropped
//! 3. Switch: a newly settled term drops the query still in flight, so only
//!    the latest query can ever produce output
//!
//! Each call to [`HeroSearch::results`] starts an independent pipeline task
//! that lives until the returned [`SearchResults`] is dropped or cancelled.

use crate::HeroLookup;
use futures::Stream;
use heroes_core::Hero;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, trace, warn};

/// Default quiet window before a term is considered settled
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Raw terms buffered per subscriber before older ones are skipped
const TERM_BUFFER: usize = 64;
/// Result sets buffered before the pipeline waits on the consumer
const RESULT_BUFFER: usize = 16;

type Query = Pin<Box<dyn Future<Output = Vec<Hero>> + Send>>;

pub struct HeroSearch {
  terms: broadcast::Sender<String>,
  lookup: Arc<dyn HeroLookup>,
  debounce: Duration,
}

impl HeroSearch {
  pub fn new(lookup: Arc<dyn HeroLookup>) -> Self {
    let (terms, _) = broadcast::channel(TERM_BUFFER);
    Self {
      terms,
      lookup,
      debounce: DEFAULT_DEBOUNCE,
    }
  }

  pub fn with_debounce(mut self, debounce: Duration) -> Self {
    self.debounce = debounce;
    self
  }

  pub fn debounce(&self) -> Duration {
    self.debounce
  }

  /// Push the latest raw term, e.g. on every keystroke.
  ///
  /// Terms submitted while nobody is subscribed are discarded.
  pub fn submit(&self, term: impl Into<String>) {
    let term = term.into();
    trace!("Search term submitted: {:?}", term);
    if self.terms.send(term).is_err() {
      trace!("No search subscribers, term dropped");
    }
  }

  /// Subscribe to settled search results.
  ///
  /// Only terms submitted after this call are seen. Must be called from
  /// within a tokio runtime.
  pub fn results(&self) -> SearchResults {
    let terms = self.terms.subscribe();
    let (tx, rx) = mpsc::channel(RESULT_BUFFER);
    let task = tokio::spawn(run_pipeline(terms, self.lookup.clone(), self.debounce, tx));
    SearchResults { rx, task }
  }
}

/// Live stream of result sets, one per settled distinct term.
///
/// Dropping the handle (or calling [`SearchResults::cancel`]) stops the
/// pipeline and discards any query still in flight.
pub struct SearchResults {
  rx: mpsc::Receiver<Vec<Hero>>,
  task: JoinHandle<()>,
}

impl SearchResults {
  pub fn cancel(self) {
    drop(self);
  }
}

impl Stream for SearchResults {
  type Item = Vec<Hero>;

  fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
    self.rx.poll_recv(cx)
  }
}

impl Drop for SearchResults {
  fn drop(&mut self) {
    self.task.abort();
  }
}

/// Resolves with the in-flight query's result, or never when idle
async fn next_result(query: &mut Option<Query>) -> Vec<Hero> {
  match query {
    Some(query) => query.await,
    None => std::future::pending().await,
  }
}

async fn run_pipeline(
  mut terms: broadcast::Receiver<String>,
  lookup: Arc<dyn HeroLookup>,
  debounce: Duration,
  results: mpsc::Sender<Vec<Hero>>,
) {
  // Latest unsettled term and the instant it settles
  let mut pending: Option<(String, Instant)> = None;
  let mut last_settled: Option<String> = None;
  let mut in_flight: Option<Query> = None;
  let mut input_open = true;

  loop {
    if !input_open && pending.is_none() && in_flight.is_none() {
      debug!("Search input closed, pipeline finished");
      break;
    }

    let deadline = pending.as_ref().map(|(_, at)| *at);

    tokio::select! {
      received = terms.recv(), if input_open => match received {
        Ok(term) => pending = Some((term, Instant::now() + debounce)),
        Err(broadcast::error::RecvError::Lagged(skipped)) => {
          warn!("Search pipeline lagged, skipped {} terms", skipped);
        }
        Err(broadcast::error::RecvError::Closed) => {
          input_open = false;
          // No newer term can arrive, so the pending one settles now
          if let Some((_, at)) = pending.as_mut() {
            *at = Instant::now();
          }
        }
      },

      _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
        if let Some((term, _)) = pending.take() {
          if last_settled.as_deref() == Some(term.as_str()) {
            debug!("Settled term {:?} unchanged, no query", term);
          } else {
            if in_flight.is_some() {
              debug!("Term {:?} supersedes the query in flight", term);
            }
            debug!("Querying settled term {:?}", term);
            last_settled = Some(term.clone());
            let lookup = lookup.clone();
            in_flight = Some(Box::pin(async move { lookup.search_heroes(&term).await }));
          }
        }
      },

      heroes = next_result(&mut in_flight), if in_flight.is_some() => {
        in_flight = None;
        if results.send(heroes).await.is_err() {
          debug!("Search results receiver dropped");
          break;
        }
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use async_trait::async_trait;

  struct Echo;

  #[async_trait]
  impl HeroLookup for Echo {
    async fn search_heroes(&self, term: &str) -> Vec<Hero> {
      vec![Hero::new(1, term)]
    }
  }

  #[test]
  fn test_default_debounce() {
    let search = HeroSearch::new(Arc::new(Echo));
    assert_eq!(search.debounce(), Duration::from_millis(300));
  }

  #[test]
  fn test_submit_without_subscribers_is_harmless() {
    let search = HeroSearch::new(Arc::new(Echo));
    search.submit("nobody listening");
  }

  #[tokio::test(start_paused = true)]
  async fn test_idle_query_slot_never_resolves() {
    let mut idle: Option<Query> = None;
    let result = tokio::time::timeout(Duration::from_secs(1), next_result(&mut idle)).await;
    assert!(result.is_err());
  }

  #[tokio::test(start_paused = true)]
  async fn test_in_flight_query_resolves() {
    let mut query: Option<Query> = Some(Box::pin(async { vec![Hero::new(7, "Seven")] }));
    assert_eq!(next_result(&mut query).await, vec![Hero::new(7, "Seven")]);
  }
}
