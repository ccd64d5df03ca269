use async_trait::async_trait;
use client::HeroService;
use heroes_core::Hero;

/// Something that can answer a settled search term.
///
/// Implementations must not fail: errors are expected to be absorbed into an
/// empty list before they reach the search pipeline.
#[async_trait]
pub trait HeroLookup: Send + Sync {
  async fn search_heroes(&self, term: &str) -> Vec<Hero>;
}

#[async_trait]
impl HeroLookup for HeroService {
  async fn search_heroes(&self, term: &str) -> Vec<Hero> {
    HeroService::search_heroes(self, term).await
  }
}
