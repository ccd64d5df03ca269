//! Hero resource client.
//!
//! Every public operation absorbs transport failures: the failure is reported
//! once as a tracing diagnostic and once as a `MessageLog` entry, and the
//! caller receives a fallback value (empty list or `None`) instead of an error.

use crate::{MessageLog, Transport, TransportError};
use heroes_core::{Hero, HeroId, NewHero, dedup_by_id};
use serde_json::Value;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, warn};

const SERVICE_NAME: &str = "HeroService";
const DEFAULT_HEROES_PATH: &str = "api/heroes";

#[derive(Clone)]
pub struct HeroService {
  transport: Arc<dyn Transport>,
  messages: MessageLog,
  heroes_path: String,
}

impl HeroService {
  pub fn new(transport: Arc<dyn Transport>, messages: MessageLog) -> Self {
    Self {
      transport,
      messages,
      heroes_path: DEFAULT_HEROES_PATH.to_string(),
    }
  }

  /// Override the collection path (default `api/heroes`)
  pub fn with_heroes_path(mut self, path: impl Into<String>) -> Self {
    self.heroes_path = path.into().trim_matches('/').to_string();
    self
  }

  pub fn messages(&self) -> &MessageLog {
    &self.messages
  }

  pub fn transport_name(&self) -> &str {
    self.transport.name()
  }

  fn hero_path(&self, id: HeroId) -> String {
    format!("{}/{}", self.heroes_path, id)
  }

  fn log(&self, message: impl Display) {
    self.messages.add(format!("{SERVICE_NAME}: {message}"));
  }

  /// Resolve `request`, replacing any failure with `fallback`
  async fn contain<T, F>(&self, operation: &str, fallback: T, request: F) -> T
  where
    F: Future<Output = Result<T, TransportError>>,
  {
    match request.await {
      Ok(value) => value,
      Err(e) => {
        error!(
          operation = %operation,
          not_found = e.is_not_found(),
          "{} request failed: {}",
          SERVICE_NAME,
          e
        );
        self.log(format_args!("{operation} failed: {e}"));
        fallback
      }
    }
  }

  /// Decode a list response, keeping the first hero for each id
  fn decode_heroes(&self, value: Value) -> Result<Vec<Hero>, TransportError> {
    let mut heroes: Vec<Hero> = serde_json::from_value(value)?;
    let dropped = dedup_by_id(&mut heroes);
    if !dropped.is_empty() {
      warn!("Dropped duplicate hero ids from response: {:?}", dropped);
    }
    Ok(heroes)
  }

  // ==========================================================================
  // Reads
  // ==========================================================================

  /// Fetch every hero. Empty on failure.
  pub async fn get_heroes(&self) -> Vec<Hero> {
    self.contain("getHeroes", Vec::new(), self.request_heroes()).await
  }

  async fn request_heroes(&self) -> Result<Vec<Hero>, TransportError> {
    let value = self.transport.get(&self.heroes_path, &[]).await?;
    let heroes = self.decode_heroes(value)?;
    self.log("fetched heroes");
    Ok(heroes)
  }

  /// Fetch a hero by id. `None` when missing or on any other failure.
  pub async fn get_hero(&self, id: HeroId) -> Option<Hero> {
    let operation = format!("getHero id={id}");
    self.contain(&operation, None, self.request_hero(id)).await
  }

  async fn request_hero(&self, id: HeroId) -> Result<Option<Hero>, TransportError> {
    let value = self.transport.get(&self.hero_path(id), &[]).await?;
    let hero: Hero = serde_json::from_value(value)?;
    self.log(format_args!("fetched hero id={id}"));
    Ok(Some(hero))
  }

  /// Look a hero up through the collection endpoint.
  ///
  /// Unlike `get_hero`, an unknown id is an ordinary empty answer rather than
  /// a 404, so it is reported as "did not find" instead of a failure.
  pub async fn get_hero_no_404(&self, id: HeroId) -> Option<Hero> {
    let operation = format!("getHero id={id}");
    self.contain(&operation, None, self.request_hero_by_query(id)).await
  }

  async fn request_hero_by_query(&self, id: HeroId) -> Result<Option<Hero>, TransportError> {
    let value = self
      .transport
      .get(&self.heroes_path, &[("id", id.to_string())])
      .await?;
    let hero = self.decode_heroes(value)?.into_iter().next();
    match hero {
      Some(_) => self.log(format_args!("fetched hero id={id}")),
      None => self.log(format_args!("did not find hero id={id}")),
    }
    Ok(hero)
  }

  /// Heroes whose name matches `term`.
  ///
  /// A blank term answers an empty list without touching the transport.
  pub async fn search_heroes(&self, term: &str) -> Vec<Hero> {
    if term.trim().is_empty() {
      debug!("Blank search term, skipping request");
      return Vec::new();
    }
    self.contain("searchHeroes", Vec::new(), self.request_search(term)).await
  }

  async fn request_search(&self, term: &str) -> Result<Vec<Hero>, TransportError> {
    let value = self
      .transport
      .get(&self.heroes_path, &[("name", term.to_string())])
      .await?;
    let heroes = self.decode_heroes(value)?;
    if heroes.is_empty() {
      self.log(format_args!("no heroes matching \"{term}\""));
    } else {
      self.log(format_args!("found heroes matching \"{term}\""));
    }
    Ok(heroes)
  }

  // ==========================================================================
  // Mutations
  // ==========================================================================

  /// Create a hero, returning the stored record with its assigned id
  pub async fn add_hero(&self, hero: NewHero) -> Option<Hero> {
    self.contain("addHero", None, self.request_add(hero)).await
  }

  async fn request_add(&self, hero: NewHero) -> Result<Option<Hero>, TransportError> {
    let body = serde_json::to_value(&hero)?;
    let value = self.transport.post(&self.heroes_path, body).await?;
    let created: Hero = serde_json::from_value(value)?;
    self.log(format_args!("added hero w/ id={}", created.id));
    Ok(Some(created))
  }

  /// Replace a stored hero. `Some(())` once the server has accepted it.
  pub async fn update_hero(&self, hero: &Hero) -> Option<()> {
    self.contain("updateHero", None, self.request_update(hero)).await
  }

  async fn request_update(&self, hero: &Hero) -> Result<Option<()>, TransportError> {
    let body = serde_json::to_value(hero)?;
    self.transport.put(&self.heroes_path, body).await?;
    self.log(format_args!("updated hero id={}", hero.id));
    Ok(Some(()))
  }

  /// Remove a hero by id. `Some(())` once the server has accepted it.
  pub async fn delete_hero(&self, id: HeroId) -> Option<()> {
    self.contain("deleteHero", None, self.request_delete(id)).await
  }

  async fn request_delete(&self, id: HeroId) -> Result<Option<()>, TransportError> {
    self.transport.delete(&self.hero_path(id)).await?;
    self.log(format_args!("deleted hero id={id}"));
    Ok(Some(()))
  }
}
