// In-process emulation of the heroes endpoint
//
// Serves the same wire contract as the HTTP server so the service can run
// without one:
// - GET collection (optionally filtered by `name` substring or exact `id`)
// - GET/DELETE by id, 404 when missing
// - POST assigns max(id)+1 (or 11 on an empty table) when no id is given
// - PUT replaces an existing hero, 404 when missing

use crate::{Transport, TransportError};
use async_trait::async_trait;
use heroes_core::{Hero, HeroId, NewHero};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

const DEFAULT_COLLECTION: &str = "api/heroes";
/// Id handed out when the table is empty
const FIRST_ID: HeroId = 11;

/// The sample heroes the memory backend starts with
pub fn seed_heroes() -> Vec<Hero> {
  vec![
    Hero::new(12, "Dr. Nice"),
    Hero::new(13, "Bombasto"),
    Hero::new(14, "Celeritas"),
    Hero::new(15, "Magneta"),
    Hero::new(16, "RubberMan"),
    Hero::new(17, "Dynama"),
    Hero::new(18, "Dr. IQ"),
    Hero::new(19, "Magma"),
    Hero::new(20, "Tornado"),
  ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
  Collection,
  Item(HeroId),
}

#[derive(Debug)]
pub struct MemoryTransport {
  collection: String,
  heroes: Mutex<Vec<Hero>>,
  latency: Duration,
}

impl Default for MemoryTransport {
  fn default() -> Self {
    Self::new()
  }
}

impl MemoryTransport {
  /// Create a backend seeded with the sample heroes
  pub fn new() -> Self {
    Self::with_heroes(seed_heroes())
  }

  pub fn empty() -> Self {
    Self::with_heroes(Vec::new())
  }

  pub fn with_heroes(heroes: Vec<Hero>) -> Self {
    Self {
      collection: DEFAULT_COLLECTION.to_string(),
      heroes: Mutex::new(heroes),
      latency: Duration::ZERO,
    }
  }

  pub fn with_collection(mut self, path: impl Into<String>) -> Self {
    self.collection = path.into().trim_matches('/').to_string();
    self
  }

  /// Delay every response by `latency`
  pub fn with_latency(mut self, latency: Duration) -> Self {
    self.latency = latency;
    self
  }

  /// Current table contents
  pub async fn snapshot(&self) -> Vec<Hero> {
    self.heroes.lock().await.clone()
  }

  fn route(&self, path: &str) -> Result<Route, TransportError> {
    let path = path.trim_matches('/');
    if path == self.collection {
      return Ok(Route::Collection);
    }

    path
      .strip_prefix(self.collection.as_str())
      .and_then(|rest| rest.strip_prefix('/'))
      .and_then(|id| id.parse::<HeroId>().ok())
      .map(Route::Item)
      .ok_or_else(|| TransportError::status(path, StatusCode::NOT_FOUND))
  }

  async fn simulate_latency(&self) {
    if !self.latency.is_zero() {
      tokio::time::sleep(self.latency).await;
    }
  }
}

/// Next free id, or `None` once the largest stored id is `HeroId::MAX`
fn gen_id(heroes: &[Hero]) -> Option<HeroId> {
  match heroes.iter().map(|h| h.id).max() {
    Some(max) => max.checked_add(1),
    None => Some(FIRST_ID),
  }
}

fn matches_query(hero: &Hero, query: &[(&str, String)]) -> bool {
  query.iter().all(|(key, value)| match *key {
    "name" => hero.name.to_lowercase().contains(&value.to_lowercase()),
    "id" => value.parse::<HeroId>().is_ok_and(|id| id == hero.id),
    _ => true,
  })
}

fn bad_request(path: &str) -> TransportError {
  TransportError::status(path, StatusCode::BAD_REQUEST)
}

#[async_trait]
impl Transport for MemoryTransport {
  fn name(&self) -> &str {
    "memory"
  }

  async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, TransportError> {
    self.simulate_latency().await;
    let route = self.route(path)?;
    let heroes = self.heroes.lock().await;

    match route {
      Route::Collection => {
        let found: Vec<&Hero> = heroes.iter().filter(|h| matches_query(h, query)).collect();
        debug!("memory GET {} {:?} -> {} heroes", path, query, found.len());
        Ok(serde_json::to_value(found)?)
      }
      Route::Item(id) => match heroes.iter().find(|h| h.id == id) {
        Some(hero) => Ok(serde_json::to_value(hero)?),
        None => Err(TransportError::status(path, StatusCode::NOT_FOUND)),
      },
    }
  }

  async fn post(&self, path: &str, body: Value) -> Result<Value, TransportError> {
    self.simulate_latency().await;
    if self.route(path)? != Route::Collection {
      return Err(TransportError::status(path, StatusCode::METHOD_NOT_ALLOWED));
    }
    let new_hero: NewHero = serde_json::from_value(body).map_err(|_| bad_request(path))?;

    let mut heroes = self.heroes.lock().await;
    let id = match new_hero.id {
      Some(id) => id,
      None => gen_id(&heroes).ok_or_else(|| TransportError::status(path, StatusCode::CONFLICT))?,
    };
    let hero = Hero::new(id, new_hero.name);

    match heroes.iter_mut().find(|h| h.id == id) {
      Some(existing) => *existing = hero.clone(),
      None => heroes.push(hero.clone()),
    }
    debug!("memory POST {} -> id={}", path, id);
    Ok(serde_json::to_value(hero)?)
  }

  async fn put(&self, path: &str, body: Value) -> Result<Value, TransportError> {
    self.simulate_latency().await;
    if self.route(path)? != Route::Collection {
      return Err(TransportError::status(path, StatusCode::METHOD_NOT_ALLOWED));
    }
    let hero: Hero = serde_json::from_value(body).map_err(|_| bad_request(path))?;

    let mut heroes = self.heroes.lock().await;
    match heroes.iter_mut().find(|h| h.id == hero.id) {
      Some(existing) => {
        *existing = hero;
        Ok(Value::Null)
      }
      None => Err(TransportError::status(
        format!("{}/{}", self.collection, hero.id),
        StatusCode::NOT_FOUND,
      )),
    }
  }

  async fn delete(&self, path: &str) -> Result<Value, TransportError> {
    self.simulate_latency().await;
    let Route::Item(id) = self.route(path)? else {
      return Err(TransportError::status(path, StatusCode::METHOD_NOT_ALLOWED));
    };

    let mut heroes = self.heroes.lock().await;
    let before = heroes.len();
    heroes.retain(|h| h.id != id);
    if heroes.len() == before {
      return Err(TransportError::status(path, StatusCode::NOT_FOUND));
    }
    Ok(Value::Null)
  }
}
