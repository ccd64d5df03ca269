use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub type HeroId = i64;

/// A hero record as exchanged with the heroes endpoint.
///
/// Identity is the `id`; two heroes are the same entity iff their ids match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hero {
  pub id: HeroId,
  pub name: String,
}

impl Hero {
  pub fn new(id: HeroId, name: impl Into<String>) -> Self {
    Self { id, name: name.into() }
  }

  /// Returns a copy carrying a different name, for building update payloads
  pub fn renamed(&self, name: impl Into<String>) -> Self {
    Self {
      id: self.id,
      name: name.into(),
    }
  }
}

impl fmt::Display for Hero {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.id, self.name)
  }
}

/// A hero that has not been stored yet. The server assigns an id when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHero {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<HeroId>,
  pub name: String,
}

impl NewHero {
  pub fn named(name: impl Into<String>) -> Self {
    Self {
      id: None,
      name: name.into(),
    }
  }

  pub fn with_id(mut self, id: HeroId) -> Self {
    self.id = Some(id);
    self
  }
}

impl From<Hero> for NewHero {
  fn from(hero: Hero) -> Self {
    Self {
      id: Some(hero.id),
      name: hero.name,
    }
  }
}

/// Drop heroes whose id already appeared earlier in the list.
///
/// Returns the ids that were dropped so callers can report them.
pub fn dedup_by_id(heroes: &mut Vec<Hero>) -> Vec<HeroId> {
  let mut seen = HashSet::with_capacity(heroes.len());
  let mut dropped = Vec::new();
  heroes.retain(|hero| {
    if seen.insert(hero.id) {
      true
    } else {
      dropped.push(hero.id);
      false
    }
  });
  dropped
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_hero_omits_missing_id() {
    let json = serde_json::to_value(NewHero::named("Windstorm")).unwrap();
    assert_eq!(json, serde_json::json!({ "name": "Windstorm" }));
  }

  #[test]
  fn test_new_hero_keeps_supplied_id() {
    let json = serde_json::to_value(NewHero::named("Windstorm").with_id(42)).unwrap();
    assert_eq!(json, serde_json::json!({ "id": 42, "name": "Windstorm" }));
  }

  #[test]
  fn test_hero_requires_id() {
    let parsed: Result<Hero, _> = serde_json::from_str(r#"{"name":"Magneta"}"#);
    assert!(parsed.is_err());
  }

  #[test]
  fn test_renamed_keeps_identity() {
    let hero = Hero::new(15, "Magneta");
    let renamed = hero.renamed("Magnetic");
    assert_eq!(renamed.id, 15);
    assert_eq!(renamed.name, "Magnetic");
    assert_eq!(hero.name, "Magneta");
  }

  #[test]
  fn test_dedup_by_id_keeps_first_occurrence() {
    let mut heroes = vec![
      Hero::new(12, "Dr. Nice"),
      Hero::new(13, "Bombasto"),
      Hero::new(12, "Impostor"),
    ];
    let dropped = dedup_by_id(&mut heroes);

    assert_eq!(dropped, vec![12]);
    assert_eq!(heroes, vec![Hero::new(12, "Dr. Nice"), Hero::new(13, "Bombasto")]);
  }
}
