//! Single-shot hero commands

use crate::format::{format_hero, format_heroes};
use anyhow::Result;
use client::HeroService;
use heroes_core::{Hero, HeroId, NewHero};

/// List every hero
pub async fn cmd_list(service: &HeroService) -> Result<()> {
  let heroes = service.get_heroes().await;
  println!("{}", format_heroes(&heroes));
  Ok(())
}

/// Show one hero by id
pub async fn cmd_get(service: &HeroService, id: HeroId, no_404: bool) -> Result<()> {
  let hero = if no_404 {
    service.get_hero_no_404(id).await
  } else {
    service.get_hero(id).await
  };

  match hero {
    Some(hero) => println!("{}", format_hero(&hero)),
    None => println!("Hero {} not found", id),
  }
  Ok(())
}

pub async fn cmd_add(service: &HeroService, name: &str, id: Option<HeroId>) -> Result<()> {
  let name = name.trim();
  if name.is_empty() {
    anyhow::bail!("Hero name must not be empty");
  }

  let new_hero = match id {
    Some(id) => NewHero::named(name).with_id(id),
    None => NewHero::named(name),
  };

  match service.add_hero(new_hero).await {
    Some(hero) => println!("Added {}", format_hero(&hero)),
    None => println!("Hero was not added"),
  }
  Ok(())
}

pub async fn cmd_update(service: &HeroService, id: HeroId, name: &str) -> Result<()> {
  match service.update_hero(&Hero::new(id, name)).await {
    Some(()) => println!("Updated hero {}", id),
    None => println!("Hero {} was not updated", id),
  }
  Ok(())
}

pub async fn cmd_delete(service: &HeroService, id: HeroId) -> Result<()> {
  match service.delete_hero(id).await {
    Some(()) => println!("Deleted hero {}", id),
    None => println!("Hero {} was not deleted", id),
  }
  Ok(())
}
