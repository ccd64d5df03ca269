//! Plain-text rendering of heroes and the notification log

use client::MessageLog;
use heroes_core::Hero;

pub fn format_hero(hero: &Hero) -> String {
  format!("{:>4}  {}", hero.id, hero.name)
}

pub fn format_heroes(heroes: &[Hero]) -> String {
  if heroes.is_empty() {
    return "(no heroes)".to_string();
  }
  heroes.iter().map(format_hero).collect::<Vec<_>>().join("\n")
}

/// Render the notification log, oldest first
pub fn format_messages(messages: &MessageLog) -> String {
  let entries = messages.messages();
  if entries.is_empty() {
    return String::new();
  }

  let mut out = String::from("\nMessages:");
  for entry in entries {
    out.push_str("\n  ");
    out.push_str(&entry);
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_format_heroes() {
    let heroes = vec![Hero::new(12, "Dr. Nice"), Hero::new(13, "Bombasto")];
    assert_eq!(format_heroes(&heroes), "  12  Dr. Nice\n  13  Bombasto");
    assert_eq!(format_heroes(&[]), "(no heroes)");
  }

  #[test]
  fn test_format_messages() {
    let log = MessageLog::new();
    assert_eq!(format_messages(&log), "");

    log.add("HeroService: fetched heroes");
    assert_eq!(format_messages(&log), "\nMessages:\n  HeroService: fetched heroes");
  }
}
