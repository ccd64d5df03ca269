use std::sync::{Arc, Mutex, MutexGuard};

/// Append-only log of user-facing status messages.
///
/// Cloning yields another handle to the same log, so the service that writes
/// and the view that reads share one sequence. Insertion order is display order.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
  entries: Arc<Mutex<Vec<String>>>,
}

impl MessageLog {
  pub fn new() -> Self {
    Self::default()
  }

  fn entries(&self) -> MutexGuard<'_, Vec<String>> {
    // Entries stay valid after a poisoning panic
    self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }

  pub fn add(&self, message: impl Into<String>) {
    self.entries().push(message.into());
  }

  pub fn clear(&self) {
    self.entries().clear();
  }

  /// Snapshot of the current messages, oldest first
  pub fn messages(&self) -> Vec<String> {
    self.entries().clone()
  }

  pub fn len(&self) -> usize {
    self.entries().len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries().is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_add_preserves_order_and_duplicates() {
    let log = MessageLog::new();
    log.add("HeroService: fetched heroes");
    log.add("HeroService: fetched hero id=12");
    log.add("HeroService: fetched heroes");

    assert_eq!(
      log.messages(),
      vec![
        "HeroService: fetched heroes",
        "HeroService: fetched hero id=12",
        "HeroService: fetched heroes",
      ]
    );
  }

  #[test]
  fn test_clear_empties_log() {
    let log = MessageLog::new();
    log.add("one");
    log.add("two");
    log.clear();

    assert!(log.is_empty());
    log.add("three");
    assert_eq!(log.messages(), vec!["three"]);
  }

  #[test]
  fn test_clones_share_entries() {
    let log = MessageLog::new();
    let view = log.clone();
    log.add("from the service");

    assert_eq!(view.len(), 1);
    view.clear();
    assert!(log.is_empty());
  }

  #[test]
  fn test_concurrent_adds_are_all_kept() {
    let log = MessageLog::new();
    let handles: Vec<_> = (0..8)
      .map(|t| {
        let log = log.clone();
        std::thread::spawn(move || {
          for i in 0..100 {
            log.add(format!("{t}-{i}"));
          }
        })
      })
      .collect();
    for handle in handles {
      handle.join().unwrap();
    }

    assert_eq!(log.len(), 800);
  }
}
