//! Search-as-you-type over stdin

use crate::format::format_heroes;
use anyhow::{Context, Result};
use client::HeroService;
use futures::StreamExt;
use search::HeroSearch;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Search heroes by name.
///
/// With a term, runs that single search. Without one, every stdin line is
/// submitted as the next raw term and results print as terms settle.
pub async fn cmd_search(service: &HeroService, term: Option<String>, debounce: Duration) -> Result<()> {
  let search = HeroSearch::new(Arc::new(service.clone())).with_debounce(debounce);
  let mut results = search.results();

  let printer = tokio::spawn(async move {
    while let Some(heroes) = results.next().await {
      println!("{}", format_heroes(&heroes));
    }
  });

  match term {
    Some(term) => search.submit(term),
    None => {
      let mut lines = BufReader::new(tokio::io::stdin()).lines();
      while let Some(line) = lines.next_line().await.context("Failed to read search term")? {
        search.submit(line);
      }
    }
  }

  // Closing the controller settles the last term and ends the stream
  drop(search);
  printer.await.context("Search output task failed")?;
  Ok(())
}
