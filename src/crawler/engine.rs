//! Crawl engine - breadth-first site traversal
//!
//! This module owns the crawl loop: a FIFO frontier and a visited set,
//! seeded with one URL, driving fetch → extract → enqueue-links until the
//! frontier drains or the page budget is spent. State lives for exactly
//! one call; nothing is shared across crawls.

use crate::config::CrawlerConfig;
use crate::crawler::extractor::extract;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::resolver::resolve;
use crate::document::{Document, Source};
use crate::MagpieError;
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;

/// Transient traversal state for a single crawl invocation.
struct CrawlState {
    /// URLs pending visit, in discovery order (FIFO → breadth-first).
    frontier: VecDeque<String>,

    /// URLs already dequeued and attempted. Checked before every dequeue
    /// and before every enqueue, so cyclic link graphs terminate.
    visited: HashSet<String>,

    /// Pages dequeued and attempted so far; bounds total work.
    pages_processed: usize,
}

impl CrawlState {
    fn new(seed_url: &str) -> Self {
        let mut frontier = VecDeque::new();
        frontier.push_back(seed_url.to_string());
        Self {
            frontier,
            visited: HashSet::new(),
            pages_processed: 0,
        }
    }

    /// Enqueues a discovered URL unless it was already visited or is
    /// already waiting in the frontier. Dedup happens here, at enqueue
    /// time, not just at dequeue time.
    fn enqueue(&mut self, url: String) {
        if !self.visited.contains(&url) && !self.frontier.contains(&url) {
            self.frontier.push_back(url);
        }
    }
}

/// Breadth-first web crawler producing normalized documents.
pub struct Crawler {
    client: Client,
}

impl Crawler {
    /// Creates a crawler with an HTTP client built from the configured
    /// user agent and per-request timeout.
    pub fn new(config: &CrawlerConfig) -> Result<Self, MagpieError> {
        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Self { client })
    }

    /// Crawls a site breadth-first starting from `seed_url`, visiting at
    /// most `max_pages` pages.
    ///
    /// Pages whose extraction yields non-empty text become documents, in
    /// visit order. A failed fetch skips that one page and the crawl
    /// continues. Fails with [`MagpieError::NoContentExtracted`] when
    /// every attempted page produced no usable text.
    pub async fn crawl(&self, seed_url: &str, max_pages: usize) -> Result<Vec<Document>, MagpieError> {
        let base_url = seed_url.trim_end_matches('/').to_string();
        let mut state = CrawlState::new(seed_url);
        let mut documents = Vec::new();

        tracing::info!("Starting crawl of {} (budget: {} pages)", seed_url, max_pages);

        while state.pages_processed < max_pages {
            let Some(current_url) = state.frontier.pop_front() else {
                break;
            };

            // Dequeue-time dedup does not count toward the budget.
            if state.visited.contains(&current_url) {
                continue;
            }
            state.visited.insert(current_url.clone());
            state.pages_processed += 1;

            tracing::debug!("Processing URL: {}", current_url);

            // A single dead page never aborts the crawl.
            let body = match fetch_page(&self.client, &current_url).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", current_url, e);
                    continue;
                }
            };

            let page = extract(&body);

            if page.text.is_empty() {
                tracing::debug!("No extractable text at {}", current_url);
            } else {
                let title = page.title.unwrap_or_else(|| current_url.clone());
                documents.push(Document::new(
                    Source::Web,
                    current_url.as_str(),
                    title,
                    page.text,
                ));
            }

            if state.pages_processed < max_pages {
                for href in &page.links {
                    if let Some(link) = resolve(&base_url, href) {
                        state.enqueue(link);
                    }
                }
            }
        }

        tracing::info!(
            "Crawl finished: {} pages attempted, {} documents, {} URLs left in frontier",
            state.pages_processed,
            documents.len(),
            state.frontier.len()
        );

        if documents.is_empty() {
            return Err(MagpieError::NoContentExtracted);
        }

        Ok(documents)
    }
}

/// Runs a complete crawl with a freshly built client.
///
/// Convenience entry point for one-shot callers; the HTTP server builds
/// one [`Crawler`] per request the same way.
pub async fn crawl(
    config: &CrawlerConfig,
    seed_url: &str,
    max_pages: usize,
) -> Result<Vec<Document>, MagpieError> {
    Crawler::new(config)?.crawl(seed_url, max_pages).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_seeded_with_one_url() {
        let state = CrawlState::new("https://example.com");
        assert_eq!(state.frontier.len(), 1);
        assert!(state.visited.is_empty());
        assert_eq!(state.pages_processed, 0);
    }

    #[test]
    fn test_enqueue_dedups_against_frontier() {
        let mut state = CrawlState::new("https://example.com");
        state.enqueue("https://example.com/a".to_string());
        state.enqueue("https://example.com/a".to_string());
        assert_eq!(state.frontier.len(), 2);
    }

    #[test]
    fn test_enqueue_dedups_against_visited() {
        let mut state = CrawlState::new("https://example.com");
        state.visited.insert("https://example.com/a".to_string());
        state.enqueue("https://example.com/a".to_string());
        assert_eq!(state.frontier.len(), 1);
    }

    #[test]
    fn test_enqueue_preserves_discovery_order() {
        let mut state = CrawlState::new("https://example.com");
        state.enqueue("https://example.com/a".to_string());
        state.enqueue("https://example.com/b".to_string());
        let order: Vec<_> = state.frontier.iter().cloned().collect();
        assert_eq!(
            order,
            vec![
                "https://example.com".to_string(),
                "https://example.com/a".to_string(),
                "https://example.com/b".to_string(),
            ]
        );
    }
}
