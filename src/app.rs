//! Application controller.
//!
//! `App` owns everything the session needs (client, result store, surface,
//! browser) and executes [`Action`]s. Every failure is caught at the action
//! that caused it and shown as a [`Notice`]; the session then carries on.

use crate::commands::{help_text, Action};
use crate::crossref::CrossrefClient;
use crate::error::{AppError, QueryError, Result};
use crate::export::{default_file_name, export};
use crate::rank::rank;
use crate::store::ResultStore;
use crate::surface::{Browser, Notice, Surface};
use chrono::Local;
use std::path::PathBuf;
use tracing::{info, warn};

/// Result of a search that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Number of records now in the store
    Found(usize),
    NoResults,
}

/// Whether the session keeps going after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct App<S: Surface, B: Browser> {
    client: CrossrefClient,
    store: ResultStore,
    surface: S,
    browser: B,
    export_dir: PathBuf,
}

impl<S: Surface, B: Browser> App<S, B> {
    pub fn new(client: CrossrefClient, surface: S, browser: B, export_dir: PathBuf) -> Self {
        Self {
            client,
            store: ResultStore::new(),
            surface,
            browser,
            export_dir,
        }
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Run a search, rank the hits and show them.
    ///
    /// The store is only touched when the request succeeds.
    pub async fn search(&mut self, term: &str) -> Result<SearchOutcome> {
        let records = self.client.search(term).await?;

        if records.is_empty() {
            self.store.clear();
            self.surface.clear();
            info!(term = term.trim(), "No results");
            return Ok(SearchOutcome::NoResults);
        }

        self.store.replace(rank(records));
        self.surface.render(self.store.records());
        Ok(SearchOutcome::Found(self.store.len()))
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.surface.clear();
    }

    /// Export the store; without a path a timestamped file goes to the export directory
    pub fn save(&self, path: Option<PathBuf>) -> Result<PathBuf> {
        let path = path.unwrap_or_else(|| self.export_dir.join(default_file_name(Local::now())));
        Ok(export(self.store.records(), &path)?)
    }

    /// Open the link of the record at `index` (zero-based)
    pub fn open_row(&self, index: usize) -> Result<()> {
        let record = self.store.get(index).ok_or(AppError::NoSuchRow(index + 1))?;
        let url = record.url.as_deref().ok_or(AppError::NoUrl)?;
        info!(row = index + 1, url = url, "Opening link");
        self.browser.open(url)
    }

    /// Execute one action, reporting any failure on the surface
    pub async fn dispatch(&mut self, action: Action) -> Flow {
        let result = match action {
            Action::Search(term) => self.search(&term).await.map(|outcome| match outcome {
                SearchOutcome::NoResults => Some(Notice::info(
                    "No Results",
                    "No articles found for the search term",
                )),
                SearchOutcome::Found(_) => None,
            }),
            Action::Clear => {
                self.clear();
                Ok(None)
            }
            Action::Save(path) => self.save(path).map(|written| {
                Some(Notice::info(
                    "Saved",
                    format!("Results saved to {}", written.display()),
                ))
            }),
            Action::Open(index) => self.open_row(index).map(|_| None),
            Action::List => {
                self.surface.render(self.store.records());
                Ok(None)
            }
            Action::Help => Ok(Some(Notice::info("Commands", format!("\n{}", help_text())))),
            Action::Close => return Flow::Exit,
        };

        match result {
            Ok(Some(notice)) => self.surface.notify(&notice),
            Ok(None) => {}
            Err(e) => self.report(&e),
        }
        Flow::Continue
    }

    /// Show an error as a notice
    pub fn report(&mut self, err: &AppError) {
        let notice = notice_for(err);
        warn!(error = %err, "Action failed");
        self.surface.notify(&notice);
    }
}

/// Notice shown for an error
pub fn notice_for(err: &AppError) -> Notice {
    let message = err.to_string();
    match err {
        AppError::Query(QueryError::EmptyQuery) | AppError::NoSuchRow(_) | AppError::Command(_) => {
            Notice::warning("Oops!", message)
        }
        AppError::Query(_) => Notice::error("Request Error", message),
        AppError::Export(_) => Notice::error("Save Error", message),
        AppError::NoUrl => Notice::info("No URL", message),
        AppError::Browser(_) => Notice::error("Browser Error", message),
        AppError::Config(_) => Notice::error("Error", message),
    }
}
