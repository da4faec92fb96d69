//! # rustcrossref
//!
//! Search CrossRef by article title, rank the hits by publication year,
//! open links and export the results to a spreadsheet.
//!
//! ## Modules
//!
//! - [`crossref`] - Crossref `works` API client
//! - [`rank`] - Year ordering of results
//! - [`store`] - Results currently shown
//! - [`surface`] - Result table, notices and browser launching
//! - [`export`] - `.xlsx` / `.csv` export
//! - [`commands`] - Interactive command table
//! - [`app`] - Controller tying the pieces together
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rustcrossref::{config::ClientConfig, crossref::CrossrefClient, rank::rank};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = CrossrefClient::new(&ClientConfig::default())?;
//!     let records = rank(client.search("protein folding").await?);
//!     println!("Found {} results", records.len());
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod article;
pub mod commands;
pub mod config;
pub mod crossref;
pub mod error;
pub mod export;
pub mod rank;
pub mod store;
pub mod surface;

pub use article::ArticleRecord;
pub use error::{AppError, ExportError, QueryError, Result};
