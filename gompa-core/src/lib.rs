//! # Gompa Core
//!
//! Core library for the Gompa heritage-site catalog: catalog access, the pure
//! view filter/derivation layer, per-route page composition, the admin gate and
//! editor, and the local presentation state behind the interactive pages.
//!
//! ## Feature Flags
//!
//! - `database`: PostgreSQL adapters (SQLx) for the catalog and admin identity ports
//! - `demo`: in-memory seed catalog
//!
//! ## Architecture
//!
//! - [`catalog`]: query vocabulary and the [`catalog::CatalogAccessor`] every page goes through
//! - [`database`]: repository ports and their Postgres / in-memory adapters
//! - [`query`]: filtering, statistics and map marker placement (no I/O)
//! - [`pages`]: route composition producing serializable view models
//! - [`admin`]: session/allow-list gate, site form validation and the editor state machine
//! - [`presentation`]: carousel, audio player, playback clock, tour viewer, map selection
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gompa_core::{
//!     catalog::CatalogAccessor,
//!     database::InMemoryCatalogRepository,
//!     pages::{self, ListingParams},
//! };
//!
//! async fn render_listing() {
//!     let repo = Arc::new(InMemoryCatalogRepository::default());
//!     let accessor = CatalogAccessor::new(repo);
//!     let view = pages::sites::compose_listing(&accessor, &ListingParams::default()).await;
//!     println!("showing {} of {}", view.showing, view.total);
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod admin;
pub mod catalog;
pub mod database;
#[cfg(feature = "demo")]
pub mod demo;
pub mod error;
pub mod pages;
pub mod presentation;
pub mod query;

pub use error::{CatalogError, FieldError, Result, ValidationError};
pub use gompa_model as model;
