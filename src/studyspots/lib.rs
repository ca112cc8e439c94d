//! # Studyspots Architecture
//!
//! Studyspots is a **UI-agnostic directory browser** for study locations (spots) and the
//! malls that group them. The CLI in this repository is one client; the library does not
//! know it exists.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders cards, handles terminal I/O    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Page controller: view → filter → paginate                │
//! │  - Returns plain data (PageView, MallCard)                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (filter.rs, paginate.rs, prefs.rs, favorites.rs)      │
//! │  - Pure filtering and pagination                            │
//! │  - Bounded view preferences and the favorites set           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/) and Catalog (catalog.rs)                  │
//! │  - StorageBackend: FsBackend (production), MemBackend (test)│
//! │  - DataSource: DirSource (production), StaticSource (test)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust values and returns Rust values. It never writes to
//! stdout/stderr and never exits the process. Diagnostics go through `tracing`; installing a
//! subscriber is the client's business.
//!
//! ## Failure Model
//!
//! - Catalog load failures propagate ([`error::SpotsError::Load`]).
//! - Persisted state (preferences, favorites) never fails a caller: unreadable state reads
//!   as defaults and failed writes are logged and dropped.
//! - Bad filter and paging input is clamped or ignored.
//!
//! ## Module Overview
//!
//! - [`api`]: The page controller facade
//! - [`filter`]: Filter state and the filter engine
//! - [`paginate`]: Page window over a filtered sequence
//! - [`prefs`]: Persisted view preferences (columns, page size)
//! - [`favorites`]: Persisted favorites set
//! - [`catalog`]: Loading spots and malls
//! - [`model`]: Record types (`Spot`, `Mall`, `ItemId`)
//! - [`store`]: Key/value storage abstraction and implementations
//! - [`config`] / [`init`]: Configuration and context setup
//! - [`error`]: Error types
//! - `cli`: Argument parsing and templated rendering for the binary (not part of the lib API)

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod init;
pub mod model;
pub mod paginate;
pub mod prefs;
pub mod store;
