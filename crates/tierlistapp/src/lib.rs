//! # Tierlist Architecture
//!
//! Tierlist is a **UI-agnostic tier list engine**. A fixed catalog of items and
//! powers is ranked into S/A/B/C/D tiers, the placement survives restarts, and
//! the whole state fits in a short share link. The CLI in `crates/tierlist` is
//! one client; a browser or desktop front end would be another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (CLI, GUI, ...)                                     │
//! │  - Parses input, renders the board, reports pointer events  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Session context (mode, filters), best-effort persistence │
//! │  - Returns data, never prints                               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  - catalog: deterministic ordering per mode                 │
//! │  - store: tier placement + invariants                       │
//! │  - reorder: board, drop-position inference, drag engine     │
//! │  - codec: share payload <-> compressed base64url token      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/backend.rs)                                 │
//! │  - StateBackend trait: FsBackend, MemBackend (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//!
//! The catalog index is built once at startup. The store is restored from
//! the backend and sanitized against the catalog. The client renders
//! [`reorder::Board`] (tiers in full, bank narrowed by the hero filters),
//! feeds pointer events to the drag engine and receives a whole new
//! assignment when a gesture ends. Every committed change is persisted, and
//! the share token is re-encoded on demand.
//!
//! ## Key Invariants
//!
//! - Within one mode an id sits in at most one tier.
//! - After sanitizing, every placed id exists in that mode's catalog.
//! - Mutations are all-or-nothing; a rejected snapshot leaves the store as is.
//! - Filters decide visibility only, never membership.
//! - Decode and storage failures are logged and recovered, never fatal.
//!
//! ## Module Overview
//!
//! - [`api`]: facade used by clients
//! - [`catalog`]: catalog ingestion and ordering
//! - [`codec`]: share token encoding
//! - [`config`]: layered configuration
//! - [`filter`] / [`session`]: per-mode hero filters and the session context
//! - [`init`]: data directory resolution and startup wiring
//! - [`model`]: modes, tiers, entries, assignments
//! - [`reorder`]: drag and drop
//! - [`share`]: share links and shortening
//! - [`store`]: assignment store and persistence

pub mod api;
pub mod catalog;
pub mod codec;
pub mod config;
pub mod error;
pub mod filter;
pub mod init;
pub mod model;
pub mod reorder;
pub mod session;
pub mod share;
pub mod store;
