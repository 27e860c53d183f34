//! # Roster Architecture
//!
//! Roster is a **UI-agnostic user record library**. The HTTP service in the `roster`
//! crate is one client of it; nothing in here knows about sockets, status codes or JSON
//! request bodies.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  HTTP Layer (roster crate, server.rs)                       │
//! │  - Matches method + path, validates request bodies          │
//! │  - The ONLY place that knows about status codes             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Owns the lock that serializes every store operation      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Input normalization and validation                       │
//! │  - Returns `CmdResult` with records and messages            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - UserStore: records + id allocator, flushes on mutation   │
//! │  - StorageBackend: FsBackend (production), MemBackend       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns `Result<CmdResult>`
//! and never writes to stdout/stderr. Diagnostics go through `tracing`; human-readable
//! outcomes travel back as [`commands::CmdMessage`]s for the caller to surface.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): unit tests against [`store::mem_backend::MemBackend`].
//! 2. **Store** (`store/`): line format, allocator and flush behaviour.
//! 3. **Backends** (`tests/`): [`store::fs_backend::FsBackend`] against a temp directory.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Record store, persistence backends and the flat-file line format
//! - [`model`]: Core data types (`User`, `UserPatch`)
//! - [`config`]: Service configuration
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
