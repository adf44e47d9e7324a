//! # Lanry Architecture
//!
//! Lanry is a **chapter-oriented manuscript library** for light-novel authors: chapters
//! live as plain text files in one directory, an editing session moves between them,
//! and finished chapters are published to the Lanry site. The CLI is one client of
//! the library, not the library itself.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, owns the editor session       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One function per user-facing operation → CmdResult      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session (session.rs, navigation.rs)                        │
//! │  - Active chapter, buffer, flush-before-load ordering       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/, codec.rs)                           │
//! │  - Read-through cache, best-effort file writes              │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The upload path sits beside the stack: [`client`] holds the service
//! coordinates, [`auth`] logs in, [`upload`] publishes, and [`transport`] is the
//! seam where tests swap the network out.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits the
//! process. Diagnostics go through `tracing`; the CLI decides where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`session`]: Editor session (active chapter and buffer)
//! - [`navigation`]: Ordered chapter list and navigation events
//! - [`store`]: Chapter store and storage backends
//! - [`codec`]: Chapter file names
//! - [`model`]: Core data types (`ChapterInfo`, `ChapterListing`)
//! - [`config`]: Configuration (`lanry.json`, `.env`, environment)
//! - [`client`], [`auth`], [`upload`], [`transport`]: Lanry site access
//! - [`editor`]: External editor integration
//! - [`init`]: Base directory resolution and context setup
//! - [`error`]: Error types

pub mod api;
pub mod auth;
pub mod client;
pub mod codec;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod init;
pub mod model;
pub mod navigation;
pub mod session;
pub mod store;
pub mod transport;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_utils;
