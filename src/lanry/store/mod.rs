//! # Storage Layer
//!
//! The chapter store keeps chapter bodies keyed by chapter number and recovers the
//! chapter list from the chapters directory alone.
//!
//! ## Cache and Files
//!
//! Lanry keeps two copies of every chapter it has touched:
//! 1. **Cache**: an in-memory map `id → body`. Once a chapter has been loaded or saved,
//!    the cache is authoritative for the rest of the process.
//! 2. **Files**: one plain-text file per chapter in `Chapters/`. Disk is only read on a
//!    cache miss.
//!
//! ### Best-Effort Persistence
//!
//! - **Saves always land in memory.** The file write is attempted afterwards; if it
//!   fails the failure is logged and reported as [`SaveStatus::MemoryOnly`], but the
//!   editing session carries on from memory.
//! - **Loads never fail.** A missing file is a new chapter (empty body); an unreadable
//!   file is logged and treated the same way.
//! - **Scans never fail.** Files that do not look like chapter files are skipped; an
//!   unreadable directory yields an empty list.
//!
//! ## Files Are the Index
//!
//! There is no manifest. [`ChapterStore::list_existing_chapters`] decodes file names
//! (see [`crate::codec`]) to rebuild `(id, title)` pairs. Callers only see that method,
//! so a manifest or embedded database could replace the scan without touching them.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: production backend over a real directory, atomic writes.
//! - [`mem_backend::MemBackend`]: for testing store logic without filesystem I/O, with
//!   switches to simulate I/O failures.
//!
//! ## Storage Layout
//!
//! ```text
//! <base>/
//! ├── lanry.json                       # Project configuration (optional)
//! ├── .env                             # SUPABASE_URL / SUPABASE_KEY (optional)
//! └── Chapters/
//!     ├── Chapter_001_The Beginning.txt
//!     └── Chapter_002_The Journey.txt
//! ```

pub mod backend;
pub mod chapter_store;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::ChapterBackend;
pub use chapter_store::{ChapterStore, SaveStatus};
