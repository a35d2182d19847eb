//! # Pathforge Architecture
//!
//! Pathforge is a **UI-agnostic content-organization library**. This is not
//! a CLI application that happens to have some library code—it's a library
//! that happens to have a CLI client. The real caller is a chat layer: a
//! user uploads documents, types instructions like "update pathway 1
//! section 2 with the new file", and reads back plain-text outcomes.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, args.rs, wired by main.rs)                │
//! │  - Parses arguments, reads files, formats colored output    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Owns the session, snapshots it through the store         │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic                                      │
//! │  - Operates on Rust types, returns Result<CmdResult>        │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session Layer (store/)                                     │
//! │  - Abstract SessionStore trait                              │
//! │  - FileSession (CLI snapshots), InMemorySession (testing)   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The numbering system
//!
//! Users address modules by number ("module 4") and sections by ordinal or
//! keyword ("section 2", "the safety section"). Those numbers are never
//! stored on the hierarchy: [`index::ModuleIndex`] is a pure projection
//! rebuilt from the pathway snapshot on every read, so a merge can never
//! leave a stale number behind. See `index.rs`.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, commands, chunker, resolver, search), code:
//! - Takes regular Rust function arguments (text is already extracted)
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//! - Reports every user-addressable failure (out-of-range reference,
//!   ambiguous module, empty extraction) as a message the caller renders,
//!   never as an `Err` or a panic
//!
//! ## Testing Strategy
//!
//! 1. **Components and commands** (`chunker.rs`, `resolver.rs`, `index.rs`,
//!    `search.rs`, `commands/*.rs`): thorough unit tests of the logic.
//!    This is where the lion's share of testing lives.
//! 2. **API** (`api.rs`): dispatch and persistence round-trips against
//!    `InMemorySession`.
//! 3. **CLI** (`tests/`): end-to-end scenarios and binary smoke tests.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`chunker`]: Raw document text → module candidates
//! - [`resolver`]: Free-text instruction → structured target
//! - [`index`]: Derived global/local numbering over a pathway snapshot
//! - [`search`]: Relevance ranking of modules against a query
//! - [`store`]: Session persistence abstraction and implementations
//! - [`model`]: Core data types (`Pathway`, `Section`, `Module`, `Session`)
//! - [`error`]: Error types
//! - `args`/`cli`: Argument parsing and printing for the binary (not part
//!   of the lib API)

pub mod api;
pub mod chunker;
pub mod commands;
pub mod error;
pub mod index;
pub mod model;
pub mod resolver;
pub mod search;
pub mod store;
