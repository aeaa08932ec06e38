//! # Observability & Tracing
//!
//! The framework logs through `tracing` at every network seam:
//!
//! - **Collections**: `Fetching` before the GET, `Fetched` with the cache size,
//!   `Cache hit` when a fetch is answered locally.
//! - **Malformed replies**: `warn!` with the offending JSON type before the
//!   error is returned. Nothing is logged and then swallowed.
//!
//! ## Usage
//!
//! ```bash
//! # Cache population only
//! RUST_LOG=info cargo run
//!
//! # Every request path and cache hit
//! RUST_LOG=debug cargo run
//!
//! # Only the framework
//! RUST_LOG=resource_framework=debug cargo run
//! ```
//!
//! Fields are structured (`kind`, `path`, `size`), so `RUST_LOG=debug` shows
//! lines such as:
//!
//! ```text
//! DEBUG Fetching kind="group" path="/members/1000/groups"
//! INFO Fetched kind="group" path="/members/1000/groups" size=3
//! DEBUG Cache hit kind="group" path="/members/1000/groups" size=3
//! ```

/// Installs the global subscriber: `RUST_LOG` filtering, compact lines, no
/// module targets (the `kind` field already says where a line comes from).
///
/// Call once, at the top of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
