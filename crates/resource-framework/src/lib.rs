//! # Resource Framework
//!
//! This crate provides the service-agnostic building blocks for modelling a
//! remote REST API as local objects: entities that wrap raw attribute mappings,
//! collections that fetch related entities once and cache them by a natural
//! key, and a single transport seam every remote call goes through.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Entity Layer** ([`RemoteEntity`]) - identity, natural key and attribute access
//! 2. **Cache Layer** ([`LazyCollection`]) - fetch-once population and keyed reads
//! 3. **Transport Layer** ([`Adapter`]) - GET/POST/PUT/DELETE against relative paths
//!
//! A domain crate implements `RemoteEntity` for each resource, owns one
//! `Adapter` per account, and wraps `LazyCollection`s in typed views that know
//! which path to fetch and which preconditions to check first.
//!
//! ## Control Flow
//!
//! ```text
//! caller ── fetch_all() ──▶ LazyCollection ── fetched? ──▶ cached map
//!                                 │ no
//!                                 ▼
//!                         Adapter::get(path)
//!                                 │
//!                                 ▼
//!                 RemoteEntity::from_response per row
//!                                 │
//!                                 ▼
//!                  index by natural_key, set fetched
//! ```
//!
//! ## Concurrency Model
//!
//! - Every network operation is awaited to completion before the caller
//!   continues; nothing is spawned and no requests run concurrently.
//! - Collections are mutated through `&mut self`, so the borrow checker, not a
//!   lock, guarantees a single writer.
//! - Sharing a collection across tasks is the caller's job (wrap it in a
//!   `tokio::sync::Mutex`).
//!
//! ## Testing
//!
//! The [`mock`] module provides [`MockAdapter`](mock::MockAdapter), which records
//! every call and replays scripted replies. See its docs for usage patterns.

pub mod adapter;
pub mod collection;
pub mod entity;
pub mod error;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use adapter::{is_truthy, Adapter, Method, Params};
pub use collection::LazyCollection;
pub use entity::{Attributes, RemoteEntity, NULL};
pub use error::{AdapterError, CollectionError};
