//! Outbound adapters implementing the domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: in-process stores for development without a database and
//!   for tests. Also hosts the session store.
//! - **security**: Argon2id password hashing.
//!
//! Adapters translate between domain types and infrastructure
//! representations. They hold no business rules beyond the uniqueness
//! guarantees their storage provides.

pub mod memory;
pub mod persistence;
pub mod security;
