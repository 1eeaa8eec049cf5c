//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories only translate between Diesel rows and domain types. Row
//! structs and the schema stay private to this module. Integrity violations
//! are mapped by constraint name onto the port errors, which is how commit
//! time uniqueness races reach the domain.

mod diesel_helpers;
mod diesel_task_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_task_repository::DieselTaskRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
