//! In-process adapters for database-less development and tests.
//!
//! Each store holds its records behind one `RwLock`. Uniqueness checks and
//! the write they guard happen under the same write guard, so concurrent
//! inserts cannot both pass. A poisoned lock is reported as a query error.

mod sessions;
mod tasks;
mod users;

pub use sessions::{DEFAULT_SESSION_TTL, InMemorySessionStore};
pub use tasks::InMemoryTaskRepository;
pub use users::InMemoryUserRepository;
