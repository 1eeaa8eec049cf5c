//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{PasswordHasher, SessionStore, TaskRepository, UserRepository};
use crate::domain::validation::ValidationEngine;
use crate::domain::{Error, SessionManager, TaskService, UserAccountService};

/// Parameter object bundling the port implementations the services need.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UserRepository>,
    pub tasks: Arc<dyn TaskRepository>,
    pub sessions: Arc<dyn SessionStore>,
    pub hasher: Arc<dyn PasswordHasher>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub sessions: Arc<SessionManager>,
    pub tasks: Arc<TaskService>,
    pub accounts: Arc<UserAccountService>,
}

impl HttpState {
    /// Wire the services over one set of ports.
    ///
    /// Fails only if the session manager cannot prepare its decoy digest.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use taskboard::inbound::http::state::{HttpState, HttpStatePorts};
    /// use taskboard::outbound::memory::{
    ///     InMemorySessionStore, InMemoryTaskRepository, InMemoryUserRepository,
    /// };
    /// use taskboard::outbound::security::Argon2PasswordHasher;
    ///
    /// let state = HttpState::try_from_ports(HttpStatePorts {
    ///     users: Arc::new(InMemoryUserRepository::new()),
    ///     tasks: Arc::new(InMemoryTaskRepository::new()),
    ///     sessions: Arc::new(InMemorySessionStore::new()),
    ///     hasher: Arc::new(Argon2PasswordHasher::default()),
    /// })
    /// .expect("state");
    /// let _tasks = state.tasks.clone();
    /// ```
    pub fn try_from_ports(ports: HttpStatePorts) -> Result<Self, Error> {
        let HttpStatePorts {
            users,
            tasks,
            sessions,
            hasher,
        } = ports;
        let validation = ValidationEngine::new(users.clone(), tasks.clone());
        Ok(Self {
            sessions: Arc::new(SessionManager::new(users.clone(), sessions, hasher.clone())?),
            tasks: Arc::new(TaskService::new(tasks.clone(), validation.clone())),
            accounts: Arc::new(UserAccountService::new(users, tasks, hasher, validation)),
        })
    }
}
