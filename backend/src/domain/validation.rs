//! Field-level and uniqueness validation for users and tasks.
//!
//! The pure `check_*` functions collect every violation in one pass. The
//! [`ValidationEngine`] wraps them with the store lookups that back the
//! uniqueness rules. Storage adapters still enforce uniqueness at commit, so
//! a lost race is reported through the same [`ValidationErrors`] shape.

use std::fmt;
use std::sync::Arc;

use serde_json::json;
use zeroize::Zeroizing;

use super::ports::{TaskRepository, UserRepository};
use super::task::cast_deadline;
use super::{EmailAddress, Error, TaskDraft, TaskFields, TaskId, TaskStatus, UserDraft, UserId};

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 3;

/// Record kind named in the error summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Task,
}

impl Entity {
    pub fn noun(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Task => "task",
        }
    }
}

/// Validated fields in declaration order. The derived ordering drives the
/// order of reported errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Email,
    Password,
    PasswordConfirmation,
    Title,
    Content,
    Status,
    Deadline,
}

impl Field {
    /// Human label used as the message prefix.
    pub fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Password => "Password",
            Self::PasswordConfirmation => "Password confirmation",
            Self::Title => "Title",
            Self::Content => "Content",
            Self::Status => "Status",
            Self::Deadline => "Deadline",
        }
    }

    /// Payload key of the field.
    pub fn key(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::PasswordConfirmation => "password_confirmation",
            Self::Title => "title",
            Self::Content => "content",
            Self::Status => "status",
            Self::Deadline => "deadline",
        }
    }
}

/// A single broken rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Blank,
    Taken,
    TooShort { minimum: usize },
    ConfirmationMismatch,
    NotIncluded,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => f.write_str("can't be blank"),
            Self::Taken => f.write_str("has already been taken"),
            Self::TooShort { minimum } => {
                write!(f, "is too short (minimum is {minimum} characters)")
            }
            Self::ConfirmationMismatch => f.write_str("doesn't match Password"),
            Self::NotIncluded => f.write_str("is not included in the list"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub violation: Violation,
}

impl FieldError {
    /// `"<Field> <message>"`, e.g. `"Title can't be blank"`.
    pub fn full_message(&self) -> String {
        format!("{} {}", self.field.label(), self.violation)
    }
}

/// Every violation found for one candidate record.
///
/// # Examples
/// ```
/// use taskboard::domain::validation::{Entity, Field, ValidationErrors, Violation};
///
/// let errors = ValidationErrors::single(Entity::Task, Field::Title, Violation::Blank);
/// assert_eq!(errors.summary(), "1 error prohibited this task from being saved:");
/// assert_eq!(errors.full_messages(), vec!["Title can't be blank".to_owned()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    entity: Entity,
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            errors: Vec::new(),
        }
    }

    pub fn single(entity: Entity, field: Field, violation: Violation) -> Self {
        let mut errors = Self::new(entity);
        errors.push(field, violation);
        errors
    }

    /// Record a violation, keeping errors in field declaration order.
    pub fn push(&mut self, field: Field, violation: Violation) {
        let at = self.errors.partition_point(|existing| existing.field <= field);
        self.errors.insert(at, FieldError { field, violation });
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn full_messages(&self) -> Vec<String> {
        self.errors.iter().map(FieldError::full_message).collect()
    }

    /// `"<N> error(s) prohibited this <entity> from being saved:"`.
    pub fn summary(&self) -> String {
        let count = self.errors.len();
        let noun = if count == 1 { "error" } else { "errors" };
        format!(
            "{count} {noun} prohibited this {} from being saved:",
            self.entity.noun()
        )
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        let fields: Vec<_> = errors
            .errors
            .iter()
            .map(|error| {
                json!({
                    "field": error.field.key(),
                    "message": error.full_message(),
                })
            })
            .collect();
        Self::invalid_request(errors.summary()).with_details(json!({
            "entity": errors.entity.noun(),
            "errors": errors.full_messages(),
            "fields": fields,
        }))
    }
}

/// Whether a candidate is new or replaces an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode<Id> {
    Create,
    Update(Id),
}

impl<Id: PartialEq> ValidationMode<Id> {
    /// Whether a record holding a unique value is some other record.
    fn conflicts_with(&self, holder: &Id) -> bool {
        match self {
            Self::Create => true,
            Self::Update(id) => id != holder,
        }
    }
}

/// Account fields that passed validation.
#[derive(Clone)]
pub struct ValidatedUser {
    pub email: EmailAddress,
    /// New plaintext password, or `None` to keep the stored one.
    pub password: Option<Zeroizing<String>>,
}

impl fmt::Debug for ValidatedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedUser")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| ".."))
            .finish()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Check a task payload. `title_taken` reports whether another task already
/// holds the title.
pub fn check_task(draft: &TaskDraft, title_taken: bool) -> Result<TaskFields, ValidationErrors> {
    let mut errors = ValidationErrors::new(Entity::Task);

    if draft.title.trim().is_empty() {
        errors.push(Field::Title, Violation::Blank);
    } else if title_taken {
        errors.push(Field::Title, Violation::Taken);
    }

    let status = match non_blank(draft.status.as_deref()) {
        None => {
            errors.push(Field::Status, Violation::Blank);
            None
        }
        Some(raw) => match raw.parse::<TaskStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                errors.push(Field::Status, Violation::NotIncluded);
                None
            }
        },
    };

    match status {
        Some(status) if errors.is_empty() => Ok(TaskFields {
            title: draft.title.clone(),
            content: non_blank(draft.content.as_deref()).map(str::to_owned),
            status,
            deadline: draft.deadline.as_deref().and_then(cast_deadline),
        }),
        _ => Err(errors),
    }
}

/// Check an account payload.
///
/// `password_required` is set for sign-up. Otherwise the password rules only
/// apply when either password field carries a value.
pub fn check_user(
    draft: &UserDraft,
    password_required: bool,
    email_taken: bool,
) -> Result<ValidatedUser, ValidationErrors> {
    let mut errors = ValidationErrors::new(Entity::User);

    let email = match EmailAddress::new(&draft.email) {
        Ok(email) => Some(email),
        Err(_) => {
            errors.push(Field::Email, Violation::Blank);
            None
        }
    };
    if email.is_some() && email_taken {
        errors.push(Field::Email, Violation::Taken);
    }

    let password = draft
        .password
        .as_deref()
        .filter(|pw| !pw.is_empty());
    let confirmation = draft
        .password_confirmation
        .as_deref()
        .filter(|pw| !pw.is_empty());
    let changing_password = password_required || password.is_some() || confirmation.is_some();

    if changing_password {
        match password {
            None => errors.push(Field::Password, Violation::Blank),
            Some(pw) if pw.chars().count() < MIN_PASSWORD_LENGTH => errors.push(
                Field::Password,
                Violation::TooShort {
                    minimum: MIN_PASSWORD_LENGTH,
                },
            ),
            Some(_) => {}
        }
        match (password, confirmation) {
            (_, None) => errors.push(Field::PasswordConfirmation, Violation::Blank),
            (Some(pw), Some(conf)) if pw != conf => {
                errors.push(Field::PasswordConfirmation, Violation::ConfirmationMismatch);
            }
            _ => {}
        }
    }

    match email {
        Some(email) if errors.is_empty() => Ok(ValidatedUser {
            email,
            password: password
                .filter(|_| changing_password)
                .map(|pw| Zeroizing::new(pw.to_owned())),
        }),
        _ => Err(errors),
    }
}

/// Runs the validation rules against the live stores.
#[derive(Clone)]
pub struct ValidationEngine {
    users: Arc<dyn UserRepository>,
    tasks: Arc<dyn TaskRepository>,
}

impl ValidationEngine {
    pub fn new(users: Arc<dyn UserRepository>, tasks: Arc<dyn TaskRepository>) -> Self {
        Self { users, tasks }
    }

    /// Validate a task candidate. Violations become an `invalid_request`
    /// [`Error`]; store failures pass through unchanged.
    pub async fn validate_task(
        &self,
        draft: &TaskDraft,
        mode: ValidationMode<TaskId>,
    ) -> Result<TaskFields, Error> {
        let title_taken = if draft.title.trim().is_empty() {
            false
        } else {
            self.tasks
                .find_by_title(&draft.title)
                .await?
                .is_some_and(|holder| mode.conflicts_with(holder.id()))
        };
        check_task(draft, title_taken).map_err(Error::from)
    }

    /// Validate an account candidate.
    pub async fn validate_user(
        &self,
        draft: &UserDraft,
        mode: ValidationMode<UserId>,
    ) -> Result<ValidatedUser, Error> {
        let email_taken = match EmailAddress::new(&draft.email) {
            Ok(email) => self
                .users
                .find_by_email(&email)
                .await?
                .is_some_and(|holder| mode.conflicts_with(holder.id())),
            Err(_) => false,
        };
        let password_required = matches!(mode, ValidationMode::Create);
        check_user(draft, password_required, email_taken).map_err(Error::from)
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
