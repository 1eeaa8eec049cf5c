//! Ownership-based access control.
//!
//! [`evaluate`] is a pure decision over the acting identity and the intent.
//! Reading tasks is public; everything else needs a signed-in actor, and
//! touching a task or profile further needs the actor to be its owner.

use serde_json::json;

use super::{Error, UserId};

/// Redirect target for anonymous callers.
pub const LOGIN_PATH: &str = "/login";
/// Redirect target for callers that are signed in but not the owner.
pub const TASK_LIST_PATH: &str = "/";

/// What the caller is trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent<'a> {
    ViewTasks,
    ViewTask,
    /// Includes opening the new-task form.
    CreateTask,
    /// Edit or delete a task, including opening its edit form.
    ModifyTask { owner: &'a UserId },
    ViewProfile { user: &'a UserId },
    EditProfile { user: &'a UserId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    LoginRequired,
    Forbidden,
}

impl Denial {
    pub fn message(self) -> &'static str {
        match self {
            Self::LoginRequired => "Login required",
            Self::Forbidden => "Forbidden access.",
        }
    }

    pub fn redirect_to(self) -> &'static str {
        match self {
            Self::LoginRequired => LOGIN_PATH,
            Self::Forbidden => TASK_LIST_PATH,
        }
    }
}

impl From<Denial> for Error {
    fn from(denial: Denial) -> Self {
        let error = match denial {
            Denial::LoginRequired => Self::unauthorized(denial.message()),
            Denial::Forbidden => Self::forbidden(denial.message()),
        };
        error.with_details(json!({ "redirectTo": denial.redirect_to() }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Denial),
}

impl Decision {
    /// Convert into a `Result` for `?` propagation.
    pub fn into_result(self) -> Result<(), Denial> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(denial) => Err(denial),
        }
    }
}

/// Decide whether `actor` may carry out `intent`.
///
/// # Examples
/// ```
/// use taskboard::domain::UserId;
/// use taskboard::domain::access::{evaluate, Decision, Denial, Intent};
///
/// let owner = UserId::random();
/// let other = UserId::random();
/// let intent = Intent::ModifyTask { owner: &owner };
/// assert_eq!(evaluate(Some(&owner), intent), Decision::Allow);
/// assert_eq!(evaluate(Some(&other), intent), Decision::Deny(Denial::Forbidden));
/// assert_eq!(evaluate(None, intent), Decision::Deny(Denial::LoginRequired));
/// ```
pub fn evaluate(actor: Option<&UserId>, intent: Intent<'_>) -> Decision {
    let owner = match intent {
        Intent::ViewTasks | Intent::ViewTask => return Decision::Allow,
        Intent::CreateTask => None,
        Intent::ModifyTask { owner } => Some(owner),
        Intent::ViewProfile { user } | Intent::EditProfile { user } => Some(user),
    };
    match (actor, owner) {
        (None, _) => Decision::Deny(Denial::LoginRequired),
        (Some(_), None) => Decision::Allow,
        (Some(actor), Some(owner)) if actor == owner => Decision::Allow,
        (Some(_), Some(_)) => Decision::Deny(Denial::Forbidden),
    }
}

/// [`evaluate`], as a `Result` carrying the domain error for a denial.
pub fn authorize(actor: Option<&UserId>, intent: Intent<'_>) -> Result<(), Error> {
    evaluate(actor, intent).into_result().map_err(|denial| {
        tracing::warn!(?intent, reason = denial.message(), "access denied");
        Error::from(denial)
    })
}

/// Demand a signed-in actor, without any ownership check.
pub fn require_identity(actor: Option<&UserId>) -> Result<&UserId, Error> {
    actor.ok_or_else(|| {
        tracing::warn!(reason = Denial::LoginRequired.message(), "access denied");
        Error::from(Denial::LoginRequired)
    })
}
