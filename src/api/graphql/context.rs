use crate::domain::models::user::User;
use crate::error::AppError;

/// Per-request data attached to every GraphQL execution.
pub struct RequestContext {
    pub user: Option<User>,
}

impl RequestContext {
    pub fn new(user: Option<User>) -> Self {
        Self { user }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn require_user(&self) -> Result<&User, AppError> {
        self.user.as_ref().ok_or(AppError::Unauthenticated)
    }
}
