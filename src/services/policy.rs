//! Role-based authorization for every guarded operation.
//!
//! Handlers never compare roles themselves; they name the [`Action`] they
//! are about to perform and call [`authorize`].

use crate::error::ApiError;
use crate::models::{Role, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateResource,
    Comment,
    Review,
    UpdateProfile,
    ViewDashboard,
    ModerateResource,
    ListAllResources,
    ViewUnpublished,
    ViewAdminStats,
    DeleteResource,
    ListUsers,
}

/// Whether `role` may perform `action`.
pub fn permits(role: Role, action: Action) -> bool {
    match action {
        Action::CreateResource
        | Action::Comment
        | Action::Review
        | Action::UpdateProfile
        | Action::ViewDashboard => true,
        Action::ModerateResource
        | Action::ListAllResources
        | Action::ViewUnpublished
        | Action::ViewAdminStats => role.is_staff(),
        Action::DeleteResource | Action::ListUsers => role == Role::Admin,
    }
}

/// Returns the acting user when allowed.
///
/// No user is `Unauthorized`; a user whose role does not cover the action
/// is `Forbidden`.
pub fn authorize(user: Option<&User>, action: Action) -> Result<&User, ApiError> {
    let user = user.ok_or_else(ApiError::authentication_required)?;

    if permits(user.role(), action) {
        Ok(user)
    } else {
        Err(ApiError::Forbidden("Insufficient permissions".to_string()))
    }
}
