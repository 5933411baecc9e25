/// Authorization module for post-service
///
/// Ownership is a capability check taking (caller identity, resource
/// owner) so a future policy engine can replace the comparison without
/// touching handlers.
use crate::error::AppError;
use uuid::Uuid;

/// Result type for permission checks
pub type PermissionResult = Result<(), AppError>;

/// Check that the caller owns the resource.
///
/// `denial_msg` is the user-facing message when the check fails; each
/// route carries its own wording.
pub fn ensure_owner(caller: Uuid, owner: Uuid, denial_msg: &str) -> PermissionResult {
    if caller == owner {
        Ok(())
    } else {
        Err(AppError::Unauthorized(denial_msg.to_string()))
    }
}

/// Only the author can delete their post
pub fn check_post_deletion(caller: Uuid, post_owner: Uuid) -> PermissionResult {
    ensure_owner(caller, post_owner, "User not authorized")
}

/// Only the author can delete their comment
pub fn check_comment_deletion(caller: Uuid, comment_owner: Uuid) -> PermissionResult {
    ensure_owner(
        caller,
        comment_owner,
        "User is unauthorised to delete this comment",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{error::ResponseError, http::StatusCode};

    #[test]
    fn owner_passes_check() {
        let user = Uuid::new_v4();
        assert!(check_post_deletion(user, user).is_ok());
        assert!(check_comment_deletion(user, user).is_ok());
    }

    #[test]
    fn non_owner_is_rejected_with_401() {
        let caller = Uuid::new_v4();
        let owner = Uuid::new_v4();

        let err = check_post_deletion(caller, owner).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(format!("{}", err), "User not authorized");

        let err = check_comment_deletion(caller, owner).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            format!("{}", err),
            "User is unauthorised to delete this comment"
        );
    }
}
