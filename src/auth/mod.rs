//! Login, token issuance and request authentication for the dashboard.

pub mod extract;
pub mod password;
pub mod token;

use crate::entity::users;

/// Result of checking a login against the credential store, before the
/// audit row is written. `user_id` is `None` when the email matched no
/// account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub user_id: Option<i32>,
    pub success: bool,
    pub reason: Option<&'static str>,
}

/// Decides a login attempt. Every call maps to exactly one audit row, so
/// the outcome carries everything that row needs.
pub fn login_outcome(user: Option<&users::Model>, supplied_password: &str) -> LoginOutcome {
    let Some(user) = user else {
        return LoginOutcome {
            user_id: None,
            success: false,
            reason: Some("unknown email"),
        };
    };

    if !user.is_active {
        return LoginOutcome {
            user_id: Some(user.id),
            success: false,
            reason: Some("account disabled"),
        };
    }

    if !password::verify(supplied_password, &user.password) {
        return LoginOutcome {
            user_id: Some(user.id),
            success: false,
            reason: Some("wrong password"),
        };
    }

    LoginOutcome {
        user_id: Some(user.id),
        success: true,
        reason: None,
    }
}
