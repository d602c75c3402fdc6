//! # Authenticated Principal
//!
//! The engine never consults ambient session state. Every call receives an
//! explicit [`Principal`] - the identity the (excluded) API layer
//! authenticated - and authorizes by inspecting its [`Role`].
//!
//! ## Roles
//! - `Owner` runs the till: records sales, takes credit payments, reads
//!   reports and store data.
//! - `Admin` can do everything an owner can, plus read the audit trail
//!   and manage users (user management itself lives outside this
//!   workspace).

use serde::{Deserialize, Serialize};

/// Access level of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Owner,
    Admin,
}

/// An authenticated identity passed into every engine operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Id of the authenticated user row.
    pub user_id: String,
    /// Username, carried along for audit log events.
    pub username: String,
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>, role: Role) -> Self {
        Principal {
            user_id: user_id.into(),
            username: username.into(),
            role,
        }
    }

    /// Whether this principal may operate the till (sales, credits,
    /// reports, store data). Both roles qualify.
    pub fn can_operate(&self) -> bool {
        matches!(self.role, Role::Owner | Role::Admin)
    }

    /// Whether this principal may read the audit trail. Admin only.
    pub fn can_audit(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_operates_but_does_not_audit() {
        let p = Principal::new("u-1", "aling-nena", Role::Owner);
        assert!(p.can_operate());
        assert!(!p.can_audit());
    }

    #[test]
    fn test_admin_does_both() {
        let p = Principal::new("u-2", "admin", Role::Admin);
        assert!(p.can_operate());
        assert!(p.can_audit());
    }
}
