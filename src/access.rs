//! Role classification and the static permission table.
//!
//! Roles gate the dashboards; named permissions gate book mutations. The
//! role-to-permission grants live in one process-wide table built at first
//! use, not in the database.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::models::user::{Role, UserClaims};

/// Named capability for book mutations, distinct from roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    AddBook,
    ChangeBook,
    DeleteBook,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::AddBook => "can_add_book",
            Permission::ChangeBook => "can_change_book",
            Permission::DeleteBook => "can_delete_book",
        }
    }
}

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::AddBook,
    Permission::ChangeBook,
    Permission::DeleteBook,
];
const LIBRARIAN_PERMISSIONS: &[Permission] = &[Permission::AddBook, Permission::ChangeBook];
const MEMBER_PERMISSIONS: &[Permission] = &[];

static ROLE_PERMISSIONS: Lazy<HashMap<Role, &'static [Permission]>> = Lazy::new(|| {
    let mut table: HashMap<Role, &'static [Permission]> = HashMap::new();
    table.insert(Role::Admin, ADMIN_PERMISSIONS);
    table.insert(Role::Librarian, LIBRARIAN_PERMISSIONS);
    table.insert(Role::Member, MEMBER_PERMISSIONS);
    table
});

/// Permissions granted to a role
pub fn permissions_for(role: Role) -> &'static [Permission] {
    ROLE_PERMISSIONS.get(&role).copied().unwrap_or(&[])
}

/// Whether the caller holds the named permission. Unauthenticated callers
/// and callers without a profile hold none.
pub fn has_permission(who: Option<&UserClaims>, permission: Permission) -> bool {
    who.and_then(|claims| claims.role)
        .map(|role| permissions_for(role).contains(&permission))
        .unwrap_or(false)
}

/// Whether the caller is an authenticated Admin
pub fn is_admin(who: Option<&UserClaims>) -> bool {
    matches!(who, Some(claims) if claims.role == Some(Role::Admin))
}

/// Whether the caller is an authenticated Librarian
pub fn is_librarian(who: Option<&UserClaims>) -> bool {
    matches!(who, Some(claims) if claims.role == Some(Role::Librarian))
}

/// Whether the caller is an authenticated Member
pub fn is_member(who: Option<&UserClaims>) -> bool {
    matches!(who, Some(claims) if claims.role == Some(Role::Member))
}
