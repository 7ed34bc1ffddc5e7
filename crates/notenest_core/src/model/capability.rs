//! Role and capability declarations consumed by the notes controller.
//!
//! The controller never derives permissions itself; hosts pass a
//! `Capabilities` value (directly or through a `PermissionsProvider`) at
//! composition time.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Boolean permission set gating note actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub can_create_note: bool,
    pub can_delete_note: bool,
    pub is_viewer: bool,
}

impl Capabilities {
    /// Read-only access.
    pub const fn viewer() -> Self {
        Self {
            can_create_note: false,
            can_delete_note: false,
            is_viewer: true,
        }
    }

    /// Full note access.
    pub const fn editor() -> Self {
        Self {
            can_create_note: true,
            can_delete_note: true,
            is_viewer: false,
        }
    }

    /// Whether per-note edit/delete affordances are shown at all.
    pub fn shows_item_actions(self) -> bool {
        !self.is_viewer
    }

    /// Whether a note may be staged for deletion.
    pub fn may_delete(self) -> bool {
        self.can_delete_note && !self.is_viewer
    }
}

/// Supplies the capability set for the current user.
pub trait PermissionsProvider {
    fn capabilities(&self) -> Capabilities;
}

impl PermissionsProvider for Capabilities {
    fn capabilities(&self) -> Capabilities {
        *self
    }
}

/// Workspace role selected for the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserRole {
    Viewer,
    Editor,
    Admin,
}

/// Role string for viewers.
pub const USER_ROLE_VIEWER: &str = "viewer";
/// Role string for editors.
pub const USER_ROLE_EDITOR: &str = "editor";
/// Role string for admins.
pub const USER_ROLE_ADMIN: &str = "admin";

impl UserRole {
    /// Stable string id.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => USER_ROLE_VIEWER,
            Self::Editor => USER_ROLE_EDITOR,
            Self::Admin => USER_ROLE_ADMIN,
        }
    }

    /// Only admins reach the management screen.
    pub fn can_access_management(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl PermissionsProvider for UserRole {
    fn capabilities(&self) -> Capabilities {
        match self {
            Self::Viewer => Capabilities::viewer(),
            Self::Editor | Self::Admin => Capabilities::editor(),
        }
    }
}

/// Parses a role from its string id. Surrounding whitespace is ignored,
/// case is not.
pub fn parse_user_role(value: &str) -> Result<UserRole, RoleParseError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(RoleParseError::EmptyRole);
    }

    match normalized {
        USER_ROLE_VIEWER => Ok(UserRole::Viewer),
        USER_ROLE_EDITOR => Ok(UserRole::Editor),
        USER_ROLE_ADMIN => Ok(UserRole::Admin),
        other => Err(RoleParseError::UnsupportedRole(other.to_string())),
    }
}

/// Role parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleParseError {
    EmptyRole,
    UnsupportedRole(String),
}

impl Display for RoleParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRole => write!(f, "user role must not be empty"),
            Self::UnsupportedRole(value) => {
                write!(f, "user role is unsupported: {value}; expected viewer|editor|admin")
            }
        }
    }
}

impl Error for RoleParseError {}
