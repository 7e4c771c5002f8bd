//! Role events recorded as zero-cost expense rows
//!
//! Role changes and handler grants share the `expenses` table with real
//! expenses. The `event_name` column marks them and `role` holds the
//! target role.

use super::NewExpense;

/// Event name marking a role change row
pub const ROLE_CHANGE_EVENT: &str = "Role Change";

/// Event name marking a handler grant row
pub const BECOME_HANDLER_EVENT: &str = "Become Handler";

/// Role assigned by a handler grant
pub const HANDLER_ROLE: &str = "handler";

/// A role event for one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleEvent {
    /// User moved to an arbitrary role
    RoleChange { role: String },
    /// User proved the handler secret
    BecomeHandler,
}

impl RoleEvent {
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::RoleChange { .. } => ROLE_CHANGE_EVENT,
            Self::BecomeHandler => BECOME_HANDLER_EVENT,
        }
    }

    pub fn role(&self) -> &str {
        match self {
            Self::RoleChange { role } => role,
            Self::BecomeHandler => HANDLER_ROLE,
        }
    }

    /// Build the row for this event. `name` falls back to the email.
    pub fn to_expense(&self, user_email: String, name: Option<String>) -> NewExpense {
        let name = name.unwrap_or_else(|| user_email.clone());
        NewExpense {
            user_email,
            event_name: self.event_name().to_owned(),
            cost: 0.0,
            name: Some(name),
            role: Some(self.role().to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_change_keeps_requested_role() {
        let row = RoleEvent::RoleChange { role: "admin".into() }
            .to_expense("a@x.com".into(), Some("A".into()));

        assert_eq!(row.event_name, ROLE_CHANGE_EVENT);
        assert_eq!(row.cost, 0.0);
        assert_eq!(row.name.as_deref(), Some("A"));
        assert_eq!(row.role.as_deref(), Some("admin"));
    }

    #[test]
    fn become_handler_fixes_role_and_defaults_name() {
        let row = RoleEvent::BecomeHandler.to_expense("h@x.com".into(), None);

        assert_eq!(row.event_name, BECOME_HANDLER_EVENT);
        assert_eq!(row.name.as_deref(), Some("h@x.com"));
        assert_eq!(row.role.as_deref(), Some(HANDLER_ROLE));
    }
}
