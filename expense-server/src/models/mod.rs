//! Domain models
//!
//! Expense rows, the role events stored alongside them, and the
//! validation errors raised while building either from user input.

pub mod validation;
pub mod expense;
pub mod role_event;

pub use validation::ValidationError;
pub use expense::{Expense, NewExpense, UserSummary};
pub use role_event::{RoleEvent, BECOME_HANDLER_EVENT, HANDLER_ROLE, ROLE_CHANGE_EVENT};
