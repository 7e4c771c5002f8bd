//! Route handlers organized by resource

pub mod health;
pub mod expenses;
pub mod roles;
pub mod users;

use serde::Serialize;

/// Acknowledgement body: `{"ok": true}`, plus the new row id for role events
#[derive(Debug, Serialize)]
pub struct Ack {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl Ack {
    pub fn ok() -> Self {
        Self { ok: true, id: None }
    }

    pub fn created(id: i64) -> Self {
        Self { ok: true, id: Some(id) }
    }
}
