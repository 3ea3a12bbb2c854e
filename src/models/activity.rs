use serde::{Deserialize, Serialize};

/// A persisted generation summary joined with the owner's username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: i32,
    pub user_id: i32,
    pub username: String,
    /// `YYYY-MM-DD HH:MM:SS`, UTC.
    pub timestamp: String,
    pub base_name: String,
    pub base_ip: String,
    pub comment: String,
    pub start_number: i32,
    pub end_number: i32,
    pub password_length: i32,
    pub character_types: String,
    pub users_generated: i32,
}

/// Fields of a new activity row; id and timestamp are assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub user_id: i32,
    pub base_name: String,
    pub base_ip: String,
    pub comment: String,
    pub start_number: i32,
    pub end_number: i32,
    pub password_length: i32,
    pub character_types: String,
    pub users_generated: i32,
}

/// One page of activity entries, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityPage {
    pub items: Vec<ActivityEntry>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}
