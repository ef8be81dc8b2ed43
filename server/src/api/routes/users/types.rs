//! User API types

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::types::User;

/// User account for API responses, with profile fields flattened
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    pub country: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    /// `null` when the stored timestamp is out of range
    pub date_joined: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        let (name, country) = match user.profile {
            Some(profile) => (Some(profile.name), profile.country),
            None => (None, None),
        };
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            name,
            country,
            is_active: user.is_active,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            date_joined: DateTime::from_timestamp(user.date_joined, 0),
        }
    }
}
