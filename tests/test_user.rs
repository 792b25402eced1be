#![allow(dead_code)]

use chrono::Utc;
use club_backend::{auth::password::hash_password, entities::user::{Role, User}};
use uuid::Uuid;

pub const ADMIN_PASSWORD: &str = "corner-lot-appraisal-42";

#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl TestUser {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password: ADMIN_PASSWORD.to_string(),
            role: Role::Member,
        }
    }

    pub fn admin(mut self) -> Self {
        self.role = Role::Admin;
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Row as the database would return it, with a real Argon2 hash.
    pub fn to_user(&self) -> User {
        let now = Utc::now();
        User {
            id: self.id,
            email: self.email.clone(),
            password_hash: hash_password(&self.password).expect("hashing works in tests"),
            role: self.role.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn admin_user() -> User {
    TestUser::new("admin@club.example").admin().to_user()
}

pub fn member_user() -> User {
    TestUser::new("member@club.example").to_user()
}
