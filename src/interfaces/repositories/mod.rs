pub mod contact;
pub mod event;
pub mod gallery;
pub mod media_store;
pub mod membership;
pub mod sqlx_repo;
pub mod stats;
pub mod team;
pub mod token;
pub mod user;
