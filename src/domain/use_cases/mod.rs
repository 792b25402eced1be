pub mod auth;
pub mod contact;
pub mod events;
pub mod extractors;
pub mod gallery;
pub mod media;
pub mod membership;
pub mod stats;
pub mod team;
pub mod upload_gate;
