pub mod auth;
pub mod contact;
pub mod events;
pub mod gallery;
pub mod home;
pub mod membership;
pub mod multipart;
pub mod stats;
pub mod system;
pub mod team;
