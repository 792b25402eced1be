pub mod contact;
pub mod event;
pub mod gallery;
pub mod media;
pub mod membership;
pub mod stats;
pub mod team_member;
pub mod token;
pub mod user;
