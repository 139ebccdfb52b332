pub mod auth;
pub mod backlog;
pub mod completed;
pub mod games;
pub mod users;
