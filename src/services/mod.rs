pub mod workflow;
pub mod search;
pub mod dashboard;
pub mod booking;
pub mod accounts;
pub mod admin;
pub mod mobile;
