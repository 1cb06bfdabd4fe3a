pub mod admin;
pub mod contact;
pub mod enquiries;
pub mod events;
pub mod investments;
pub mod projects;
pub mod properties;
pub mod rentals;
pub mod schemas;
pub mod uploads;
pub mod users;
