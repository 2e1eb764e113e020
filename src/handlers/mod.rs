pub mod accounts;
pub mod attendees;
pub mod dashboard;
pub mod pages;
