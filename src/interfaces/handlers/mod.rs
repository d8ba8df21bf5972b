pub mod home;
pub mod pages;
pub mod posts;
pub mod projects;
pub mod system;
