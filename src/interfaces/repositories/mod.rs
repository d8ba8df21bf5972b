pub mod content;
pub mod profile;
