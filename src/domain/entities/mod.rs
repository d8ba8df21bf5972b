pub mod page;
pub mod post;
pub mod project;
