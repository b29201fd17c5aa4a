pub mod home;
pub mod newsfeed;
pub mod not_found;
