pub mod diagram;
pub mod newsfeed;
pub mod tooltip;
