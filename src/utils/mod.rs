pub mod args;
pub mod helpers;
pub mod platform;
