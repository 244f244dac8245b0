pub mod alignment;
pub mod weather;
pub mod window;
