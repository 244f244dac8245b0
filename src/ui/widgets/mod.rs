pub mod current;
pub mod forecast;
