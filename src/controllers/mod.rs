pub mod health;
pub mod story;
