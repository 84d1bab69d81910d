pub mod app;
pub mod events;
pub mod ui;
pub mod utils;
pub mod wheel;
