pub mod app;
pub mod dialog;
pub mod input;
pub mod layout;
pub mod render;
pub mod theme;
pub mod viewport;

pub use app::run;
