pub mod app;
pub mod console;
pub mod convert;
pub mod effects;
pub mod logging;
