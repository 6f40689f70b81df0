pub mod app;
pub mod mode;
pub mod navigator;
