pub mod form;
pub mod models;
pub mod navigation;
pub mod splash;
pub mod stories;
pub mod ui;
