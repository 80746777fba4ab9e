pub mod actions;
pub mod app;
pub mod cell;
pub mod column_editor;
pub mod files;
pub mod row;
pub mod table;
pub mod toolbar;
