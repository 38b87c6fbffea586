pub mod footer;
pub mod help;
pub mod main_view;
pub mod popup;
pub mod theme;
