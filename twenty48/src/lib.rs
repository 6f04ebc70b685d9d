pub mod board;
pub mod board_ui;
pub mod input;
pub mod playtest;
pub mod settings;
pub mod state;
