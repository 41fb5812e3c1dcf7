pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod runtime;
pub mod snake;
pub mod ui;
