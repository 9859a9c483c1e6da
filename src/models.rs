pub mod chat;
pub mod command;
pub mod config;
pub mod game;
pub mod quest;
pub mod role;
pub mod vote;
