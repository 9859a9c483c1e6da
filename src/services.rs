pub mod game_service;
pub mod ledger;
pub mod messenger;
