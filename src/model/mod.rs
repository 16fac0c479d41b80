pub mod game_state;
pub mod inventory;
pub mod operation;
pub mod outcome;
pub mod player;
pub mod quest;
pub mod settings;
pub mod spell;
