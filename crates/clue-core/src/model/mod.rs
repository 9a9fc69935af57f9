pub mod card;
pub mod catalog;
pub mod hand;
pub mod notebook;
pub mod player;
pub mod triple;
