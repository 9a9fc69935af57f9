pub mod action;
pub mod deal;
pub mod error;
pub mod refutation;
pub mod serialization;
pub mod state;
