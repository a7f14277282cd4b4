pub mod candidates;
pub mod count;
pub mod state;
