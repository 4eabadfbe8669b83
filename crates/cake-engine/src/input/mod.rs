pub mod hand;
pub mod queue;
