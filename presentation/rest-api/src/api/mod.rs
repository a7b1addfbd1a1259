pub mod error;
pub mod health;
pub mod recommendation;
pub mod restaurant;
pub mod tags;
