pub mod job;
pub mod skill;
pub mod user;
