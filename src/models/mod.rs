pub mod announcement;
pub mod committee;
pub mod grading;
pub mod progress;
pub mod roster;
pub mod stats;
pub mod thesis;
pub mod topic;
pub mod user;
