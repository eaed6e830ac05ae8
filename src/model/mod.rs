pub mod killmail;
pub mod participant;
pub mod story;
pub mod summary;
