pub mod directory;
pub mod error;
pub mod event;
pub mod id;
pub mod pagination;
pub mod person;
pub mod store;
pub mod timestamp;
pub mod touchpoint;
