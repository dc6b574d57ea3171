pub mod backends;
pub mod presenters;
pub mod storage;
