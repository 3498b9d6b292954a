pub mod cli;
pub mod collector;
pub mod compare;
pub mod error;
pub mod export;
pub mod github;
pub mod import;
pub mod oauth;
pub mod session;
pub mod sheets;
pub mod storage;
pub mod types;
