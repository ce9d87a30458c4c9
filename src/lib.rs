pub mod batch;
pub mod config;
pub mod id;
pub mod logging;
pub mod progress;
pub mod request;
pub mod retry;
pub mod storage;
pub mod transfer;
pub mod url_model;

mod scheduler;
