#[path = "../common/mod.rs"]
mod common;

mod concurrency;
mod directory;
mod failures;
mod scenario;
mod transport;
