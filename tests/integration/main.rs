//! HTTP integration tests: the real router over a temp-dir content store
//! and the in-memory metadata store.

mod health_test;
mod helpers;
mod items_test;
mod upload_test;
