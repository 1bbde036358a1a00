//! REST API tests, driven through the router with in-memory stores.

mod auth_tests;
mod file_tests;
mod health_tests;
