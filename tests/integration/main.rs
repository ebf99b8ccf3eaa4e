//! End-to-end tests against a real PostgreSQL database.
//!
//! Set `LOCKIN_TEST_DATABASE_URL` to run them; without it every test
//! returns early.

mod helpers;

mod auth_test;
mod group_test;
mod invite_test;
mod progress_test;
mod session_test;
