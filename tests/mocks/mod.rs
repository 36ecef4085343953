//! In-memory test doubles and fixtures shared by the integration tests.

#![allow(dead_code)]

mod fixtures;
mod mock_contact_repository;

pub use fixtures::*;
pub use mock_contact_repository::MockContactRepository;
