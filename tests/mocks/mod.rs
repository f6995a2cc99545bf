//! Shared test doubles and sample data.

#![allow(dead_code)]

mod mock_contact_repository;

pub use mock_contact_repository::MockContactRepository;

use contactos_mcp_server::models::ContactInput;
use contactos_mcp_server::services::ContactServiceImpl;
use contactos_mcp_server::Metrics;
use std::sync::Arc;

/// The reference contact used across the suite.
pub fn ana() -> ContactInput {
    ContactInput::new("Ana", "12345678901", "ana@test.cl", "Calle 1")
}

/// Create a sample contact input with the given name and email.
pub fn sample_input(name: &str, email: &str) -> ContactInput {
    ContactInput::new(name, "5550000", email, "Av. Siempre Viva 742")
}

/// A service wired to a fresh mock repository.
pub fn service_with_mock() -> (ContactServiceImpl, MockContactRepository) {
    let repo = MockContactRepository::new();
    let service = ContactServiceImpl::new(Arc::new(repo.clone()), Metrics::new());
    (service, repo)
}
