mod json_file_contact_repository;
mod memory_contact_repository;
mod table;
mod traits;

pub use json_file_contact_repository::JsonFileContactRepository;
pub use memory_contact_repository::InMemoryContactRepository;
pub use traits::ContactRepository;
