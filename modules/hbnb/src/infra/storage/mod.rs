//! Storage adapters implementing the domain `Repository` port.

pub mod memory;

pub use memory::InMemoryRepository;
