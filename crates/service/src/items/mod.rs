//! Items module: three-layer architecture (domain, repository, service).
//!
//! `memory` holds the in-memory store backing the HTTP server.

pub mod domain;
pub mod memory;
pub mod repository;
pub mod service;

pub use domain::{Item, NewItem};
pub use memory::MemoryItemStore;
pub use repository::ItemRepository;
pub use service::ItemService;
