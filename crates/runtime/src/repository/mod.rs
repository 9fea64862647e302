//! Document store adapters.

mod fields;
mod memory;

pub use fields::{actor_field, actor_fields};
pub use memory::InMemoryDocumentStore;
