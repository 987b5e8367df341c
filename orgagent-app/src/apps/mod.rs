mod identity;
pub use identity::StaticIdentity;

mod memory;
pub use memory::MemoryStore;
