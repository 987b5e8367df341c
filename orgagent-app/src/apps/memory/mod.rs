mod store;
pub use store::MemoryStore;
