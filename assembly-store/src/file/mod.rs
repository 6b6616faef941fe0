mod store;

pub use store::FileSpecStore;
