//! Recording store adapters

mod fs_store;

pub use fs_store::FsRecordingStore;
