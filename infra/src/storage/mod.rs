//! Upload storage for profile images

mod fs_storage;

pub use fs_storage::FsObjectStorage;
