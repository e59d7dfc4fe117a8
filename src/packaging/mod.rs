//! Deposit package assembly
//!
//! One package per dispatch run: a metadata document plus a zip archive of
//! the submission's content files, written to a scoped working directory.

pub mod metadata;
pub mod package_builder;

pub use metadata::DepositMetadata;
pub use package_builder::{
    ARCHIVE_FILENAME, DepositPackage, METADATA_FILENAME, PackageBuilder,
};
