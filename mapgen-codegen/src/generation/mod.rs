//! Output management: import collection and file registration.

mod imports;
mod registry;

pub use imports::{DEFAULT_IMPORT_PACKAGES, ImportSet, is_default_import, local_name};
pub use registry::{FileCategory, FileEntry, FileRegistry, PreviewEntry, WriteStats};
