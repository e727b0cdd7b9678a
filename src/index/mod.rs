// Index module: composite-key lookup over loaded side-file rows
pub mod attributes;
pub mod metadata_index;

pub use attributes::AttributeSource;
pub use metadata_index::{MetadataIndex, PayloadMap};
