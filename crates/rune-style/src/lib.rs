//! Style data model and driver classification for Rune animated layers.
//!
//! A style input is flattened into one ordered mapping, then every key is
//! routed to the fast driver, the general driver and/or the static bucket
//! according to fixed property tables.

mod diagnostics;
mod flatten;
mod partition;
mod tables;
mod types;

pub use diagnostics::diagnostics_enabled;
pub use flatten::{flatten, is_numeric_key};
pub use partition::{StylePartition, filter_bucket, filter_style, partition};
pub use tables::{
    Bucket, BucketSet, ClassificationTable, FAST_DRIVER_SET, GENERAL_EXCLUDE_EXTRAS,
    STATIC_EXCLUDE_EXTRAS, classify_key, is_fast_driver_property, is_general_excluded_property,
    is_static_excluded_property,
};
pub use types::{
    InvalidStyleInput, StyleInput, StyleMapping, StyleValue, deserialize_optional_style,
};
