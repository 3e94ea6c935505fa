//! # cmip5-types
//!
//! Type definitions for CMIP5 file name and directory metadata.
//!
//! This crate provides the record type shared by the CMIP5 naming codec:
//! the metadata fields a file name or path encodes, the closed set of field
//! names, and the two directory layouts (CMOR and datanode).
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use cmip5_types::{Cmip5Field, Cmip5Meta, PathLayout};
//! use cmip5_types::well_known;
//!
//! let meta = Cmip5Meta {
//!     variable_name: Some("tas".to_string()),
//!     ensemble_member: Some("r3i2p1".to_string()),
//!     ..Default::default()
//! };
//!
//! assert!(meta.is_set(Cmip5Field::VariableName));
//! assert_eq!(PathLayout::Cmor.directory_fields(), &well_known::CMOR_DIRECTORY_FIELDS);
//! ```
//!
//! ## Without Serde
//!
//! ```toml
//! [dependencies]
//! cmip5-types = { version = "0.1", default-features = false }
//! ```

#![warn(missing_docs)]

mod field;
mod layout;
mod meta;
pub mod well_known;

// Re-export all public types at crate root
pub use field::{Cmip5Field, UnknownFieldError};
pub use layout::PathLayout;
pub use meta::Cmip5Meta;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_are_exported() {
        let _meta = Cmip5Meta::new();
        let _field = Cmip5Field::EnsembleMember;
        let _layout = PathLayout::Cmor;
        assert_eq!(well_known::GEOGRAPHIC_MARKER, "g-");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let meta = Cmip5Meta {
            variable_name: Some("tas".to_string()),
            mip_table: Some("Amon".to_string()),
            model: Some("HADCM3".to_string()),
            experiment: Some("decadal1990".to_string()),
            ensemble_member: Some("r3i2p1".to_string()),
            t_start: Some("19710201".to_string()),
            t_end: Some("19710214".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string(&meta).unwrap();
        assert!(!json.contains("geographical_info"));
        let parsed: Cmip5Meta = serde_json::from_str(&json).unwrap();
        assert_eq!(meta, parsed);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_rejects_unknown_field() {
        let json = r#"{"variable_name":"tas","bad_arg":"whoops"}"#;
        assert!(serde_json::from_str::<Cmip5Meta>(json).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_field_names() {
        assert_eq!(
            serde_json::to_string(&Cmip5Field::TStart).unwrap(),
            "\"t_start\""
        );
        assert_eq!(
            serde_json::to_string(&PathLayout::Datanode).unwrap(),
            "\"datanode\""
        );
    }
}
