//! Well-known CMIP5 naming constants.
//!
//! Separators, markers and directory orderings shared by the file name and
//! path grammars.
//!
//! # Examples
//!
//! ```
//! use cmip5_types::well_known;
//!
//! assert_eq!(well_known::NETCDF_EXTENSION, ".nc");
//! assert!("g-global-ocn-areaavg".starts_with(well_known::GEOGRAPHIC_MARKER));
//! assert_eq!(well_known::CMOR_DIRECTORY_FIELDS.len(), 9);
//! assert_eq!(well_known::DATANODE_DIRECTORY_FIELDS.len(), 11);
//! ```

use crate::Cmip5Field;

// =============================================================================
// Separators
// =============================================================================

/// Separates the top-level segments of a file name.
pub const NAME_SEPARATOR: char = '_';

/// Separates the parts of a temporal segment (`t_start-t_end-suffix`).
pub const TEMPORAL_SEPARATOR: char = '-';

/// Separates directory segments in a path.
pub const PATH_SEPARATOR: char = '/';

/// Extension carried by every CMIP5 file name.
pub const NETCDF_EXTENSION: &str = ".nc";

/// Prefix marking a geographic subset segment.
pub const GEOGRAPHIC_MARKER: &str = "g-";

/// Prefix of a datanode publication version directory.
pub const VERSION_PREFIX: char = 'v';

// =============================================================================
// Directory layouts
// =============================================================================

/// Directory segments of a CMOR (local) path, outermost first.
///
/// `activity/product/institute/model/experiment/frequency/modeling_realm/variable_name/ensemble_member`
pub const CMOR_DIRECTORY_FIELDS: [Cmip5Field; 9] = [
    Cmip5Field::Activity,
    Cmip5Field::Product,
    Cmip5Field::Institute,
    Cmip5Field::Model,
    Cmip5Field::Experiment,
    Cmip5Field::Frequency,
    Cmip5Field::ModelingRealm,
    Cmip5Field::VariableName,
    Cmip5Field::EnsembleMember,
];

/// Directory segments of a datanode (archive) path, outermost first.
///
/// `activity/product/institute/model/experiment/frequency/modeling_realm/mip_table/ensemble_member/version_number/variable_name`
pub const DATANODE_DIRECTORY_FIELDS: [Cmip5Field; 11] = [
    Cmip5Field::Activity,
    Cmip5Field::Product,
    Cmip5Field::Institute,
    Cmip5Field::Model,
    Cmip5Field::Experiment,
    Cmip5Field::Frequency,
    Cmip5Field::ModelingRealm,
    Cmip5Field::MipTable,
    Cmip5Field::EnsembleMember,
    Cmip5Field::VersionNumber,
    Cmip5Field::VariableName,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layouts_share_leading_segments() {
        assert_eq!(CMOR_DIRECTORY_FIELDS[..7], DATANODE_DIRECTORY_FIELDS[..7]);
    }

    #[test]
    fn test_datanode_only_field() {
        assert!(!CMOR_DIRECTORY_FIELDS.contains(&Cmip5Field::VersionNumber));
        assert!(DATANODE_DIRECTORY_FIELDS.contains(&Cmip5Field::VersionNumber));
    }
}
