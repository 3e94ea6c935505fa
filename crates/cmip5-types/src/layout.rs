//! CMIP5 directory layouts.

use crate::well_known::{CMOR_DIRECTORY_FIELDS, DATANODE_DIRECTORY_FIELDS};
use crate::Cmip5Field;

/// A directory layout a CMIP5 file can be placed in.
///
/// # Examples
///
/// ```
/// use cmip5_types::{Cmip5Field, PathLayout};
///
/// let layout = PathLayout::Datanode;
/// assert_eq!(layout.source_key(), "datanode_fp");
/// assert_eq!(layout.directory_fields().last(), Some(&Cmip5Field::VariableName));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PathLayout {
    /// Local path written by CMOR.
    Cmor,
    /// Archive path served by an ESGF datanode.
    Datanode,
}

impl PathLayout {
    /// Directory fields of this layout, outermost first.
    pub fn directory_fields(self) -> &'static [Cmip5Field] {
        match self {
            Self::Cmor => &CMOR_DIRECTORY_FIELDS,
            Self::Datanode => &DATANODE_DIRECTORY_FIELDS,
        }
    }

    /// Keyword used to construct a file from a path of this layout.
    pub fn source_key(self) -> &'static str {
        match self {
            Self::Cmor => "cmor_fp",
            Self::Datanode => "datanode_fp",
        }
    }

    /// Short lowercase name of the layout.
    pub fn name(self) -> &'static str {
        match self {
            Self::Cmor => "cmor",
            Self::Datanode => "datanode",
        }
    }
}

impl std::fmt::Display for PathLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
