//! CMIP5 metadata field names.
//!
//! This module provides the closed set of fields a CMIP5 file record can
//! carry. Every dynamic (string keyed) construction or update goes through
//! [`Cmip5Field::from_name`], so unknown names are rejected up front.

/// Error returned when a string does not name a known CMIP5 field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldError(
    /// The unrecognized name.
    pub String,
);

impl std::fmt::Display for UnknownFieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown CMIP5 field: '{}'", self.0)
    }
}

impl std::error::Error for UnknownFieldError {}

/// A field of a CMIP5 file record.
///
/// The first ten variants are encoded in the file name itself, the rest are
/// directory (path context) fields used only by the CMOR and datanode path
/// layouts.
///
/// # Examples
///
/// ```
/// use cmip5_types::Cmip5Field;
///
/// let field = Cmip5Field::from_name("mip_table");
/// assert_eq!(field, Some(Cmip5Field::MipTable));
/// assert!(Cmip5Field::MipTable.is_required());
/// assert_eq!(Cmip5Field::from_name("bad_arg"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Cmip5Field {
    /// Short variable code, e.g. `tas`.
    VariableName,
    /// MIP table, e.g. `Amon`.
    MipTable,
    /// Model identifier, e.g. `HADCM3`.
    Model,
    /// Experiment identifier, e.g. `decadal1990`.
    Experiment,
    /// Ensemble member, e.g. `r3i2p1`.
    EnsembleMember,
    /// Start of the temporal range.
    TStart,
    /// End of the temporal range.
    TEnd,
    /// Qualifier appended to the temporal range, e.g. `clim`.
    TemporalSuffix,
    /// Pre-composed temporal segment overriding the discrete temporal fields.
    TemporalSubset,
    /// Geographic subset token, e.g. `g-lat20S20Nlon170W130W`.
    GeographicalInfo,
    /// Activity directory, e.g. `CMIP5`.
    Activity,
    /// Product directory, e.g. `output1`.
    Product,
    /// Institute directory, e.g. `MOHC`.
    Institute,
    /// Frequency directory, e.g. `mon`.
    Frequency,
    /// Modeling realm directory, e.g. `atmos`.
    ModelingRealm,
    /// Publication version directory (datanode only), e.g. `v20110101`.
    VersionNumber,
}

impl Cmip5Field {
    /// All fields in canonical order.
    pub const ALL: [Cmip5Field; 16] = [
        Self::VariableName,
        Self::MipTable,
        Self::Model,
        Self::Experiment,
        Self::EnsembleMember,
        Self::TStart,
        Self::TEnd,
        Self::TemporalSuffix,
        Self::TemporalSubset,
        Self::GeographicalInfo,
        Self::Activity,
        Self::Product,
        Self::Institute,
        Self::Frequency,
        Self::ModelingRealm,
        Self::VersionNumber,
    ];

    /// Fields that must be present to render a file name.
    pub const REQUIRED: [Cmip5Field; 5] = [
        Self::VariableName,
        Self::MipTable,
        Self::Model,
        Self::Experiment,
        Self::EnsembleMember,
    ];

    /// Returns the field's keyword name.
    pub fn name(self) -> &'static str {
        match self {
            Self::VariableName => "variable_name",
            Self::MipTable => "mip_table",
            Self::Model => "model",
            Self::Experiment => "experiment",
            Self::EnsembleMember => "ensemble_member",
            Self::TStart => "t_start",
            Self::TEnd => "t_end",
            Self::TemporalSuffix => "temporal_suffix",
            Self::TemporalSubset => "temporal_subset",
            Self::GeographicalInfo => "geographical_info",
            Self::Activity => "activity",
            Self::Product => "product",
            Self::Institute => "institute",
            Self::Frequency => "frequency",
            Self::ModelingRealm => "modeling_realm",
            Self::VersionNumber => "version_number",
        }
    }

    /// Looks up a field by its keyword name.
    ///
    /// Returns `None` if the name is not in the closed set.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.name() == name)
    }

    /// Returns true if the field is required to render a file name.
    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

}

impl std::fmt::Display for Cmip5Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Cmip5Field {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}
