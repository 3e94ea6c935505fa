//! CMIP5 metadata record.
//!
//! This module provides the `Cmip5Meta` struct holding every field a CMIP5
//! file name or path can encode.

use crate::Cmip5Field;

/// Metadata carried by a CMIP5 file name and its directory path.
///
/// Every field is optional: a record parsed from a bare file name has no
/// path context, and a field may be cleared after construction. Whether a
/// record is complete enough to render is checked at render time.
///
/// # Examples
///
/// ```
/// use cmip5_types::{Cmip5Field, Cmip5Meta};
///
/// let mut meta = Cmip5Meta {
///     variable_name: Some("tas".to_string()),
///     mip_table: Some("Amon".to_string()),
///     ..Default::default()
/// };
///
/// assert_eq!(meta.get(Cmip5Field::VariableName), Some("tas"));
/// meta.set(Cmip5Field::VariableName, Some("pr".to_string()));
/// assert_eq!(meta.variable_name.as_deref(), Some("pr"));
/// assert_eq!(meta.missing(&Cmip5Field::REQUIRED).len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Cmip5Meta {
    /// Short variable code, e.g. `tas`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub variable_name: Option<String>,
    /// MIP table, e.g. `Amon`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub mip_table: Option<String>,
    /// Model identifier, e.g. `HADCM3`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub model: Option<String>,
    /// Experiment identifier, e.g. `decadal1990`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub experiment: Option<String>,
    /// Ensemble member, e.g. `r3i2p1`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub ensemble_member: Option<String>,
    /// Start of the temporal range, e.g. `19710201`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub t_start: Option<String>,
    /// End of the temporal range, e.g. `19710214`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub t_end: Option<String>,
    /// Qualifier appended to the temporal range, e.g. `avg`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub temporal_suffix: Option<String>,
    /// Whole temporal segment, e.g. `199001-199012-clim`.
    ///
    /// When set, it is rendered instead of `t_start`, `t_end` and
    /// `temporal_suffix`, which keep their stored values.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub temporal_subset: Option<String>,
    /// Geographic subset token, e.g. `g-lat20S20Nlon170W130W`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub geographical_info: Option<String>,
    /// Activity directory, e.g. `CMIP5`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub activity: Option<String>,
    /// Product directory, e.g. `output1`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub product: Option<String>,
    /// Institute directory, e.g. `MOHC`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub institute: Option<String>,
    /// Frequency directory, e.g. `mon`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub frequency: Option<String>,
    /// Modeling realm directory, e.g. `atmos`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub modeling_realm: Option<String>,
    /// Datanode publication version, e.g. `v20110101`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub version_number: Option<String>,
}

impl Cmip5Meta {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a field, if set.
    pub fn get(&self, field: Cmip5Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Sets (or with `None`, clears) a field.
    ///
    /// No other field is touched.
    pub fn set(&mut self, field: Cmip5Field, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    /// Returns true if the field has a value.
    pub fn is_set(&self, field: Cmip5Field) -> bool {
        self.slot(field).is_some()
    }

    /// Returns the fields from `fields` that are not set, in the given order.
    pub fn missing(&self, fields: &[Cmip5Field]) -> Vec<Cmip5Field> {
        fields.iter().copied().filter(|f| !self.is_set(*f)).collect()
    }

    /// Iterates over the set fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Cmip5Field, &str)> + '_ {
        Cmip5Field::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|value| (field, value)))
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    fn slot(&self, field: Cmip5Field) -> &Option<String> {
        match field {
            Cmip5Field::VariableName => &self.variable_name,
            Cmip5Field::MipTable => &self.mip_table,
            Cmip5Field::Model => &self.model,
            Cmip5Field::Experiment => &self.experiment,
            Cmip5Field::EnsembleMember => &self.ensemble_member,
            Cmip5Field::TStart => &self.t_start,
            Cmip5Field::TEnd => &self.t_end,
            Cmip5Field::TemporalSuffix => &self.temporal_suffix,
            Cmip5Field::TemporalSubset => &self.temporal_subset,
            Cmip5Field::GeographicalInfo => &self.geographical_info,
            Cmip5Field::Activity => &self.activity,
            Cmip5Field::Product => &self.product,
            Cmip5Field::Institute => &self.institute,
            Cmip5Field::Frequency => &self.frequency,
            Cmip5Field::ModelingRealm => &self.modeling_realm,
            Cmip5Field::VersionNumber => &self.version_number,
        }
    }

    fn slot_mut(&mut self, field: Cmip5Field) -> &mut Option<String> {
        match field {
            Cmip5Field::VariableName => &mut self.variable_name,
            Cmip5Field::MipTable => &mut self.mip_table,
            Cmip5Field::Model => &mut self.model,
            Cmip5Field::Experiment => &mut self.experiment,
            Cmip5Field::EnsembleMember => &mut self.ensemble_member,
            Cmip5Field::TStart => &mut self.t_start,
            Cmip5Field::TEnd => &mut self.t_end,
            Cmip5Field::TemporalSuffix => &mut self.temporal_suffix,
            Cmip5Field::TemporalSubset => &mut self.temporal_subset,
            Cmip5Field::GeographicalInfo => &mut self.geographical_info,
            Cmip5Field::Activity => &mut self.activity,
            Cmip5Field::Product => &mut self.product,
            Cmip5Field::Institute => &mut self.institute,
            Cmip5Field::Frequency => &mut self.frequency,
            Cmip5Field::ModelingRealm => &mut self.modeling_realm,
            Cmip5Field::VersionNumber => &mut self.version_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_fields() -> Cmip5Meta {
        Cmip5Meta {
            variable_name: Some("tas".to_string()),
            mip_table: Some("Amon".to_string()),
            model: Some("HADCM3".to_string()),
            experiment: Some("decadal1990".to_string()),
            ensemble_member: Some("r3i2p1".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_get_and_set_every_field() {
        let mut meta = Cmip5Meta::new();
        for field in Cmip5Field::ALL {
            assert_eq!(meta.get(field), None);
            meta.set(field, Some(field.name().to_uppercase()));
        }
        for field in Cmip5Field::ALL {
            assert_eq!(meta.get(field), Some(field.name().to_uppercase().as_str()));
        }
    }

    #[test]
    fn test_set_touches_only_one_field() {
        let mut meta = name_fields();
        let before = meta.clone();
        meta.set(Cmip5Field::TStart, Some("1971".to_string()));

        for field in Cmip5Field::ALL {
            if field != Cmip5Field::TStart {
                assert_eq!(meta.get(field), before.get(field));
            }
        }
    }

    #[test]
    fn test_missing_reports_in_order() {
        let mut meta = name_fields();
        assert!(meta.missing(&Cmip5Field::REQUIRED).is_empty());

        meta.set(Cmip5Field::Model, None);
        meta.set(Cmip5Field::VariableName, None);
        assert_eq!(
            meta.missing(&Cmip5Field::REQUIRED),
            vec![Cmip5Field::VariableName, Cmip5Field::Model]
        );
    }

    #[test]
    fn test_iter_canonical_order() {
        let meta = Cmip5Meta {
            institute: Some("MOHC".to_string()),
            variable_name: Some("tas".to_string()),
            t_end: Some("2005".to_string()),
            ..Default::default()
        };
        let fields: Vec<_> = meta.iter().map(|(f, _)| f).collect();
        assert_eq!(
            fields,
            vec![Cmip5Field::VariableName, Cmip5Field::TEnd, Cmip5Field::Institute]
        );
    }

    #[test]
    fn test_value_equality() {
        let a = name_fields();
        let mut b = name_fields();
        assert_eq!(a, b);

        b.set(Cmip5Field::GeographicalInfo, Some("g-global".to_string()));
        assert_ne!(a, b);
    }
}
