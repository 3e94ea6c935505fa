//! CMIP5 file name and path parser.
//!
//! File names are read left to right:
//!
//! ```text
//! variable_mip_table_model_experiment_ensemble[_temporal][_geographical_info].nc
//! ```
//!
//! Paths are split on `/`; the trailing directory segments are matched
//! against the layout's directory fields and anything before them is
//! treated as an arbitrary root.

use cmip5_types::well_known::{
    GEOGRAPHIC_MARKER, NAME_SEPARATOR, NETCDF_EXTENSION, PATH_SEPARATOR, TEMPORAL_SEPARATOR,
};
use cmip5_types::{Cmip5Field, Cmip5Meta, PathLayout};

use crate::types::{Cmip5Error, Cmip5Result, ParseConfig};

/// Parses a bare CMOR file name into its name fields.
///
/// # Examples
///
/// ```
/// use cmip5_path::{parse_cmor_fname, ParseConfig};
///
/// let meta = parse_cmor_fname(
///     "tas_Amon_HADCM3_decadal1990_r3i2p1_19710201-19710214-avg.nc",
///     &ParseConfig::default(),
/// ).unwrap();
///
/// assert_eq!(meta.variable_name.as_deref(), Some("tas"));
/// assert_eq!(meta.t_end.as_deref(), Some("19710214"));
/// assert_eq!(meta.temporal_suffix.as_deref(), Some("avg"));
/// ```
///
/// # Errors
/// Returns [`Cmip5Error::InvalidFileName`] if the name does not match the
/// grammar.
pub fn parse_cmor_fname(fname: &str, config: &ParseConfig) -> Cmip5Result<Cmip5Meta> {
    let invalid = |reason: String| Cmip5Error::InvalidFileName {
        value: fname.to_string(),
        reason,
    };

    if fname.contains(PATH_SEPARATOR) {
        return Err(invalid("file name contains a path separator".to_string()));
    }

    let stem = fname
        .strip_suffix(NETCDF_EXTENSION)
        .ok_or_else(|| invalid(format!("missing {} extension", NETCDF_EXTENSION)))?;

    let tokens: Vec<&str> = stem.split(NAME_SEPARATOR).collect();
    if tokens.iter().any(|t| t.is_empty()) {
        return Err(invalid("empty segment".to_string()));
    }
    if tokens.len() < Cmip5Field::REQUIRED.len() {
        return Err(invalid(format!(
            "expected at least {} segments, found {}",
            Cmip5Field::REQUIRED.len(),
            tokens.len()
        )));
    }

    let mut meta = Cmip5Meta::new();
    for (field, token) in Cmip5Field::REQUIRED.iter().zip(&tokens) {
        meta.set(*field, Some(token.to_string()));
    }

    let ensemble = tokens[Cmip5Field::REQUIRED.len() - 1];
    if config.validate_ensemble && !parse::is_ensemble_member(ensemble) {
        return Err(invalid(format!(
            "ensemble member '{}' is not of the form r<N>i<M>p<L>",
            ensemble
        )));
    }

    let trailing = &tokens[Cmip5Field::REQUIRED.len()..];
    let mut has_temporal = false;
    for (i, token) in trailing.iter().enumerate() {
        let is_last = i + 1 == trailing.len();

        if token.starts_with(GEOGRAPHIC_MARKER) {
            if !is_last {
                return Err(invalid(format!(
                    "geographic segment '{}' must be the last segment",
                    token
                )));
            }
            if token.len() == GEOGRAPHIC_MARKER.len() {
                return Err(invalid("empty geographic segment".to_string()));
            }
            meta.geographical_info = Some(token.to_string());
        } else if token.contains(TEMPORAL_SEPARATOR) {
            if has_temporal {
                return Err(invalid(format!("unexpected second temporal segment '{}'", token)));
            }
            parse_temporal(token, &mut meta).map_err(invalid)?;
            has_temporal = true;
        } else {
            return Err(invalid(format!("unexpected segment '{}'", token)));
        }
    }

    tracing::trace!(fname, fields = meta.iter().count(), "parsed CMOR file name");
    Ok(meta)
}

/// Parses a full path in the given layout into name and directory fields.
///
/// Only the trailing directory segments of the layout are read; any leading
/// root is ignored and not stored.
///
/// # Examples
///
/// ```
/// use cmip5_path::{parse_path, ParseConfig};
/// use cmip5_types::PathLayout;
///
/// let meta = parse_path(
///     "/data/CMIP5/output1/MOHC/HADCM3/decadal1990/mon/atmos/tas/r3i2p1/tas_Amon_HADCM3_decadal1990_r3i2p1.nc",
///     PathLayout::Cmor,
///     &ParseConfig::default(),
/// ).unwrap();
///
/// assert_eq!(meta.institute.as_deref(), Some("MOHC"));
/// assert_eq!(meta.modeling_realm.as_deref(), Some("atmos"));
/// ```
///
/// # Errors
/// Returns [`Cmip5Error::InvalidPath`] if the path has too few segments, its
/// file name is malformed, or (with `check_consistency`) its directories
/// disagree with the file name.
pub fn parse_path(path: &str, layout: PathLayout, config: &ParseConfig) -> Cmip5Result<Cmip5Meta> {
    let invalid = |reason: String| Cmip5Error::InvalidPath {
        layout,
        value: path.to_string(),
        reason,
    };

    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    let directory_fields = layout.directory_fields();

    if segments.len() < directory_fields.len() + 1 {
        return Err(invalid(format!(
            "expected at least {} directory segments before the file name, found {}",
            directory_fields.len(),
            segments.len() - 1
        )));
    }

    let (fname, directories) = match segments.split_last() {
        Some(split) => split,
        None => return Err(invalid("empty path".to_string())),
    };
    let window = &directories[directories.len() - directory_fields.len()..];

    let mut meta = parse_cmor_fname(fname, config).map_err(|e| match e {
        Cmip5Error::InvalidFileName { reason, .. } => invalid(format!("file name: {}", reason)),
        other => other,
    })?;

    for (field, segment) in directory_fields.iter().zip(window) {
        if segment.is_empty() {
            return Err(invalid(format!("empty directory segment for {}", field)));
        }

        match meta.get(*field) {
            Some(existing) if existing != *segment => {
                if config.check_consistency {
                    return Err(invalid(format!(
                        "{} directory '{}' does not match file name value '{}'",
                        field, segment, existing
                    )));
                }
                // keep the file name value
            }
            Some(_) => {}
            None => meta.set(*field, Some(segment.to_string())),
        }
    }

    if layout == PathLayout::Datanode && config.check_consistency {
        let version = meta.version_number.as_deref().unwrap_or("");
        if !parse::is_version_number(version) {
            return Err(invalid(format!(
                "version directory '{}' is not of the form v<digits>",
                version
            )));
        }
    }

    tracing::trace!(
        path,
        %layout,
        root_segments = directories.len() - directory_fields.len(),
        "parsed path"
    );
    Ok(meta)
}

/// Splits a hyphenated temporal segment into discrete fields or a subset.
fn parse_temporal(token: &str, meta: &mut Cmip5Meta) -> Result<(), String> {
    if token.split(TEMPORAL_SEPARATOR).any(str::is_empty) {
        return Err(format!("empty part in temporal segment '{}'", token));
    }

    let mut parts = token.splitn(3, TEMPORAL_SEPARATOR);
    let start = parts.next().unwrap_or("");
    let end = parts.next().unwrap_or("");

    if parse::is_digits(start) && parse::is_digits(end) {
        meta.t_start = Some(start.to_string());
        meta.t_end = Some(end.to_string());
        meta.temporal_suffix = parts.next().map(str::to_string);
    } else {
        meta.temporal_subset = Some(token.to_string());
    }

    Ok(())
}

/// Helper predicates for CMIP5 token shapes.
pub mod parse {
    use cmip5_types::well_known::VERSION_PREFIX;

    /// Returns true if the value is a non-empty run of ASCII digits.
    pub fn is_digits(value: &str) -> bool {
        !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
    }

    /// Returns true if the value looks like `r<N>i<M>p<L>`.
    pub fn is_ensemble_member(value: &str) -> bool {
        let mut rest = value;
        for marker in ['r', 'i', 'p'] {
            rest = match rest.strip_prefix(marker) {
                Some(r) => r,
                None => return false,
            };
            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            if digits == 0 {
                return false;
            }
            rest = &rest[digits..];
        }
        rest.is_empty()
    }

    /// Returns true if the value looks like `v<digits>`.
    pub fn is_version_number(value: &str) -> bool {
        value.strip_prefix(VERSION_PREFIX).is_some_and(is_digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CMOR_FP: &str = "/data/CMIP5/output1/MOHC/HADCM3/decadal1990/mon/atmos/tas/r3i2p1/tas_Amon_HADCM3_decadal1990_r3i2p1_199001-199012.nc";
    const DATANODE_FP: &str = "/esgf/CMIP5/output1/MOHC/HADCM3/decadal1990/mon/atmos/Amon/r3i2p1/v20110101/tas/tas_Amon_HADCM3_decadal1990_r3i2p1_199001-199012.nc";

    fn fname(name: &str) -> Cmip5Result<Cmip5Meta> {
        parse_cmor_fname(name, &ParseConfig::default())
    }

    #[test]
    fn test_parse_required_only() {
        let meta = fname("tas_Amon_HADCM3_decadal1990_r3i2p1.nc").unwrap();
        assert_eq!(meta.variable_name.as_deref(), Some("tas"));
        assert_eq!(meta.mip_table.as_deref(), Some("Amon"));
        assert_eq!(meta.model.as_deref(), Some("HADCM3"));
        assert_eq!(meta.experiment.as_deref(), Some("decadal1990"));
        assert_eq!(meta.ensemble_member.as_deref(), Some("r3i2p1"));
        assert_eq!(meta.iter().count(), 5);
    }

    #[test]
    fn test_parse_temporal_range_and_suffix() {
        let meta = fname("tas_Amon_HADCM3_decadal1990_r3i2p1_19710201-19710214-avg.nc").unwrap();
        assert_eq!(meta.t_start.as_deref(), Some("19710201"));
        assert_eq!(meta.t_end.as_deref(), Some("19710214"));
        assert_eq!(meta.temporal_suffix.as_deref(), Some("avg"));
        assert_eq!(meta.temporal_subset, None);
    }

    #[test]
    fn test_parse_temporal_and_geographic() {
        let meta = fname(
            "tas_Amon_HADCM3_decadal1990_r3i2p1_19710201-19710214-clim_g-global-ocn-areaavg.nc",
        )
        .unwrap();
        assert_eq!(meta.temporal_suffix.as_deref(), Some("clim"));
        assert_eq!(meta.geographical_info.as_deref(), Some("g-global-ocn-areaavg"));
    }

    #[test]
    fn test_parse_geographic_without_temporal() {
        let meta = fname("tas_Amon_HADCM3_decadal1990_r3i2p1_g-lat20S20Nlon170W130W.nc").unwrap();
        assert_eq!(meta.geographical_info.as_deref(), Some("g-lat20S20Nlon170W130W"));
        assert_eq!(meta.t_start, None);
    }

    #[test]
    fn test_parse_non_numeric_temporal_is_subset() {
        let meta = fname("tas_Amon_HADCM3_decadal1990_r3i2p1_1990s-clim.nc").unwrap();
        assert_eq!(meta.temporal_subset.as_deref(), Some("1990s-clim"));
        assert_eq!(meta.t_start, None);
        assert_eq!(meta.temporal_suffix, None);
    }

    #[test]
    fn test_parse_rejects_malformed_names() {
        let bad = [
            "tas_Amon_HADCM3_decadal1990_r3i2p1",
            "tas_Amon_HADCM3_decadal1990.nc",
            "tas__HADCM3_decadal1990_r3i2p1.nc",
            "tas_Amon_HADCM3_decadal1990_r3i2p1_avg.nc",
            "tas_Amon_HADCM3_decadal1990_r3i2p1_g-global_1971-1980.nc",
            "tas_Amon_HADCM3_decadal1990_r3i2p1_1971-1980_1981-1990.nc",
            "tas_Amon_HADCM3_decadal1990_r3i2p1_1971-1980-.nc",
            "tas_Amon_HADCM3_decadal1990_r3i2p1_g-.nc",
            "tas_Amon_HADCM3_decadal1990_run3.nc",
            "dir/tas_Amon_HADCM3_decadal1990_r3i2p1.nc",
        ];
        for name in bad {
            let err = fname(name).unwrap_err();
            assert!(
                matches!(err, Cmip5Error::InvalidFileName { .. }),
                "expected grammar error for {name}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_lenient_accepts_free_form_ensemble() {
        let meta = parse_cmor_fname(
            "tas_Amon_HADCM3_decadal1990_run3.nc",
            &ParseConfig::lenient(),
        )
        .unwrap();
        assert_eq!(meta.ensemble_member.as_deref(), Some("run3"));
    }

    #[test]
    fn test_parse_cmor_path() {
        let meta = parse_path(CMOR_FP, PathLayout::Cmor, &ParseConfig::default()).unwrap();
        assert_eq!(meta.activity.as_deref(), Some("CMIP5"));
        assert_eq!(meta.product.as_deref(), Some("output1"));
        assert_eq!(meta.institute.as_deref(), Some("MOHC"));
        assert_eq!(meta.frequency.as_deref(), Some("mon"));
        assert_eq!(meta.modeling_realm.as_deref(), Some("atmos"));
        assert_eq!(meta.version_number, None);
        assert_eq!(meta.t_start.as_deref(), Some("199001"));
    }

    #[test]
    fn test_parse_datanode_path() {
        let meta = parse_path(DATANODE_FP, PathLayout::Datanode, &ParseConfig::default()).unwrap();
        assert_eq!(meta.version_number.as_deref(), Some("v20110101"));
        assert_eq!(meta.mip_table.as_deref(), Some("Amon"));
        assert_eq!(meta.institute.as_deref(), Some("MOHC"));
    }

    #[test]
    fn test_wrong_layout_is_rejected() {
        let err = parse_path(CMOR_FP, PathLayout::Datanode, &ParseConfig::default()).unwrap_err();
        assert!(matches!(err, Cmip5Error::InvalidPath { layout: PathLayout::Datanode, .. }));

        let err = parse_path(DATANODE_FP, PathLayout::Cmor, &ParseConfig::default()).unwrap_err();
        assert!(matches!(err, Cmip5Error::InvalidPath { layout: PathLayout::Cmor, .. }));
    }

    #[test]
    fn test_bare_name_is_not_a_path() {
        let err = parse_path(
            "tas_Amon_HADCM3_decadal1990_r3i2p1.nc",
            PathLayout::Datanode,
            &ParseConfig::default(),
        )
        .unwrap_err();
        assert!(err.is_grammar());
    }

    #[test]
    fn test_bad_file_name_inside_path() {
        let path = "CMIP5/output1/MOHC/HADCM3/decadal1990/mon/atmos/tas/r3i2p1/tas_Amon.nc";
        let err = parse_path(path, PathLayout::Cmor, &ParseConfig::default()).unwrap_err();
        match err {
            Cmip5Error::InvalidPath { reason, .. } => assert!(reason.starts_with("file name:")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_inconsistent_directory() {
        let path = "CMIP5/output1/MOHC/HADCM3/decadal1990/mon/atmos/pr/r3i2p1/tas_Amon_HADCM3_decadal1990_r3i2p1.nc";
        assert!(parse_path(path, PathLayout::Cmor, &ParseConfig::default()).is_err());

        let meta = parse_path(path, PathLayout::Cmor, &ParseConfig::lenient()).unwrap();
        assert_eq!(meta.variable_name.as_deref(), Some("tas"));
    }

    #[test]
    fn test_token_predicates() {
        assert!(parse::is_ensemble_member("r3i2p1"));
        assert!(parse::is_ensemble_member("r10i1p12"));
        assert!(!parse::is_ensemble_member("r3i2"));
        assert!(!parse::is_ensemble_member("r3i2p1x"));
        assert!(!parse::is_ensemble_member("ri2p1"));

        assert!(parse::is_version_number("v20110101"));
        assert!(parse::is_version_number("v1"));
        assert!(!parse::is_version_number("v"));
        assert!(!parse::is_version_number("20110101"));

        assert!(parse::is_digits("19710201"));
        assert!(!parse::is_digits(""));
        assert!(!parse::is_digits("1971a"));
    }
}
