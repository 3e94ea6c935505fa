//! CMIP5 file name and path generation.

use cmip5_types::well_known::{NAME_SEPARATOR, NETCDF_EXTENSION, PATH_SEPARATOR, TEMPORAL_SEPARATOR};
use cmip5_types::{Cmip5Field, Cmip5Meta, PathLayout};

use crate::types::{Cmip5Error, Cmip5Result};

/// Renders the canonical CMOR file name for the given fields.
///
/// `temporal_subset`, when set, is written instead of the discrete
/// `t_start`/`t_end`/`temporal_suffix` fields. Otherwise the temporal
/// segment is written only when both `t_start` and `t_end` are set.
///
/// # Examples
///
/// ```
/// use cmip5_path::render_cmor_fname;
/// use cmip5_types::Cmip5Meta;
///
/// let meta = Cmip5Meta {
///     variable_name: Some("pr".to_string()),
///     mip_table: Some("Amon".to_string()),
///     model: Some("HADCM3".to_string()),
///     experiment: Some("decadal1990".to_string()),
///     ensemble_member: Some("r3i2p1".to_string()),
///     ..Default::default()
/// };
///
/// assert_eq!(render_cmor_fname(&meta).unwrap(), "pr_Amon_HADCM3_decadal1990_r3i2p1.nc");
/// ```
///
/// # Errors
/// Returns [`Cmip5Error::MissingField`] if a required field is unset.
pub fn render_cmor_fname(meta: &Cmip5Meta) -> Cmip5Result<String> {
    require_all(meta, &Cmip5Field::REQUIRED)?;

    let mut segments: Vec<&str> = Cmip5Field::REQUIRED
        .iter()
        .filter_map(|field| meta.get(*field))
        .collect();

    let temporal = render_temporal(meta);
    if let Some(temporal) = temporal.as_deref() {
        segments.push(temporal);
    }
    if let Some(geo) = meta.geographical_info.as_deref() {
        segments.push(geo);
    }

    let mut fname = segments.join(NAME_SEPARATOR.to_string().as_str());
    fname.push_str(NETCDF_EXTENSION);

    tracing::trace!(%fname, "rendered CMOR file name");
    Ok(fname)
}

/// Renders a relative path in the given layout, ending in the file name.
///
/// # Errors
/// Returns [`Cmip5Error::MissingField`] if a name field or one of the
/// layout's directory fields is unset.
pub fn render_path(meta: &Cmip5Meta, layout: PathLayout) -> Cmip5Result<String> {
    let fname = render_cmor_fname(meta)?;
    let directory_fields = layout.directory_fields();
    require_all(meta, directory_fields)?;

    let mut segments: Vec<&str> = directory_fields
        .iter()
        .filter_map(|field| meta.get(*field))
        .collect();
    segments.push(&fname);
    let path = segments.join(PATH_SEPARATOR.to_string().as_str());

    tracing::trace!(%layout, %path, "rendered path");
    Ok(path)
}

fn render_temporal(meta: &Cmip5Meta) -> Option<String> {
    if let Some(subset) = meta.temporal_subset.as_deref() {
        return Some(subset.to_string());
    }

    let (start, end) = (meta.t_start.as_deref()?, meta.t_end.as_deref()?);
    let mut temporal = format!("{start}{TEMPORAL_SEPARATOR}{end}");
    if let Some(suffix) = meta.temporal_suffix.as_deref() {
        temporal.push(TEMPORAL_SEPARATOR);
        temporal.push_str(suffix);
    }
    Some(temporal)
}

fn require_all(meta: &Cmip5Meta, fields: &[Cmip5Field]) -> Cmip5Result<()> {
    match meta.missing(fields).first() {
        Some(field) => Err(Cmip5Error::MissingField { field: *field }),
        None => Ok(()),
    }
}
