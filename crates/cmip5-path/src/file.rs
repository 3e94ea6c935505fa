//! The `Cmip5File` entity: construction, update and derived names.

use std::hash::{Hash, Hasher};

use cmip5_types::{Cmip5Field, Cmip5Meta, PathLayout};

use crate::parser::{parse_cmor_fname, parse_path};
use crate::render::{render_cmor_fname, render_path};
use crate::types::{Cmip5Error, Cmip5Result, ParseConfig};

/// Keyword for constructing from a bare file name.
pub const CMOR_FNAME_KEY: &str = "cmor_fname";

/// How a [`Cmip5File`] was constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Parsed from a full path in the given layout.
    Path(PathLayout),
    /// Parsed from a bare file name.
    FileName,
    /// Built from explicit field values.
    Fields,
}

impl Source {
    /// Construction keyword for this source (`cmor_fp`, `datanode_fp`,
    /// `cmor_fname`), or `None` for explicit fields.
    pub fn key(self) -> Option<&'static str> {
        match self {
            Self::Path(layout) => Some(layout.source_key()),
            Self::FileName => Some(CMOR_FNAME_KEY),
            Self::Fields => None,
        }
    }
}

/// A CMIP5 file described by its metadata fields.
///
/// Derived names (`cmor_fname`, `cmor_fp`, `datanode_fp`) are computed from
/// the current fields on every call. Equality compares fields only; how the
/// file was constructed does not matter.
///
/// # Examples
///
/// ```
/// use cmip5_path::Cmip5File;
///
/// let mut file = Cmip5File::from_cmor_fname("tas_Amon_HADCM3_decadal1990_r3i2p1.nc").unwrap();
/// file.update([("variable_name", "pr")]).unwrap();
/// assert_eq!(file.cmor_fname().unwrap(), "pr_Amon_HADCM3_decadal1990_r3i2p1.nc");
/// ```
#[derive(Debug, Clone)]
pub struct Cmip5File {
    meta: Cmip5Meta,
    source: Source,
}

impl Cmip5File {
    /// Creates a file from a CMOR path (positional form of [`Cmip5File::from_cmor_fp`]).
    pub fn new(cmor_fp: &str) -> Cmip5Result<Self> {
        Self::from_cmor_fp(cmor_fp)
    }

    /// Returns a builder for keyword-style construction.
    pub fn builder() -> Cmip5FileBuilder {
        Cmip5FileBuilder::default()
    }

    /// Parses a full CMOR (local) path.
    pub fn from_cmor_fp(path: &str) -> Cmip5Result<Self> {
        Self::builder().cmor_fp(path).build()
    }

    /// Parses a full datanode (archive) path.
    pub fn from_datanode_fp(path: &str) -> Cmip5Result<Self> {
        Self::builder().datanode_fp(path).build()
    }

    /// Parses a bare CMOR file name.
    pub fn from_cmor_fname(fname: &str) -> Cmip5Result<Self> {
        Self::builder().cmor_fname(fname).build()
    }

    /// Builds a file from string keyed field values.
    ///
    /// # Errors
    /// Returns [`Cmip5Error::UnknownField`] for a key outside the field set
    /// and [`Cmip5Error::NoSource`] when no pair is given.
    pub fn from_fields<I, K, V>(pairs: I) -> Cmip5Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut builder = Self::builder();
        for (key, value) in pairs {
            let field = field_from_key(key.as_ref())?;
            builder = builder.field(field, value);
        }
        builder.build()
    }

    /// Wraps a record as a file built from fields.
    ///
    /// Any record is accepted, including one with no field set, so a file
    /// whose fields were all cleared can be read back from its
    /// representation or serialized form.
    pub fn from_meta(meta: Cmip5Meta) -> Self {
        Self {
            meta,
            source: Source::Fields,
        }
    }

    /// Returns the metadata record.
    pub fn meta(&self) -> &Cmip5Meta {
        &self.meta
    }

    /// Returns how this file was constructed.
    pub fn source(&self) -> Source {
        self.source
    }

    /// Returns the value of a field, if set.
    pub fn get(&self, field: Cmip5Field) -> Option<&str> {
        self.meta.get(field)
    }

    /// Sets a single field.
    pub fn set(&mut self, field: Cmip5Field, value: impl Into<String>) {
        self.meta.set(field, Some(value.into()));
    }

    /// Unsets a single field.
    pub fn clear(&mut self, field: Cmip5Field) {
        self.meta.set(field, None);
    }

    /// Assigns string keyed field values.
    ///
    /// All keys are checked before anything is assigned, so an unknown key
    /// leaves the file unchanged. Only the named fields change.
    ///
    /// # Errors
    /// Returns [`Cmip5Error::UnknownField`] for a key outside the field set.
    pub fn update<I, K, V>(&mut self, pairs: I) -> Cmip5Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let assignments = pairs
            .into_iter()
            .map(|(key, value)| Ok((field_from_key(key.as_ref())?, value.into())))
            .collect::<Cmip5Result<Vec<_>>>()?;

        for (field, value) in assignments {
            tracing::debug!(%field, %value, "updating field");
            self.meta.set(field, Some(value));
        }
        Ok(())
    }

    /// Renders the canonical CMOR file name.
    pub fn cmor_fname(&self) -> Cmip5Result<String> {
        render_cmor_fname(&self.meta)
    }

    /// Renders the relative CMOR (local) path.
    pub fn cmor_fp(&self) -> Cmip5Result<String> {
        self.path(PathLayout::Cmor)
    }

    /// Renders the relative datanode (archive) path.
    pub fn datanode_fp(&self) -> Cmip5Result<String> {
        self.path(PathLayout::Datanode)
    }

    /// Renders the relative path in the given layout.
    pub fn path(&self, layout: PathLayout) -> Cmip5Result<String> {
        render_path(&self.meta, layout)
    }
}

impl PartialEq for Cmip5File {
    fn eq(&self, other: &Self) -> bool {
        self.meta == other.meta
    }
}

impl Eq for Cmip5File {}

impl Hash for Cmip5File {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.meta.hash(state);
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Cmip5File {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.meta, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Cmip5File {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let meta = <Cmip5Meta as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self::from_meta(meta))
    }
}

fn field_from_key(key: &str) -> Cmip5Result<Cmip5Field> {
    Cmip5Field::from_name(key).ok_or_else(|| Cmip5Error::UnknownField {
        name: key.to_string(),
    })
}

#[derive(Debug, Clone)]
enum Input {
    Path(PathLayout, String),
    FileName(String),
}

impl Input {
    fn key(&self) -> &'static str {
        match self {
            Self::Path(layout, _) => layout.source_key(),
            Self::FileName(_) => CMOR_FNAME_KEY,
        }
    }
}

/// Keyword-style constructor for [`Cmip5File`].
///
/// Exactly one source must be given: a CMOR path, a datanode path, a bare
/// file name, or any number of field values. Problems are reported by
/// [`Cmip5FileBuilder::build`].
///
/// # Examples
///
/// ```
/// use cmip5_path::Cmip5File;
///
/// let err = Cmip5File::builder()
///     .arg("cmor_fname", "tas_Amon_HADCM3_decadal1990_r3i2p1.nc")
///     .arg("bad_arg", "whoops")
///     .build()
///     .unwrap_err();
/// assert!(err.is_grammar());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Cmip5FileBuilder {
    inputs: Vec<Input>,
    fields: Cmip5Meta,
    first_field: Option<Cmip5Field>,
    config: ParseConfig,
    error: Option<Cmip5Error>,
}

impl Cmip5FileBuilder {
    /// Supplies a full CMOR path.
    pub fn cmor_fp(mut self, path: impl Into<String>) -> Self {
        self.inputs.push(Input::Path(PathLayout::Cmor, path.into()));
        self
    }

    /// Supplies a full datanode path.
    pub fn datanode_fp(mut self, path: impl Into<String>) -> Self {
        self.inputs.push(Input::Path(PathLayout::Datanode, path.into()));
        self
    }

    /// Supplies a bare file name.
    pub fn cmor_fname(mut self, fname: impl Into<String>) -> Self {
        self.inputs.push(Input::FileName(fname.into()));
        self
    }

    /// Supplies one field value.
    pub fn field(mut self, field: Cmip5Field, value: impl Into<String>) -> Self {
        self.first_field.get_or_insert(field);
        self.fields.set(field, Some(value.into()));
        self
    }

    /// Supplies a keyword argument: a source keyword or a field name.
    pub fn arg(self, key: &str, value: impl Into<String>) -> Self {
        match key {
            "cmor_fp" => self.cmor_fp(value),
            "datanode_fp" => self.datanode_fp(value),
            CMOR_FNAME_KEY => self.cmor_fname(value),
            _ => match field_from_key(key) {
                Ok(field) => self.field(field, value),
                Err(e) => self.fail(e),
            },
        }
    }

    /// Sets the parse configuration.
    pub fn config(mut self, config: ParseConfig) -> Self {
        self.config = config;
        self
    }

    /// Validates the arguments and constructs the file.
    ///
    /// # Errors
    /// Returns the first recorded argument error, [`Cmip5Error::NoSource`]
    /// or [`Cmip5Error::ConflictingSources`] for zero or several sources, or
    /// the parse error of the chosen source.
    pub fn build(self) -> Cmip5Result<Cmip5File> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let mut keys: Vec<&'static str> = self.inputs.iter().map(Input::key).collect();
        if let Some(field) = self.first_field {
            keys.push(field.name());
        }
        if keys.len() > 1 {
            return Err(Cmip5Error::ConflictingSources {
                first: keys[0].to_string(),
                second: keys[1].to_string(),
            });
        }

        let file = match self.inputs.into_iter().next() {
            Some(Input::Path(layout, path)) => Cmip5File {
                meta: parse_path(&path, layout, &self.config)?,
                source: Source::Path(layout),
            },
            Some(Input::FileName(fname)) => Cmip5File {
                meta: parse_cmor_fname(&fname, &self.config)?,
                source: Source::FileName,
            },
            None if self.first_field.is_none() => return Err(Cmip5Error::NoSource),
            None => Cmip5File::from_meta(self.fields),
        };

        tracing::debug!(source = ?file.source, fields = file.meta.iter().count(), "constructed CMIP5 file");
        Ok(file)
    }

    fn fail(mut self, err: Cmip5Error) -> Self {
        self.error.get_or_insert(err);
        self
    }
}
