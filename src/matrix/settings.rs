use derive_builder::Builder;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options controlling assembly and lookup behaviour of a sparse matrix.
///
/// Construct with [`MatrixSettingsBuilder`] or use `MatrixSettings::default()`.
///
/// ```
/// use spmv::matrix::MatrixSettingsBuilder;
///
/// let settings = MatrixSettingsBuilder::default()
///     .validate_on_assemble(true)
///     .max_storage_entries(1 << 20)
///     .build()
///     .unwrap();
/// assert!(settings.log_missing_entries);
/// ```
///
/// With the `serde` feature, deserialization goes through the builder, so
/// missing fields take their defaults and the same validation applies.
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", builder(derive(Deserialize)))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MatrixSettingsBuilder"))]
pub struct MatrixSettings {
    ///log lookups that fall back to an implied zero
    #[builder(default = "true")]
    pub log_missing_entries: bool,

    ///check the packed layout before committing an assembly
    #[builder(default = "cfg!(debug_assertions)")]
    pub validate_on_assemble: bool,

    ///maximum number of slots in any single packed array
    #[builder(default = "usize::MAX")]
    pub max_storage_entries: usize,
}

impl Default for MatrixSettings {
    fn default() -> MatrixSettings {
        MatrixSettingsBuilder::default().build().unwrap()
    }
}

#[cfg(feature = "serde")]
impl TryFrom<MatrixSettingsBuilder> for MatrixSettings {
    type Error = MatrixSettingsBuilderError;

    fn try_from(builder: MatrixSettingsBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

impl MatrixSettingsBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(0) = self.max_storage_entries {
            return Err("max_storage_entries must be positive".to_string());
        }
        Ok(())
    }
}
