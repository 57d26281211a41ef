//! Dialect switches consumed by the renderer.

use serde::{Deserialize, Serialize};

/// Read-only rendering configuration.
///
/// The defaults produce the baseline dialect: bare source aliases, `JOIN`
/// for inner joins, `AS` before projection aliases and `LEFT OUTER JOIN`
/// style outer joins.
///
/// # Example
/// ```
/// use sqlgen::RenderOptions;
///
/// let options = RenderOptions::new()
///     .with_alias_column_sources_using_as(true)
///     .with_verbose_inner_join(true);
/// assert!(options.alias_column_sources_using_as);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Emit `AS` between a FROM-clause source and its alias.
    pub alias_column_sources_using_as: bool,
    /// Emit `AS` between a projection and its alias.
    pub alias_projections_using_as: bool,
    /// Emit `INNER JOIN` instead of `JOIN`.
    pub verbose_inner_join: bool,
    /// Emit `LEFT OUTER JOIN` instead of `LEFT JOIN` (likewise RIGHT/FULL).
    pub verbose_outer_join: bool,
    /// Qualify the column list of INSERT statements.
    pub qualify_insert_columns: bool,
    /// Qualify columns in UPDATE SET and WHERE clauses.
    pub qualify_update_columns: bool,
    /// Qualify columns in DELETE WHERE clauses.
    pub qualify_delete_columns: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            alias_column_sources_using_as: false,
            alias_projections_using_as: true,
            verbose_inner_join: false,
            verbose_outer_join: true,
            qualify_insert_columns: false,
            qualify_update_columns: false,
            qualify_delete_columns: false,
        }
    }
}

impl RenderOptions {
    /// Baseline options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alias_column_sources_using_as(mut self, enabled: bool) -> Self {
        self.alias_column_sources_using_as = enabled;
        self
    }

    pub fn with_alias_projections_using_as(mut self, enabled: bool) -> Self {
        self.alias_projections_using_as = enabled;
        self
    }

    pub fn with_verbose_inner_join(mut self, enabled: bool) -> Self {
        self.verbose_inner_join = enabled;
        self
    }

    pub fn with_verbose_outer_join(mut self, enabled: bool) -> Self {
        self.verbose_outer_join = enabled;
        self
    }

    pub fn with_qualify_insert_columns(mut self, enabled: bool) -> Self {
        self.qualify_insert_columns = enabled;
        self
    }

    pub fn with_qualify_update_columns(mut self, enabled: bool) -> Self {
        self.qualify_update_columns = enabled;
        self
    }

    pub fn with_qualify_delete_columns(mut self, enabled: bool) -> Self {
        self.qualify_delete_columns = enabled;
        self
    }

    /// Load options from a TOML table keyed by the snake_case field names.
    ///
    /// Missing keys keep their defaults; unknown keys are rejected.
    ///
    /// ```
    /// # #[cfg(feature = "toml")] {
    /// let options = sqlgen::RenderOptions::from_toml_str("verbose_inner_join = true")?;
    /// assert!(options.verbose_inner_join);
    /// # }
    /// # Ok::<(), sqlgen::BuildError>(())
    /// ```
    #[cfg(feature = "toml")]
    pub fn from_toml_str(raw: &str) -> crate::error::BuildResult<Self> {
        Ok(toml::from_str(raw)?)
    }
}
