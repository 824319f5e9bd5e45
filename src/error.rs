use thiserror::Error;

/// Which side of a merge a dataset sits on. Carried in diagnostics so the
/// caller can tell which input file was at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetSide {
    Reference,
    Secondary,
}

impl std::fmt::Display for DatasetSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetSide::Reference => write!(f, "reference"),
            DatasetSide::Secondary => write!(f, "secondary"),
        }
    }
}

/// All failure modes of the analyzer.
///
/// Every variant is recoverable at the call site and deterministic for a
/// given input, so there is no retry logic anywhere: the same call with the
/// same data fails the same way.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// A required column is absent after alias resolution, or a column that
    /// must be numeric holds a non-numeric value.
    #[error("column `{field}`: {problem} (available columns: {})", available.join(", "))]
    Schema {
        field: String,
        problem: String,
        available: Vec<String>,
    },

    /// A dataset with zero records reached the merge step.
    #[error("{which} dataset has no records")]
    EmptyDataset { which: DatasetSide },

    /// The trend fit is underdetermined or numerically singular.
    #[error("trend fit failed: {reason}")]
    Fit { reason: String },

    /// File or parse failure in the loader/export layer.
    #[error("{message}")]
    Io { message: String },
}

impl AppError {
    pub fn schema(field: impl Into<String>, problem: impl Into<String>, available: &[String]) -> Self {
        AppError::Schema {
            field: field.into(),
            problem: problem.into(),
            available: available.to_vec(),
        }
    }

    pub fn fit(reason: impl Into<String>) -> Self {
        AppError::Fit {
            reason: reason.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        AppError::Io {
            message: message.into(),
        }
    }

    /// Process exit code for the binary: 2 = input/schema problem,
    /// 3 = empty data, 4 = numerical failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Schema { .. } | AppError::Io { .. } => 2,
            AppError::EmptyDataset { .. } => 3,
            AppError::Fit { .. } => 4,
        }
    }
}
