use thiserror::Error;

/// One row whose price field failed numeric coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRowError {
    /// 1-based line number in the source CSV (header is line 1).
    pub line: usize,
    pub product_name: String,
    pub raw_price: String,
}

/// Typed failures produced by the data core (loader + normalizer).
///
/// There is deliberately no variant for package-size extraction: it always
/// succeeds with a default value.
#[derive(Debug, Clone, Error)]
pub enum DataError {
    /// The CSV resource is missing or structurally corrupt.
    #[error("data source error: {0}")]
    Source(String),

    /// One or more price cells failed numeric coercion.
    ///
    /// Reported as a batch listing every offending row rather than failing
    /// on the first one, and never by silently dropping rows.
    #[error("price parse error in {} row(s)", .rows.len())]
    PriceParse { rows: Vec<PriceRowError> },
}

/// Application-boundary error carrying a process exit code.
///
/// Exit codes: 2 = data source, 3 = data quality, 4 = terminal/UI.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        match &err {
            DataError::Source(_) => AppError::new(2, err.to_string()),
            DataError::PriceParse { rows } => {
                let mut message = format!("{err}:");
                for row in rows {
                    message.push_str(&format!(
                        "\n  line {}: {:?} ({})",
                        row.line, row.raw_price, row.product_name
                    ));
                }
                AppError::new(3, message)
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
