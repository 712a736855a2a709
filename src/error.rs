pub type TetrascopeResult<T> = Result<T, TetrascopeError>;

#[derive(thiserror::Error, Debug)]
pub enum TetrascopeError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("grid error: {0}")]
    Grid(String),

    #[error("sink error: {0}")]
    Sink(String),

    #[error("solver error: {0}")]
    Solver(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TetrascopeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn grid(msg: impl Into<String>) -> Self {
        Self::Grid(msg.into())
    }

    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }

    pub fn solver(msg: impl Into<String>) -> Self {
        Self::Solver(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            TetrascopeError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(TetrascopeError::grid("x").to_string().contains("grid error:"));
        assert!(TetrascopeError::sink("x").to_string().contains("sink error:"));
        assert!(
            TetrascopeError::solver("x")
                .to_string()
                .contains("solver error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = TetrascopeError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
