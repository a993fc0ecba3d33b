pub type StagecraftResult<T> = Result<T, StagecraftError>;

#[derive(thiserror::Error, Debug)]
pub enum StagecraftError {
    #[error("registration error: {0}")]
    Registration(String),

    #[error("usage error: {0}")]
    Usage(String),

    #[error("casting error: {0}")]
    Casting(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StagecraftError {
    pub fn registration(msg: impl Into<String>) -> Self {
        Self::Registration(msg.into())
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    pub fn casting(msg: impl Into<String>) -> Self {
        Self::Casting(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            StagecraftError::registration("x")
                .to_string()
                .contains("registration error:")
        );
        assert!(
            StagecraftError::usage("x")
                .to_string()
                .contains("usage error:")
        );
        assert!(
            StagecraftError::casting("x")
                .to_string()
                .contains("casting error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = StagecraftError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
