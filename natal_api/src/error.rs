use std::{error::Error, fmt::Debug};

#[derive(thiserror::Error)]
pub enum StoreError {
    #[error("no rows returned")]
    NotFound,

    #[error("Query error")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    // Driver-level message, passed through in the envelope error field.
    pub fn detail(&self) -> String {
        match self {
            StoreError::NotFound => self.to_string(),
            StoreError::Database(source) => source.to_string(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            e => StoreError::Database(e),
        }
    }
}

impl Debug for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        if let Some(source) = self.source() {
            write!(f, " (Caused by: {})", source)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn detail_exposes_the_driver_message() {
        let err = StoreError::from(sqlx::Error::Protocol("connection reset".to_string()));
        assert!(err.detail().contains("connection reset"));
    }

    #[test]
    fn debug_chains_the_source() {
        let err = StoreError::from(sqlx::Error::Protocol("boom".to_string()));
        let printed = format!("{:?}", err);
        assert!(printed.starts_with("Query error"));
        assert!(printed.contains("Caused by:"));
    }
}
