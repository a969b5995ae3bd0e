use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Geolocation error: {0}")]
    Geolocation(String),

    #[error("Overpass API error: {0}")]
    OverpassApi(String),

    #[error("No road found: {0}")]
    NoRoadFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Short category label used when reporting failures on the command line
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidCoordinates(_) => "invalid_coordinates",
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::Geolocation(_) => "geolocation",
            AppError::OverpassApi(_) => "overpass_api",
            AppError::NoRoadFound(_) => "no_road_found",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AppError::InvalidCoordinates("Invalid DMS format: 12N".to_string());
        assert_eq!(err.to_string(), "Invalid coordinates: Invalid DMS format: 12N");
        assert_eq!(err.kind(), "invalid_coordinates");

        let io: AppError = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof").into();
        assert_eq!(io.kind(), "io");
    }
}
