#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    UnknownPlayer,
    InvalidUrl,
    InvalidSkinSize,
    InvalidSkin,
    MissingSource,
    InvalidArgument(String),
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPlayer => write!(f, "Unknown player"),
            Self::InvalidUrl => write!(f, "Invalid URL"),
            Self::InvalidSkinSize => write!(f, "Image must be 64x64 pixels large"),
            Self::InvalidSkin => write!(f, "Invalid File, must be Image"),
            Self::MissingSource => {
                write!(f, "You must specify a Player Name, Skin URL or Skin File.")
            }
            Self::InvalidArgument(msg) => write!(f, "{msg}"),
            Self::Internal(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
