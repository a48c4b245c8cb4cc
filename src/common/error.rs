use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    #[error("data too large for any QR version")]
    DataTooLarge,
    #[error("invalid version")]
    InvalidVersion,
    #[error("invalid error correction level")]
    InvalidECLevel,
    #[error("invalid masking pattern")]
    InvalidMaskPattern,
    #[error("invalid color")]
    InvalidColor,
    #[error("division by zero in GF(256)")]
    DivisionByZero,
}

pub type QRResult<T> = Result<T, QRError>;
