use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("modulus {0} is not prime")]
    InvalidModulus(String),
    #[error("value {num} not in range [0, {prime})")]
    OutOfRange { num: String, prime: String },
    #[error("cannot operate on elements of GF({0}) and GF({1})")]
    FieldMismatch(String, String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("point ({x}, {y}) is not on the curve")]
    PointNotOnCurve { x: String, y: String },
    #[error("points are on different curves")]
    CurveMismatch,
    #[error("point addition fell through every case")]
    AdditionUndefined,
}
