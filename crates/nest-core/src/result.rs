use crate::error::NestError;

pub type NestResult<T> = Result<T, NestError>;
