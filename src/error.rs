use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("The minimum degree of a B-tree must be at least 2, but was {0}")]
    DegreeTooSmall(usize),
    #[error("The minimum degree {0} is too large, the maximum number of keys per node would overflow")]
    DegreeTooLarge(usize),
    #[error("Invalid B-tree snapshot: {0}")]
    InvalidSnapshot(&'static str),
}
