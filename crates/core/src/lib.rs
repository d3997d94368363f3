pub mod compiler;
pub mod contracts;
pub mod error;
pub mod provider;
pub mod signers;
pub mod spammer;
pub mod token;

pub type Result<T> = std::result::Result<T, error::Error>;
