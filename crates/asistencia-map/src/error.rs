use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    /// A render surface is already attached; the offered one was released.
    #[error("a render surface is already attached")]
    AlreadyAttached,
}
