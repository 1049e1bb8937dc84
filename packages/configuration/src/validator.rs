//! Trait to validate semantic errors.
//!
//! Errors could involve more than one configuration option. Some configuration
//! combinations can be incompatible.
use std::panic::Location;

use thiserror::Error;

/// Errors that can occur validating the configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SemanticValidationError {
    #[error("the notify command is empty, {location}")]
    EmptyCommand { location: &'static Location<'static> },

    #[error("the piece length must be greater than zero, {location}")]
    ZeroPieceLength { location: &'static Location<'static> },

    #[error("the minimum announce interval {interval_min} is above the announce interval {interval}, {location}")]
    MinIntervalAboveInterval {
        location: &'static Location<'static>,
        interval: u32,
        interval_min: u32,
    },

    #[error("neither an info hash nor a content file was given, {location}")]
    NothingToTrack { location: &'static Location<'static> },
}

pub trait Validator {
    /// # Errors
    ///
    /// Will return an error if the configuration is invalid.
    fn validate(&self) -> Result<(), SemanticValidationError>;
}
