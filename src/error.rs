use thiserror::Error;

use crate::descriptor::ElementId;

/// Why a descriptor was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidReason {
    #[error("delay must be >= 0ms, got {0}")]
    Delay(f32),
    #[error("duration must be > 0ms, got {0}")]
    Duration(f32),
    #[error("initial and target states must animate the same properties")]
    MismatchedProperties,
    #[error("property '{0}' is not a finite number")]
    NonFinite(String),
}

#[derive(Error, Debug)]
pub enum RevealError {
    #[error("Invalid descriptor for '{id}': {reason}")]
    InvalidDescriptor {
        id: ElementId,
        #[source]
        reason: InvalidReason,
    },
    #[error("Unknown element: {0}")]
    UnknownElement(ElementId),
    #[error("Element already registered: {0}")]
    DoubleRegistration(ElementId),
    #[error("Event loop error: {0}")]
    EventLoop(#[from] calloop::Error),
}

impl RevealError {
    pub(crate) fn invalid(id: &ElementId, reason: InvalidReason) -> Self {
        RevealError::InvalidDescriptor {
            id: id.clone(),
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, RevealError>;
