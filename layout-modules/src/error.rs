use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, LayoutError>;

/// Errors surfaced by arrangement modules and the collection layout.
///
/// Layout is deterministic, so none of these are transient: they indicate a call-site bug or a
/// misconfigured module and are propagated unchanged.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LayoutError {
    #[error("no item at index path [{section}, {item}]")]
    IndexOutOfRange { section: usize, item: usize },
    #[error("no section at index {section}")]
    SectionOutOfRange { section: usize },
    #[error("invalid {what}: {value}")]
    InvalidExtent { what: &'static str, value: f64 },
}

impl LayoutError {
    pub(crate) fn invalid(what: &'static str, value: f64) -> Self {
        lwarn!(what, value, "rejecting invalid extent");
        Self::InvalidExtent { what, value }
    }
}

/// Rejects negative or non-finite extents.
pub(crate) fn check_extent(what: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LayoutError::invalid(what, value))
    }
}

/// Rejects zero, negative or non-finite values.
pub(crate) fn check_positive(what: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LayoutError::invalid(what, value))
    }
}
