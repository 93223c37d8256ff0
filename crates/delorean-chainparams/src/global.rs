//! Process-wide handle to the selected chain parameters.
//!
//! Populated once, at the end of startup selection. Prefer passing
//! `&ChainParams` or `Arc<ChainParams>` explicitly; this exists for code
//! with no injection path.

use std::sync::Arc;

use delorean_core::error::ParamsError;
use once_cell::sync::OnceCell;

use crate::params::ChainParams;

static ACTIVE: OnceCell<Arc<ChainParams>> = OnceCell::new();

/// Install the selected parameters. Fails if already installed.
pub fn install(params: Arc<ChainParams>) -> Result<&'static ChainParams, ParamsError> {
    ACTIVE
        .try_insert(params)
        .map(|p| p.as_ref())
        .map_err(|_| ParamsError::AlreadyInstalled)
}

/// The installed parameters, if startup has completed.
pub fn params() -> Option<&'static ChainParams> {
    ACTIVE.get().map(Arc::as_ref)
}
