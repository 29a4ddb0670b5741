//! Sampling knobs forwarded with every model request.

use bon::Builder;
use serde::{Deserialize, Serialize};

/// Optional overrides; `None` leaves the provider default in place.
#[derive(Debug, Clone, Builder, Serialize, Deserialize, Default, PartialEq)]
pub struct GenerationSettings {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}
