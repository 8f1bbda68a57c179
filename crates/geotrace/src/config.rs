//! Tolerances shared by every predicate in the crate.
//!
//! Policy
//! - One `GeomCfg` drives point equality, duplicate collapsing, and the
//!   relative collinear band of `orientation`. All six algorithms read the
//!   same values.
//! - The process-wide value is installed at most once (typically at startup)
//!   and is immutable afterwards. Engines also accept an explicit cfg so tests
//!   can run with custom tolerances without touching global state.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{GeomError, Result};

/// Default tolerance for point equality (`|Δx| < eps` and `|Δy| < eps`).
pub const EPS_POINT: f64 = 1e-9;
/// Default relative collinear band: the largest sine of the turn angle that
/// still counts as a straight line.
pub const EPS_ORIENT: f64 = 1e-9;

static GLOBAL: OnceLock<GeomCfg> = OnceLock::new();

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeomCfg {
    pub eps_point: f64,
    pub eps_orient: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_point: EPS_POINT,
            eps_orient: EPS_ORIENT,
        }
    }
}

impl GeomCfg {
    /// Reject non-finite or non-positive tolerances.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("eps_point", self.eps_point), ("eps_orient", self.eps_orient)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GeomError::InvalidTolerance { name, value });
            }
        }
        Ok(())
    }

    /// Install `cfg` as the process-wide configuration.
    ///
    /// Fails if a configuration was already installed or read (reading freezes
    /// the default in place).
    pub fn install(cfg: GeomCfg) -> Result<()> {
        cfg.validate()?;
        GLOBAL
            .set(cfg)
            .map_err(|_| GeomError::ConfigAlreadyInstalled)?;
        tracing::debug!(
            eps_point = cfg.eps_point,
            eps_orient = cfg.eps_orient,
            "geometry configuration installed"
        );
        Ok(())
    }

    /// The process-wide configuration (defaults if nothing was installed).
    #[inline]
    pub fn global() -> GeomCfg {
        *GLOBAL.get_or_init(GeomCfg::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(GeomCfg::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_tolerances() {
        let cfg = GeomCfg {
            eps_point: 0.0,
            ..GeomCfg::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(GeomError::InvalidTolerance { name: "eps_point", .. })
        ));
        let cfg = GeomCfg {
            eps_orient: f64::NAN,
            ..GeomCfg::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(GeomError::InvalidTolerance { name: "eps_orient", .. })
        ));
    }

    #[test]
    fn invalid_cfg_is_never_installed() {
        let bad = GeomCfg {
            eps_point: -1.0,
            eps_orient: 1e-9,
        };
        assert!(GeomCfg::install(bad).is_err());
        // global() still yields a valid configuration
        assert!(GeomCfg::global().validate().is_ok());
    }
}
