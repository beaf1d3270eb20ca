/// Evaluation limits and toggles for a [`crate::FilterChain`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EvalOpts {
    /// Largest accepted width or height of `SourceGraphic`, in pixels.
    pub max_surface_dim: u32,
    /// Upper bound on gaussian blur kernel radius, in pixels. `0` disables blurring.
    pub max_blur_radius: u32,
    /// Derive `SourceAlpha` / `BackgroundAlpha` on demand when they are not supplied.
    pub derive_alpha: bool,
}

impl Default for EvalOpts {
    fn default() -> Self {
        Self {
            max_surface_dim: 16384,
            max_blur_radius: 256,
            derive_alpha: true,
        }
    }
}

impl EvalOpts {
    /// Defaults overridden by `RASTERFX_MAX_SURFACE_DIM`, `RASTERFX_MAX_BLUR_RADIUS` and
    /// `RASTERFX_DERIVE_ALPHA`. Unparseable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EvalOpts::from_env`] with a caller-supplied variable lookup.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let max_surface_dim = lookup("RASTERFX_MAX_SURFACE_DIM")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(defaults.max_surface_dim);
        let max_blur_radius = lookup("RASTERFX_MAX_BLUR_RADIUS")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(defaults.max_blur_radius);
        let derive_alpha = lookup("RASTERFX_DERIVE_ALPHA")
            .and_then(|v| match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Some(true),
                "0" | "false" | "no" | "off" => Some(false),
                _ => None,
            })
            .unwrap_or(defaults.derive_alpha);
        Self {
            max_surface_dim,
            max_blur_radius,
            derive_alpha,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
