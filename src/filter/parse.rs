use crate::filter::blur::GaussianBlur;
use crate::filter::chain::FilterChain;
use crate::filter::flood::Flood;
use crate::filter::merge::{Merge, MergeNode};
use crate::filter::offset::Offset;
use crate::filter::primitive::{FilterPrimitive, PrimitiveKind};
use crate::foundation::error::{RasterFxError, RasterFxResult};

/// Attribute-level description of a filter primitive, as handed over by a document model.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PrimitiveDesc {
    /// Element kind, e.g. `feMerge` or `merge`.
    pub kind: String,
    /// The `in` attribute.
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    /// The `result` attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Kind-specific parameters.
    #[serde(default)]
    pub params: serde_json::Value,
    /// `feMergeNode` children: their `in` attributes (`None` inherits).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Option<String>>,
}

/// Builds a [`FilterPrimitive`] from its description; unknown kinds and malformed parameters
/// are validation errors.
pub fn parse_primitive(desc: &PrimitiveDesc) -> RasterFxResult<FilterPrimitive> {
    let kind = desc.kind.trim().to_ascii_lowercase();
    let kind = kind.strip_prefix("fe").unwrap_or(&kind);
    if kind.is_empty() {
        return Err(RasterFxError::validation(
            "filter primitive kind must be non-empty",
        ));
    }

    let parsed: PrimitiveKind = match kind {
        "merge" => Merge::new(
            desc.nodes
                .iter()
                .map(|n| match n {
                    Some(input) => MergeNode::with_input(input.clone()),
                    None => MergeNode::inherit(),
                })
                .collect(),
        )
        .into(),
        "offset" => Offset::new(
            get_f32_or(&desc.params, "dx", 0.0)?,
            get_f32_or(&desc.params, "dy", 0.0)?,
        )
        .into(),
        "flood" => {
            let color = match desc.params.get("color") {
                Some(v) => parse_rgba(v)?,
                None => Flood::default().color,
            };
            Flood::new(color, get_f32_or(&desc.params, "opacity", 1.0)?).into()
        }
        "gaussianblur" | "gaussian_blur" | "gaussian-blur" => {
            GaussianBlur::new(get_f32_or(&desc.params, "std_deviation", 0.0)?).into()
        }
        _ => {
            return Err(RasterFxError::validation(format!(
                "unknown filter primitive kind '{}'",
                desc.kind
            )));
        }
    };

    let mut primitive = FilterPrimitive::new(parsed);
    if let Some(input) = &desc.input {
        primitive = primitive.with_input(input.clone());
    }
    if let Some(result) = &desc.result {
        primitive = primitive.with_result(result.clone());
    }
    Ok(primitive)
}

impl FilterChain {
    /// Parses and validates a chain from document descriptors.
    pub fn from_descs(descs: &[PrimitiveDesc]) -> RasterFxResult<Self> {
        let primitives = descs
            .iter()
            .map(parse_primitive)
            .collect::<RasterFxResult<Vec<_>>>()?;
        Self::new(primitives)
    }
}

fn get_f32_or(obj: &serde_json::Value, key: &str, default: f32) -> RasterFxResult<f32> {
    let Some(v) = obj.get(key) else {
        return Ok(default);
    };
    let Some(n) = v.as_f64() else {
        return Err(RasterFxError::validation(format!(
            "primitive param '{key}' must be a number"
        )));
    };
    let n = n as f32;
    if !n.is_finite() {
        return Err(RasterFxError::validation(format!(
            "primitive param '{key}' must be finite"
        )));
    }
    Ok(n)
}

/// Straight RGBA from `[r, g, b]` / `[r, g, b, a]` byte arrays.
fn parse_rgba(v: &serde_json::Value) -> RasterFxResult<[u8; 4]> {
    let Some(arr) = v.as_array() else {
        return Err(RasterFxError::validation(
            "flood color must be an [r,g,b] or [r,g,b,a] array",
        ));
    };
    if arr.len() != 3 && arr.len() != 4 {
        return Err(RasterFxError::validation(
            "flood color must have 3 or 4 channels",
        ));
    }
    let mut out = [0u8, 0, 0, 255];
    for (i, c) in arr.iter().enumerate() {
        out[i] = c
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .ok_or_else(|| {
                RasterFxError::validation("flood color channels must be integers in 0..=255")
            })?;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/filter/parse.rs"]
mod tests;
