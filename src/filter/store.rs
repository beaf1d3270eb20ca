use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::foundation::error::RasterFxResult;
use crate::raster::buffer::{CpuBuffer, RasterBuffer};
use crate::raster::composite;

/// The rasterized element being filtered. Must be present before evaluation.
pub const SOURCE_GRAPHIC: &str = "SourceGraphic";
/// Alpha channel of [`SOURCE_GRAPHIC`] with black color; derived on demand.
pub const SOURCE_ALPHA: &str = "SourceAlpha";
/// Backdrop under the filtered element, supplied by the renderer when requested.
pub const BACKGROUND_IMAGE: &str = "BackgroundImage";
/// Alpha channel of [`BACKGROUND_IMAGE`]; derived on demand.
pub const BACKGROUND_ALPHA: &str = "BackgroundAlpha";
/// Rasterized fill paint of the element, supplied by the renderer when requested.
pub const FILL_PAINT: &str = "FillPaint";
/// Rasterized stroke paint of the element, supplied by the renderer when requested.
pub const STROKE_PAINT: &str = "StrokePaint";

/// Key of a buffer in a [`NamedBufferStore`].
///
/// `Implicit` slots hold the output of primitives without a `result` attribute and are keyed
/// by chain position, so they never collide with document-provided names.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BufferName {
    /// A reserved name or a primitive's `result` attribute.
    Named(String),
    /// Output slot of the primitive at this chain index.
    Implicit(usize),
}

impl BufferName {
    /// `Named` from anything string-like.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// The `SourceGraphic` name.
    /// The `SourceGraphic` buffer, if seeded.
    pub fn source_graphic() -> Self {
        Self::Named(SOURCE_GRAPHIC.to_string())
    }

    /// The string of a `Named` buffer; `None` for implicit slots.
    pub fn as_named(&self) -> Option<&str> {
        match self {
            Self::Named(n) => Some(n),
            Self::Implicit(_) => None,
        }
    }

    /// Whether this is `Named(name)`.
    pub fn is_named(&self, name: &str) -> bool {
        self.as_named() == Some(name)
    }
}

/// Reserved alpha name derived from `origin`, if any.
fn derived_alpha_of(origin: &BufferName) -> Option<&'static str> {
    match origin.as_named() {
        Some(SOURCE_GRAPHIC) => Some(SOURCE_ALPHA),
        Some(BACKGROUND_IMAGE) => Some(BACKGROUND_ALPHA),
        _ => None,
    }
}

/// Origin buffer an alpha name is derived from, if any.
fn alpha_origin_of(name: &BufferName) -> Option<&'static str> {
    match name.as_named() {
        Some(SOURCE_ALPHA) => Some(SOURCE_GRAPHIC),
        Some(BACKGROUND_ALPHA) => Some(BACKGROUND_IMAGE),
        _ => None,
    }
}

impl From<&str> for BufferName {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for BufferName {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl fmt::Display for BufferName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(n) => f.write_str(n),
            Self::Implicit(i) => write!(f, "<implicit result of primitive #{i}>"),
        }
    }
}

/// Live buffers of one filter evaluation, keyed by name.
///
/// The store owns every buffer it holds. Writing a name drops the buffer previously stored
/// under it; dropping the store drops everything left.
///
/// Alpha buffers produced by [`NamedBufferStore::ensure`] are tracked as derived. Writing
/// their origin (`SourceGraphic` or `BackgroundImage`) discards them, so the next read
/// derives them again from the new origin.
pub struct NamedBufferStore<S = CpuBuffer> {
    buffers: HashMap<BufferName, S>,
    derived: HashSet<BufferName>,
}

impl<S> Default for NamedBufferStore<S> {
    fn default() -> Self {
        Self {
            buffers: HashMap::new(),
            derived: HashSet::new(),
        }
    }
}

impl<S: RasterBuffer> NamedBufferStore<S> {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `SourceGraphic`.
    pub fn with_source_graphic(source: S) -> Self {
        let mut store = Self::new();
        store.insert(SOURCE_GRAPHIC, source);
        store
    }

    /// Writes `buffer` under `name`, releasing any buffer previously stored there.
    ///
    /// Writing `SourceGraphic` or `BackgroundImage` also releases the alpha buffer previously
    /// derived from it. Writing a reserved alpha name directly stores a supplied buffer that
    /// is no longer treated as derived.
    pub fn insert(&mut self, name: impl Into<BufferName>, buffer: S) {
        let name = name.into();
        self.derived.remove(&name);
        if let Some(alpha) = derived_alpha_of(&name) {
            let alpha = BufferName::from(alpha);
            if self.derived.remove(&alpha) && self.buffers.remove(&alpha).is_some() {
                tracing::trace!(%alpha, origin = %name, "released stale derived alpha");
            }
        }
        if let Some(old) = self.buffers.insert(name.clone(), buffer) {
            tracing::trace!(%name, "released overwritten buffer");
            drop(old);
        }
    }

    /// Buffer stored under `name`.
    pub fn get(&self, name: &BufferName) -> Option<&S> {
        self.buffers.get(name)
    }

    /// Buffer stored under the named (non-implicit) `name`.
    pub fn get_named(&self, name: &str) -> Option<&S> {
        self.buffers.get(&BufferName::from(name))
    }

    /// Whether a buffer is stored under `name`; never derives.
    pub fn contains(&self, name: &BufferName) -> bool {
        self.buffers.contains_key(name)
    }

    /// Takes ownership of the buffer stored under `name`.
    pub fn remove(&mut self, name: &BufferName) -> Option<S> {
        self.derived.remove(name);
        self.buffers.remove(name)
    }

    /// The `SourceGraphic` buffer, if seeded.
    pub fn source_graphic(&self) -> Option<&S> {
        self.get_named(SOURCE_GRAPHIC)
    }

    /// Number of stored buffers, derived ones included.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Whether the store holds no buffers.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Whether `name` holds an alpha buffer derived by [`NamedBufferStore::ensure`].
    pub fn is_derived(&self, name: &BufferName) -> bool {
        self.derived.contains(name)
    }

    /// Stored names in sorted order.
    pub fn names(&self) -> Vec<&BufferName> {
        let mut names: Vec<&BufferName> = self.buffers.keys().collect();
        names.sort();
        names
    }

    /// Makes `name` available if it is present or derivable.
    ///
    /// `SourceAlpha` is derived from `SourceGraphic` and `BackgroundAlpha` from
    /// `BackgroundImage`. Returns `false` when the name is absent and cannot be derived.
    pub fn ensure(&mut self, name: &BufferName) -> RasterFxResult<bool> {
        if self.buffers.contains_key(name) {
            return Ok(true);
        }
        let Some(origin) = alpha_origin_of(name) else {
            return Ok(false);
        };
        let Some(src) = self.get_named(origin) else {
            return Ok(false);
        };
        let mut alpha = S::allocate(src.width(), src.height())?;
        composite::alpha_only_into(alpha.pixels_mut(), src.pixels())?;
        tracing::trace!(%name, origin, "derived alpha buffer");
        self.buffers.insert(name.clone(), alpha);
        self.derived.insert(name.clone());
        Ok(true)
    }
}

impl<S> fmt::Debug for NamedBufferStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&BufferName> = self.buffers.keys().collect();
        names.sort();
        f.debug_struct("NamedBufferStore")
            .field("names", &names)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/store.rs"]
mod tests;
