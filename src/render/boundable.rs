use crate::foundation::core::{Point32, Rect32, Size32};

/// Anything with a rectangular extent that relative geometry can be resolved against.
pub trait Boundable {
    /// Extent in user space.
    fn bounds(&self) -> Rect32;

    /// Top-left corner of [`Boundable::bounds`].
    fn location(&self) -> Point32 {
        self.bounds().location()
    }

    /// Size of [`Boundable::bounds`].
    fn size(&self) -> Size32 {
        self.bounds().size()
    }
}

/// A plain rectangle used as a boundable (viewports, filter regions).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GenericBoundable {
    rect: Rect32,
}

impl GenericBoundable {
    /// Boundable covering `rect`.
    pub fn new(rect: Rect32) -> Self {
        Self { rect }
    }

    /// Boundable covering `(x, y, width, height)`.
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Rect32::new(x, y, width, height))
    }
}

impl Boundable for GenericBoundable {
    fn bounds(&self) -> Rect32 {
        self.rect
    }
}

impl Boundable for Rect32 {
    fn bounds(&self) -> Rect32 {
        *self
    }
}
