use crate::foundation::core::Rect32;

/// How a new clip region combines with the current one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CombineMode {
    /// The new region replaces the current one.
    #[default]
    Replace,
    /// current ∩ new
    Intersect,
    /// current ∪ new
    Union,
    /// current ⊕ new
    Xor,
    /// current − new
    Exclude,
    /// new − current
    Complement,
}

impl CombineMode {
    fn keep(self, in_current: bool, in_new: bool) -> bool {
        match self {
            Self::Replace => in_new,
            Self::Intersect => in_current && in_new,
            Self::Union => in_current || in_new,
            Self::Xor => in_current != in_new,
            Self::Exclude => in_current && !in_new,
            Self::Complement => in_new && !in_current,
        }
    }
}

/// Area made of disjoint axis-aligned rectangles.
///
/// Rectangles are kept in y-then-x band order; vertically adjacent bands with identical
/// spans are coalesced, so equal areas built in different ways compare equal.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Region {
    rects: Vec<Rect32>,
}

impl Region {
    /// Region covering nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Region covering `rect`; empty when `rect` is.
    pub fn from_rect(rect: Rect32) -> Self {
        Self::from_rects([rect])
    }

    /// Union of `rects`; empty and non-finite rectangles are ignored.
    pub fn from_rects(rects: impl IntoIterator<Item = Rect32>) -> Self {
        let input: Vec<Rect32> = rects.into_iter().filter(|r| is_usable(*r)).collect();
        Self {
            rects: boolean_op(&input, &[], |a, _| a),
        }
    }

    /// Canonical disjoint rectangles.
    pub fn rects(&self) -> &[Rect32] {
        &self.rects
    }

    /// Whether the region covers no area.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Bounding box of the region, [`Rect32::EMPTY`] when empty.
    pub fn bounds(&self) -> Rect32 {
        let mut iter = self.rects.iter();
        let Some(first) = iter.next() else {
            return Rect32::EMPTY;
        };
        iter.fold(*first, |acc, r| acc.union(*r))
    }

    /// Half-open point containment.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.rects.iter().any(|r| r.contains(x, y))
    }

    /// Total covered area.
    pub fn area(&self) -> f32 {
        self.rects.iter().map(|r| r.width * r.height).sum()
    }

    /// Copy moved by `(dx, dy)`.
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::from_rects(self.rects.iter().map(|r| r.offset(dx, dy)))
    }

    /// Exact boolean combination; `self` is the current region, `other` the new one.
    pub fn combine(&self, other: &Region, mode: CombineMode) -> Region {
        if mode == CombineMode::Replace {
            return other.clone();
        }
        Self {
            rects: boolean_op(&self.rects, &other.rects, |a, b| mode.keep(a, b)),
        }
    }
}

impl From<Rect32> for Region {
    fn from(rect: Rect32) -> Self {
        Self::from_rect(rect)
    }
}

fn is_usable(r: Rect32) -> bool {
    r.x.is_finite() && r.y.is_finite() && r.width.is_finite() && r.height.is_finite() && !r.is_empty()
}

/// Evaluates `keep` on every cell of the grid spanned by both rectangle sets' edges, then
/// merges kept cells into horizontal spans and coalesces identical vertical bands.
fn boolean_op(a: &[Rect32], b: &[Rect32], keep: impl Fn(bool, bool) -> bool) -> Vec<Rect32> {
    let edges = |f: fn(&Rect32) -> [f32; 2]| {
        let mut v: Vec<f32> = a.iter().chain(b).flat_map(f).collect();
        v.sort_by(f32::total_cmp);
        v.dedup();
        v
    };
    let xs = edges(|r| [r.left(), r.right()]);
    let ys = edges(|r| [r.top(), r.bottom()]);

    let mut bands: Vec<(f32, f32, Vec<(f32, f32)>)> = Vec::new();
    for yw in ys.windows(2) {
        let (y0, y1) = (yw[0], yw[1]);
        let cy = y0 + (y1 - y0) * 0.5;

        let mut spans: Vec<(f32, f32)> = Vec::new();
        for xw in xs.windows(2) {
            let (x0, x1) = (xw[0], xw[1]);
            let cx = x0 + (x1 - x0) * 0.5;
            let in_a = a.iter().any(|r| r.contains(cx, cy));
            let in_b = b.iter().any(|r| r.contains(cx, cy));
            if !keep(in_a, in_b) {
                continue;
            }
            match spans.last_mut() {
                Some(last) if last.1 == x0 => last.1 = x1,
                _ => spans.push((x0, x1)),
            }
        }

        if spans.is_empty() {
            continue;
        }
        if let Some(prev) = bands.last_mut()
            && prev.1 == y0
            && prev.2 == spans
        {
            prev.1 = y1;
            continue;
        }
        bands.push((y0, y1, spans));
    }

    bands
        .into_iter()
        .flat_map(|(y0, y1, spans)| {
            spans
                .into_iter()
                .map(move |(x0, x1)| Rect32::from_ltrb(x0, y0, x1, y1))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/region.rs"]
mod tests;
