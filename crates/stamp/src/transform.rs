//! 2D affine transforms and an explicit save/restore stack.

/// A 2D affine matrix in row order `sx ky kx sy tx ty`, mapping
/// `x' = sx*x + kx*y + tx` and `y' = ky*x + sy*y + ty`.
///
/// Coordinates are raster coordinates: y grows downwards, so a positive
/// rotation turns clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub sx: f32,
    pub ky: f32,
    pub kx: f32,
    pub sy: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Affine {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine {
    pub const fn identity() -> Self {
        Self {
            sx: 1.0,
            ky: 0.0,
            kx: 0.0,
            sy: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    pub fn translation(tx: f32, ty: f32) -> Self {
        Self {
            tx,
            ty,
            ..Self::identity()
        }
    }

    pub fn rotation(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            sx: cos,
            ky: sin,
            kx: -sin,
            sy: cos,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// `self * other`: applies `other` first, then `self`.
    pub fn then_apply(&self, other: &Affine) -> Affine {
        Affine {
            sx: self.sx * other.sx + self.kx * other.ky,
            ky: self.ky * other.sx + self.sy * other.ky,
            kx: self.sx * other.kx + self.kx * other.sy,
            sy: self.ky * other.kx + self.sy * other.sy,
            tx: self.sx * other.tx + self.kx * other.ty + self.tx,
            ty: self.ky * other.tx + self.sy * other.ty + self.ty,
        }
    }

    pub fn map_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.sx * x + self.kx * y + self.tx,
            self.ky * x + self.sy * y + self.ty,
        )
    }
}

/// The current transform plus the saved transforms beneath it.
///
/// Every push is paired with a pop by [`TransformStack::scoped`], so a
/// transform applied for one glyph can never leak into the next.
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    current: Affine,
    saved: Vec<Affine>,
}

impl TransformStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Affine {
        self.current
    }

    /// Number of saved transforms.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.current = self.current.then_apply(&Affine::translation(tx, ty));
    }

    pub fn rotate(&mut self, radians: f32) {
        self.current = self.current.then_apply(&Affine::rotation(radians));
    }

    /// Runs `f` with the current transform saved, then restores it.
    pub fn scoped<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.saved.push(self.current);
        let result = f(self);
        if let Some(previous) = self.saved.pop() {
            self.current = previous;
        }
        result
    }
}
