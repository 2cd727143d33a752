use layout_modules::{
    AffineTransform, IndexPath, PhysicalAttributes, PhysicalPoint, PhysicalRect, PhysicalSize,
    Transform3D, TransitionPhase,
};

/// Interpolates an item between two sets of attributes over time.
///
/// Frame, alpha and both transforms are interpolated component-wise. `z_index` and `hidden` are
/// discrete: they hold the `from` value until the tween completes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttributeTween {
    pub path: IndexPath,
    pub phase: TransitionPhase,
    pub from: PhysicalAttributes,
    pub to: PhysicalAttributes,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl AttributeTween {
    pub fn new(
        path: IndexPath,
        phase: TransitionPhase,
        from: PhysicalAttributes,
        to: PhysicalAttributes,
        start_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> Self {
        Self {
            path,
            phase,
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    /// Linear progress in `0.0..=1.0`, before easing.
    pub fn progress(&self, now_ms: u64) -> f64 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        (elapsed as f64 / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now_ms: u64) -> PhysicalAttributes {
        if self.is_done(now_ms) {
            return self.to;
        }
        let t = self.easing.sample(self.progress(now_ms));
        let (from, to) = (&self.from, &self.to);
        PhysicalAttributes {
            frame: lerp_rect(from.frame, to.frame, t),
            transform_3d: lerp_transform_3d(&from.transform_3d, &to.transform_3d, t),
            transform: lerp_transform(&from.transform, &to.transform, t),
            alpha: lerp(from.alpha, to.alpha, t),
            z_index: from.z_index,
            hidden: from.hidden,
        }
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

fn lerp_rect(from: PhysicalRect, to: PhysicalRect, t: f64) -> PhysicalRect {
    PhysicalRect::new(
        PhysicalPoint::new(
            lerp(from.origin.x, to.origin.x, t),
            lerp(from.origin.y, to.origin.y, t),
        ),
        PhysicalSize::new(
            lerp(from.size.width, to.size.width, t),
            lerp(from.size.height, to.size.height, t),
        ),
    )
}

fn lerp_transform(from: &AffineTransform, to: &AffineTransform, t: f64) -> AffineTransform {
    AffineTransform {
        a: lerp(from.a, to.a, t),
        b: lerp(from.b, to.b, t),
        c: lerp(from.c, to.c, t),
        d: lerp(from.d, to.d, t),
        tx: lerp(from.tx, to.tx, t),
        ty: lerp(from.ty, to.ty, t),
    }
}

fn lerp_transform_3d(from: &Transform3D, to: &Transform3D, t: f64) -> Transform3D {
    let mut m = from.m;
    for (row, to_row) in m.iter_mut().zip(&to.m) {
        for (cell, &target) in row.iter_mut().zip(to_row) {
            *cell = lerp(*cell, target, t);
        }
    }
    Transform3D { m }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    SmoothStep,
    EaseInOutCubic,
}

impl Easing {
    pub fn sample(self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
        }
    }
}
