use super::StateSnapshot;

/// Trait for types that can be animated by interpolating between values
pub trait Animatable: Clone + PartialEq + 'static {
    /// Interpolate from `from` towards `to`.
    /// t = 0.0 returns `from`, t = 1.0 returns `to`; values outside that
    /// range extrapolate (overshooting curves rely on this).
    fn lerp(from: &Self, to: &Self, t: f32) -> Self;
}

impl Animatable for f32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Animatable for StateSnapshot {
    /// Properties are interpolated independently. A property missing from
    /// `from` takes its `to` value immediately.
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        to.iter()
            .map(|(name, end)| {
                let value = match from.get(name) {
                    Some(start) => f32::lerp(&start, &end, t),
                    None => end,
                };
                (name.to_string(), value)
            })
            .collect()
    }
}
