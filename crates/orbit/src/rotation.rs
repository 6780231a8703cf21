use std::time::Duration;

/// Seconds added to the base duration for every ring further out.
pub const SECONDS_PER_RING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn for_ring(ring_index: usize) -> Self {
        if ring_index % 2 == 0 {
            Self::Clockwise
        } else {
            Self::CounterClockwise
        }
    }

    pub fn sign(&self) -> f64 {
        match self {
            Self::Clockwise => 1.0,
            Self::CounterClockwise => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub duration_secs: f64,
    pub direction: Direction,
}

impl Rotation {
    /// One full turn per `duration_secs`, looping forever at constant speed.
    /// Durations too long for `Duration` saturate; NaN and negative ones
    /// collapse to zero.
    pub fn descriptor(&self) -> AnimationDescriptor {
        let duration = match Duration::try_from_secs_f64(self.duration_secs) {
            Ok(d) => d,
            Err(_) if self.duration_secs > 0.0 => Duration::MAX,
            Err(_) => Duration::ZERO,
        };
        AnimationDescriptor {
            property: AnimatedProperty::Rotate,
            from: 0.0,
            to: 360.0 * self.direction.sign(),
            duration,
            delay: Duration::ZERO,
            repeat: Repeat::Infinite,
            easing: Easing::Linear,
        }
    }
}

/// Outer rings turn slower and alternate direction.
pub fn rotation_for(ring_index: usize, base_duration_secs: f64) -> Rotation {
    Rotation {
        duration_secs: base_duration_secs + ring_index as f64 * SECONDS_PER_RING,
        direction: Direction::for_ring(ring_index),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatedProperty {
    Rotate,
    Opacity,
    TranslateX,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Once,
    Infinite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseOut,
}

impl Easing {
    fn apply(&self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            // cubic
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// Declarative description of an animated value. The renderer samples it at
/// frame time; nothing in the application advances it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationDescriptor {
    pub property: AnimatedProperty,
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    pub delay: Duration,
    pub repeat: Repeat,
    pub easing: Easing,
}

impl AnimationDescriptor {
    pub fn once(property: AnimatedProperty, from: f64, to: f64, duration: Duration) -> Self {
        Self {
            property,
            from,
            to,
            duration,
            delay: Duration::ZERO,
            repeat: Repeat::Once,
            easing: Easing::EaseOut,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Value of the property `elapsed` after the animation was mounted.
    pub fn sample(&self, elapsed: Duration) -> f64 {
        let Some(active) = elapsed.checked_sub(self.delay) else {
            return self.from;
        };

        let duration = self.duration.as_secs_f64();
        if duration <= 0.0 {
            return self.to;
        }

        let progress = active.as_secs_f64() / duration;
        let t = match self.repeat {
            Repeat::Once => progress.min(1.0),
            Repeat::Infinite => progress.fract(),
        };

        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        match self.repeat {
            Repeat::Once => elapsed >= self.delay + self.duration,
            Repeat::Infinite => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_tolerates_out_of_range_durations() {
        let cases = vec![
            (f64::INFINITY, Duration::MAX),
            (1e30, Duration::MAX),
            (-10.0, Duration::ZERO),
            (f64::NAN, Duration::ZERO),
            (40.0, Duration::from_secs(40)),
        ];

        for (base, expected) in cases {
            let descriptor = rotation_for(0, base).descriptor();
            assert_eq!(descriptor.duration, expected, "base {base}");
            assert!(descriptor.sample(Duration::from_secs(3)).is_finite());
        }
    }

    #[test]
    fn test_direction_alternates_by_parity() {
        let expected = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        for (i, sign) in expected.iter().enumerate() {
            assert_eq!(rotation_for(i, 40.0).direction.sign(), *sign, "ring {i}");
        }
    }

    #[test]
    fn test_duration_grows_per_ring() {
        let durations: Vec<f64> = (0..4).map(|i| rotation_for(i, 40.0).duration_secs).collect();
        assert_eq!(durations, vec![40.0, 45.0, 50.0, 55.0]);

        for i in 1..20 {
            assert!(rotation_for(i, 50.0).duration_secs > rotation_for(i - 1, 50.0).duration_secs);
        }
    }

    #[test]
    fn test_rotation_descriptor_loops_linearly() {
        let anim = rotation_for(0, 40.0).descriptor();
        assert_eq!(anim.repeat, Repeat::Infinite);
        assert_eq!(anim.easing, Easing::Linear);
        assert_eq!(anim.sample(Duration::ZERO), 0.0);
        assert!((anim.sample(Duration::from_secs(10)) - 90.0).abs() < 1e-9);
        assert!((anim.sample(Duration::from_secs(50)) - 90.0).abs() < 1e-9);
        assert!(!anim.is_finished(Duration::from_secs(3600)));
    }

    #[test]
    fn test_counter_clockwise_descriptor() {
        let anim = rotation_for(1, 40.0).descriptor();
        assert_eq!(anim.to, -360.0);
        assert!((anim.sample(Duration::from_secs_f64(22.5)) + 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_once_animation_waits_for_delay_and_clamps() {
        let fade = AnimationDescriptor::once(
            AnimatedProperty::Opacity,
            0.0,
            1.0,
            Duration::from_millis(800),
        )
        .with_delay(Duration::from_millis(200));

        assert_eq!(fade.sample(Duration::from_millis(100)), 0.0);
        let mid = fade.sample(Duration::from_millis(600));
        assert!(mid > 0.5 && mid < 1.0, "ease-out midpoint {mid}");
        assert_eq!(fade.sample(Duration::from_secs(5)), 1.0);
        assert!(fade.is_finished(Duration::from_secs(1)));
        assert!(!fade.is_finished(Duration::from_millis(999)));
    }

    #[test]
    fn test_zero_duration_jumps_to_target() {
        let anim = AnimationDescriptor::once(AnimatedProperty::TranslateX, -50.0, 0.0, Duration::ZERO);
        assert_eq!(anim.sample(Duration::ZERO), 0.0);
    }
}
