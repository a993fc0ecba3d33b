use crate::{
    actor::{Plan, Skin},
    prop::{Prop, Targets, target},
};

/// Nominal length of one scheduler tick, in the same time units as animation
/// durations and delays. Durations are converted to whole tick counts with
/// this constant, so real host timing jitter never accumulates drift.
pub const TICK_UNITS: u64 = 16;

/// Outcome of advancing a [`Tween`] by one tick.
#[derive(Debug)]
pub enum Step {
    /// The transition reached every target.
    Done,
    /// More ticks are needed; resume from the contained state.
    Pending(Tween),
}

/// One in-flight property transition: the still-pending target set plus the
/// tick bookkeeping needed to interpolate toward it.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Tween {
    targets: Targets,
    duration: u64,
    delay: u64,
    elapsed: u64,
}

impl From<Plan> for Tween {
    fn from(plan: Plan) -> Self {
        Self::new(plan.targets, plan.duration, plan.delay)
    }
}

impl Tween {
    pub fn new(targets: Targets, duration: u64, delay: u64) -> Self {
        Self {
            targets,
            duration,
            delay,
            elapsed: 0,
        }
    }

    /// Apply one tick's worth of this transition to `skin`.
    ///
    /// While a delay is pending, one tick unit is consumed and the skin is not
    /// touched. Otherwise each numeric target moves linearly toward its goal
    /// over `max(1, floor(duration / TICK_UNITS / speed))` ticks, snapping to
    /// the exact goal on overshoot or equality; non-numeric targets (and
    /// targets whose current value is non-numeric) are applied atomically.
    pub fn advance(mut self, skin: &mut dyn Skin, speed: f64) -> Step {
        if self.delay > 0 {
            self.delay = self.delay.saturating_sub(TICK_UNITS);
            return Step::Pending(self);
        }

        let mut pending = Targets::new();
        for (key, goal) in std::mem::take(&mut self.targets) {
            let current = skin.get(&key).and_then(|p| p.as_number());
            let goal_number = goal.as_number();

            let (Some(current), Some(goal_number)) = (current, goal_number) else {
                skin.set(&target(key, goal));
                continue;
            };

            let total = ((self.duration as f64) / (TICK_UNITS as f64) / speed).floor() as i64;
            let remaining = (total - self.elapsed as i64).max(1);
            let delta = (goal_number - current) / remaining as f64;
            let next = current + delta;

            let arrived = (delta > 0.0 && next > goal_number)
                || (delta < 0.0 && next < goal_number)
                || next == goal_number;
            if arrived {
                skin.set(&target(key, goal_number));
            } else {
                skin.set(&target(key.clone(), next));
                pending.insert(key, Prop::Number(goal_number));
            }
        }

        self.elapsed += 1;
        if pending.is_empty() {
            Step::Done
        } else {
            self.targets = pending;
            Step::Pending(self)
        }
    }
}
