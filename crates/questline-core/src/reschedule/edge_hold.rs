//! Edge-hold acceleration for drags pinned past a clamped boundary.
//!
//! When the requested overlay offset exceeds the clamp, the overshoot
//! (requested minus clamped) selects an acceleration tier. While held,
//! the tier's cadence repeatedly advances the previewed time by the
//! tier's step multiplier. Tier changes retune the running cadence in
//! place; direction changes tear down and re-arm after a short delay
//! so momentary overshoot jitter never reverses the acceleration.

/// Acceleration tier resolved from the overshoot magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EdgeHoldTier {
    Near,
    Medium,
    High,
    Extreme,
}

impl EdgeHoldTier {
    /// Tier for an absolute overshoot in pixels.
    pub fn for_overshoot(overshoot_px: f32) -> Self {
        let px = overshoot_px.abs();
        if px < 16.0 {
            Self::Near
        } else if px < 64.0 {
            Self::Medium
        } else if px < 128.0 {
            Self::High
        } else {
            Self::Extreme
        }
    }

    /// Time between repeat fires while held at this tier.
    pub fn repeat_interval_ms(&self) -> u64 {
        match self {
            Self::Near => 150,
            Self::Medium => 105,
            Self::High => 60,
            Self::Extreme => 45,
        }
    }

    /// Snap steps advanced per fire at this tier.
    pub fn step_multiplier(&self) -> i32 {
        match self {
            Self::Near => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Extreme => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    /// Direction flipped; re-arm only after the activation delay. The
    /// tier tracks the live overshoot so a motionless pointer re-arms
    /// at the cadence the overshoot actually maps to.
    Pending {
        dir: i32,
        tier: EdgeHoldTier,
        arm_at_ms: u64,
    },
    Active {
        dir: i32,
        tier: EdgeHoldTier,
        next_fire_ms: u64,
    },
}

/// Repeat-fire state machine driven by `update` (per pointer sample)
/// and `poll` (per host tick).
#[derive(Debug)]
pub struct EdgeHold {
    pin_threshold_px: f32,
    direction_change_delay_ms: u64,
    state: State,
}

impl EdgeHold {
    pub fn new(pin_threshold_px: f32, direction_change_delay_ms: u64) -> Self {
        Self {
            pin_threshold_px,
            direction_change_delay_ms,
            state: State::Idle,
        }
    }

    pub fn is_armed(&self) -> bool {
        !matches!(self.state, State::Idle)
    }

    /// Feed the current overshoot. Under the pin threshold everything
    /// disarms immediately.
    pub fn update(&mut self, overshoot_px: f32, now_ms: u64) {
        if overshoot_px.abs() < self.pin_threshold_px {
            self.state = State::Idle;
            return;
        }
        let dir = if overshoot_px > 0.0 { 1 } else { -1 };
        let tier = EdgeHoldTier::for_overshoot(overshoot_px);

        self.state = match self.state {
            State::Idle => State::Active {
                dir,
                tier,
                next_fire_ms: now_ms + tier.repeat_interval_ms(),
            },
            State::Active {
                dir: cur_dir,
                tier: cur_tier,
                next_fire_ms,
            } => {
                if cur_dir != dir {
                    // Direction flip: teardown, then the delay gate.
                    State::Pending {
                        dir,
                        tier,
                        arm_at_ms: now_ms + self.direction_change_delay_ms,
                    }
                } else if cur_tier != tier {
                    // Retune the cadence in place; never push an
                    // imminent fire further out.
                    State::Active {
                        dir,
                        tier,
                        next_fire_ms: next_fire_ms.min(now_ms + tier.repeat_interval_ms()),
                    }
                } else {
                    State::Active {
                        dir,
                        tier,
                        next_fire_ms,
                    }
                }
            }
            State::Pending {
                dir: pending_dir,
                arm_at_ms,
                ..
            } => {
                if pending_dir != dir {
                    State::Pending {
                        dir,
                        tier,
                        arm_at_ms: now_ms + self.direction_change_delay_ms,
                    }
                } else if now_ms >= arm_at_ms {
                    State::Active {
                        dir,
                        tier,
                        next_fire_ms: now_ms + tier.repeat_interval_ms(),
                    }
                } else {
                    // Still gated; track the live overshoot's tier.
                    State::Pending {
                        dir: pending_dir,
                        tier,
                        arm_at_ms,
                    }
                }
            }
        };
    }

    /// Collect fires due by `now_ms`. Returns the signed number of snap
    /// steps to advance (direction times multiplier times fires).
    pub fn poll(&mut self, now_ms: u64) -> i32 {
        // A held, motionless pointer produces no update() calls, so the
        // pending gate is also released from here, at the tier the last
        // observed overshoot resolved to.
        if let State::Pending {
            dir,
            tier,
            arm_at_ms,
        } = self.state
        {
            if now_ms >= arm_at_ms {
                self.state = State::Active {
                    dir,
                    tier,
                    next_fire_ms: arm_at_ms + tier.repeat_interval_ms(),
                };
            }
        }
        let State::Active {
            dir,
            tier,
            mut next_fire_ms,
        } = self.state
        else {
            return 0;
        };

        let mut steps = 0;
        while now_ms >= next_fire_ms {
            steps += tier.step_multiplier();
            next_fire_ms += tier.repeat_interval_ms();
        }
        self.state = State::Active {
            dir,
            tier,
            next_fire_ms,
        };
        dir * steps
    }

    pub fn stop(&mut self) {
        self.state = State::Idle;
    }
}
