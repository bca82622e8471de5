// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Loop-side half of a step/dir axis.
//!
//! A [`Channel`] owns the direction input and a fixed table of motor bindings, and reads the step
//! timestamp published by its [`EdgeDetector`]. Once per main-loop pass it hands each motor the
//! time since the last accepted step and the direction that motor should turn.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! loop {
//!     channel_x.poll(&clock, |event| log(event));
//!     delay_us(&clock, CHANNEL_POLL_GAP_US);
//! }
//! ```

use crate::config::DirectionMultiplier;
use crate::error::ConfigError;
use crate::io::InputPin;
use crate::motors::{Drive, MotorEvent};
use crate::stepdir::EdgeDetector;
use crate::timing::MonotonicClock;

/// Direction a motor should see for a given direction line level.
#[inline]
pub fn effective_direction(input: bool, multiplier: DirectionMultiplier) -> bool {
    match multiplier {
        DirectionMultiplier::Forward => input,
        DirectionMultiplier::Reverse => !input,
    }
}

/// A motor attached to a channel, with its direction sign.
///
/// The channel borrows the motor; the motor outlives any channel it is bound to.
pub struct Binding<'a> {
    motor: &'a mut dyn Drive,
    multiplier: DirectionMultiplier,
}

impl<'a> Binding<'a> {
    pub fn new(motor: &'a mut dyn Drive, multiplier: DirectionMultiplier) -> Self {
        Self { motor, multiplier }
    }
}

/// One logical motion axis: a step input, a direction input and `N` bound motors.
pub struct Channel<'a, DIR, const N: usize> {
    name: &'static str,
    edges: &'a EdgeDetector<'a, N>,
    direction: DIR,
    bindings: [Binding<'a>; N],
}

impl<'a, DIR, const N: usize> Channel<'a, DIR, N>
where
    DIR: InputPin,
{
    /// Wire a channel together.
    ///
    /// Fails if any bound motor is not armed by `edges`, since such a motor could never leave the
    /// stopped state.
    pub fn new(
        name: &'static str,
        edges: &'a EdgeDetector<'a, N>,
        direction: DIR,
        bindings: [Binding<'a>; N],
    ) -> Result<Self, ConfigError> {
        if bindings.iter().any(|b| !edges.arms(b.motor.run_flag())) {
            return Err(ConfigError::UnboundMotor);
        }

        Ok(Self {
            name,
            edges,
            direction,
            bindings,
        })
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run one control pass over every bound motor, in binding order.
    ///
    /// `on_event` receives whatever the motors report (e.g. a timeout stop).
    pub fn poll<C, F>(&mut self, clock: &C, mut on_event: F)
    where
        C: MonotonicClock,
        F: FnMut(MotorEvent),
    {
        for binding in self.bindings.iter_mut() {
            let now = clock.now();
            let elapsed = clock.diff(now, self.edges.last_edge());
            let level = self.direction.is_high().unwrap_or(false);
            let direction = effective_direction(level, binding.multiplier);

            if let Some(event) = binding.motor.update(elapsed, direction) {
                on_event(event);
            }
        }
    }

    /// Whether any bound motor is currently running.
    pub fn any_running(&self) -> bool {
        self.bindings.iter().any(|b| b.motor.run_flag().is_set())
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::config::{BrakeMode, MotorConfig};
    use crate::motors::MotorController;
    use crate::stepdir::RunFlag;
    use crate::testing::{FakeClock, MockInput, MockOutput, MockPwm};

    type TestMotor<'a> = MotorController<'a, MockPwm, MockOutput, MockOutput>;

    fn motor<'a>(name: &'static str, run: &'a RunFlag, mode: BrakeMode) -> TestMotor<'a> {
        MotorController::new(
            name,
            MockPwm::default(),
            MockOutput::default(),
            MockOutput::default(),
            run,
            MotorConfig::default().with_brake_mode(mode),
        )
        .unwrap()
    }

    #[test]
    fn direction_passthrough_and_inversion() {
        use DirectionMultiplier::*;
        assert!(effective_direction(true, Forward));
        assert!(!effective_direction(false, Forward));
        assert!(!effective_direction(true, Reverse));
        assert!(effective_direction(false, Reverse));
    }

    #[test]
    fn rejects_motor_not_armed_by_detector() {
        let run_a = RunFlag::new();
        let run_b = RunFlag::new();
        let other = RunFlag::new();
        let edges = EdgeDetector::new(200, [&run_a, &other]);
        let level = Cell::new(false);

        let mut a = motor("A", &run_a, BrakeMode::AutoBrake);
        let mut b = motor("B", &run_b, BrakeMode::AutoBrake);

        let result = Channel::new(
            "x",
            &edges,
            MockInput::new(&level),
            [
                Binding::new(&mut a, DirectionMultiplier::Forward),
                Binding::new(&mut b, DirectionMultiplier::Forward),
            ],
        );
        assert!(matches!(result, Err(ConfigError::UnboundMotor)));
    }

    #[test]
    fn poll_fans_out_speed_and_direction() {
        let run_a = RunFlag::new();
        let run_b = RunFlag::new();
        let edges = EdgeDetector::new(200, [&run_a, &run_b]);
        let level = Cell::new(true);
        let clock = FakeClock::at(0);

        let mut a = motor("A", &run_a, BrakeMode::AutoBrake);
        let mut b = motor("B", &run_b, BrakeMode::Coast);

        {
            let mut x = Channel::new(
                "x",
                &edges,
                MockInput::new(&level),
                [
                    Binding::new(&mut a, DirectionMultiplier::Reverse),
                    Binding::new(&mut b, DirectionMultiplier::Forward),
                ],
            )
            .unwrap();
            assert_eq!(x.name(), "x");

            assert!(edges.on_rising_edge(10_000));
            assert!(x.any_running());

            // 250 Hz step rate.
            clock.set(14_000);
            let mut events = 0;
            x.poll(&clock, |_| events += 1);
            assert_eq!(events, 0);
        }

        assert!(a.is_running() && b.is_running());
        assert_eq!(a.duty(), 16_384);
        assert_eq!(b.duty(), 16_384);
        assert!(!a.direction());
        assert!(b.direction());
        assert!(!a.brake_applied() && !b.brake_applied());
    }

    #[test]
    fn direction_latched_while_stopped() {
        let run_a = RunFlag::new();
        let edges = EdgeDetector::new(200, [&run_a]);
        let level = Cell::new(false);
        let clock = FakeClock::at(500);

        let mut a = motor("A", &run_a, BrakeMode::AutoBrake);
        {
            let mut x = Channel::new(
                "x",
                &edges,
                MockInput::new(&level),
                [Binding::new(&mut a, DirectionMultiplier::Reverse)],
            )
            .unwrap();
            x.poll(&clock, |_| {});
        }

        assert!(!a.is_running());
        assert_eq!(a.duty(), 0);
        assert!(a.direction());
        assert!(a.brake_applied());
    }

    #[test]
    fn poll_reports_timeout_stop_once() {
        let run_a = RunFlag::new();
        let run_b = RunFlag::new();
        let edges = EdgeDetector::new(200, [&run_a, &run_b]);
        let level = Cell::new(false);
        let clock = FakeClock::at(0);

        let mut a = motor("A", &run_a, BrakeMode::AutoBrake);
        let mut b = motor("B", &run_b, BrakeMode::Coast);
        let mut x = Channel::new(
            "x",
            &edges,
            MockInput::new(&level),
            [
                Binding::new(&mut a, DirectionMultiplier::Forward),
                Binding::new(&mut b, DirectionMultiplier::Forward),
            ],
        )
        .unwrap();

        edges.on_rising_edge(1_000);
        clock.set(1_000 + 60_000);

        let mut stopped = [""; 2];
        let mut count = 0;
        x.poll(&clock, |MotorEvent::Stopped { motor }| {
            stopped[count] = motor;
            count += 1;
        });
        assert_eq!(count, 2);
        assert_eq!(stopped, ["A", "B"]);
        assert!(!x.any_running());

        // Still timed out on the next pass, but already stopped.
        clock.set(1_000 + 70_000);
        x.poll(&clock, |_| count += 1);
        assert_eq!(count, 2);
    }

    #[test]
    fn new_edge_restarts_stopped_motor() {
        let run_a = RunFlag::new();
        let edges = EdgeDetector::new(200, [&run_a]);
        let level = Cell::new(true);
        let clock = FakeClock::at(0);

        let mut a = motor("A", &run_a, BrakeMode::AutoBrake);
        {
            let mut x = Channel::new(
                "x",
                &edges,
                MockInput::new(&level),
                [Binding::new(&mut a, DirectionMultiplier::Forward)],
            )
            .unwrap();

            edges.on_rising_edge(1_000);
            clock.set(100_000);
            x.poll(&clock, |_| {});
            assert!(!x.any_running());

            edges.on_rising_edge(200_000);
            clock.set(201_000);
            x.poll(&clock, |_| {});
            assert!(x.any_running());
        }

        assert_eq!(a.duty(), 65_535);
        assert!(!a.brake_applied());
    }
}
