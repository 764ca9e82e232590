use std::f64::consts::TAU;

/// Kinematic point agent: position, heading and a non-negative speed.
///
/// The operators do no clamping of their own; the environment clamps action
/// parameters before calling them.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingAgent {
    x: f64,
    y: f64,
    theta: f64,
    speed: f64,
    break_value: f64,
    delta_t: f64,
}

impl MovingAgent {
    pub fn new(break_value: f64, delta_t: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            theta: 0.0,
            speed: 0.0,
            break_value,
            delta_t,
        }
    }

    /// Start of an episode: place the agent and stop it. `direction` is kept as given.
    pub fn reset(&mut self, x: f64, y: f64, direction: f64) {
        self.x = x;
        self.y = y;
        self.speed = 0.0;
        self.theta = direction;
    }

    pub fn turn(&mut self, value: f64) {
        self.theta = (self.theta + value).rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        if self.theta >= TAU {
            self.theta = 0.0;
        }
    }

    pub fn accelerate(&mut self, value: f64) {
        self.speed += value;
    }

    pub fn brake(&mut self) {
        self.speed = (self.speed - self.break_value).max(0.0);
    }

    /// Euler step of the position along the current heading.
    pub fn step(&mut self, delta_t: f64) {
        self.x += delta_t * self.speed * self.theta.cos();
        self.y += delta_t * self.speed * self.theta.sin();
    }

    /// Distance from the agent to a point.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        ((self.x - x).powi(2) + (self.y - y).powi(2)).sqrt()
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn break_value(&self) -> f64 {
        self.break_value
    }

    pub fn delta_t(&self) -> f64 {
        self.delta_t
    }

    #[cfg(test)]
    pub(crate) fn with_state(
        break_value: f64,
        delta_t: f64,
        x: f64,
        y: f64,
        speed: f64,
        theta: f64,
    ) -> Self {
        Self {
            x,
            y,
            theta,
            speed,
            break_value,
            delta_t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-12;

    #[test]
    fn brake_decrements_and_floors_at_zero() {
        // (initial speed, break value, resulting speed)
        let cases = [
            (2.0, 1.0, 1.0),
            (1.0, 1.0, 0.0),
            (1.0, 2.0, 0.0),
            (2.0, 0.0, 2.0),
            (0.0, 1.0, 0.0),
        ];
        for (speed, break_value, expected) in cases {
            let mut agent = MovingAgent::with_state(break_value, 1.0, 0.0, 0.0, speed, 0.0);
            agent.brake();
            assert_eq!(agent.speed(), expected, "speed {speed}, break {break_value}");
            assert!(agent.speed() >= 0.0);
        }
    }

    #[test]
    fn turn_wraps_into_full_circle() {
        let cases = [
            (0.0, 1.0),
            (6.0, 1.0),
            (0.5, -1.0),
            (PI, -PI),
            (0.0, -1e-20),
            (3.0, 10.0 * TAU + 0.1),
        ];
        for (theta, value) in cases {
            let mut agent = MovingAgent::with_state(0.1, 0.1, 0.0, 0.0, 0.0, theta);
            agent.turn(value);
            let theta = agent.theta();
            assert!((0.0..TAU).contains(&theta), "theta {theta} out of range");
        }

        let mut agent = MovingAgent::with_state(0.1, 0.1, 0.0, 0.0, 0.0, 6.0);
        agent.turn(1.0);
        assert!((agent.theta() - (7.0 - TAU)).abs() < EPS);
    }

    #[test]
    fn full_turn_keeps_heading() {
        let mut agent = MovingAgent::with_state(0.1, 0.1, 0.0, 0.0, 0.0, 1.25);
        agent.turn(TAU);
        assert!((agent.theta() - 1.25).abs() < EPS);
    }

    #[test]
    fn step_integrates_along_heading() {
        let mut agent = MovingAgent::with_state(0.1, 0.5, 1.0, 2.0, 3.0, 0.0);
        agent.step(0.5);
        assert!((agent.x() - 2.5).abs() < EPS);
        assert!((agent.y() - 2.0).abs() < EPS);

        let mut agent = MovingAgent::with_state(0.1, 0.5, 1.0, 2.0, 3.0, PI);
        agent.step(0.5);
        assert!((agent.x() + 0.5).abs() < EPS);
        assert!((agent.y() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn reset_stops_the_agent() {
        let mut agent = MovingAgent::new(0.1, 0.1);
        agent.accelerate(0.4);
        agent.reset(0.2, -0.3, 7.0);
        assert_eq!(agent.speed(), 0.0);
        assert_eq!((agent.x(), agent.y()), (0.2, -0.3));
        // heading is not normalised at reset
        assert_eq!(agent.theta(), 7.0);
    }

    #[test]
    fn accelerate_adds_speed() {
        let mut agent = MovingAgent::new(0.1, 0.1);
        agent.accelerate(0.5);
        agent.accelerate(0.25);
        assert_eq!(agent.speed(), 0.75);
    }
}
