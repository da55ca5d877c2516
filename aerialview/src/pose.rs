//! Pose lookup seam and the simulated UAV that backs it.

use ros2_builtin_interfaces::msg::Time;
use ros2_geometry_msgs::msg::{Point, Pose, Quaternion};

#[derive(thiserror::Error, Debug)]
#[error("Pose of the sensor frame is not available yet")]
pub struct PoseUnavailable;

/// Read-only snapshot of the sensor frame pose relative to the map frame.
/// Transient failures are reported as `PoseUnavailable`; callers skip the
/// tick and retry on the next one.
pub trait PoseSource {
    fn lookup(&mut self, stamp: Time) -> Result<Pose, PoseUnavailable>;
}

impl<T: PoseSource + ?Sized> PoseSource for &mut T {
    fn lookup(&mut self, stamp: Time) -> Result<Pose, PoseUnavailable> {
        (**self).lookup(stamp)
    }
}

/// Integration substep, seconds.
const TS: f64 = 0.005;

/// Point-mass UAV that flies toward a target waypoint at a saturated
/// speed, yaw following the horizontal velocity direction. The model is
/// advanced by the wall-clock delta between consecutive lookup stamps, in
/// fixed substeps.
pub struct UavKinematics {
    position: [f64; 3],
    target: [f64; 3],
    max_speed: f64,
    yaw: f64,
    last_stamp: Option<Time>,
}

impl UavKinematics {
    pub fn new(start: [f64; 3], max_speed: f64) -> Self {
        UavKinematics {
            position: start,
            target: start,
            max_speed,
            yaw: 0.0,
            last_stamp: None,
        }
    }

    pub fn set_target(&mut self, target: [f64; 3]) {
        self.target = target;
    }

    /// Within one meter of the current target.
    pub fn at_target(&self) -> bool {
        let dx = self.target[0] - self.position[0];
        let dy = self.target[1] - self.position[1];
        let dz = self.target[2] - self.position[2];
        (dx * dx + dy * dy + dz * dz).sqrt() < 1.0
    }

    fn step(&mut self, dt: f64) {
        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(TS);
            let dx = self.target[0] - self.position[0];
            let dy = self.target[1] - self.position[1];
            let dz = self.target[2] - self.position[2];
            let dist = (dx * dx + dy * dy + dz * dz).sqrt();
            if dist < 1e-9 {
                break;
            }
            // Cover at most max_speed * h this substep, never overshoot
            let travel = (self.max_speed * h).min(dist);
            self.position[0] += dx / dist * travel;
            self.position[1] += dy / dist * travel;
            self.position[2] += dz / dist * travel;
            if dx.hypot(dy) > 1e-9 {
                self.yaw = dy.atan2(dx);
            }
            remaining -= h;
        }
    }
}

impl PoseSource for UavKinematics {
    fn lookup(&mut self, stamp: Time) -> Result<Pose, PoseUnavailable> {
        if let Some(last) = self.last_stamp {
            let dt = stamp.as_secs_f64() - last.as_secs_f64();
            if dt > 0.0 {
                self.step(dt);
            }
        }
        self.last_stamp = Some(stamp);

        let (w, [x, y, z]) = quaternion_core::from_axis_angle([0.0, 0.0, 1.0], self.yaw);
        Ok(Pose {
            position: Point {
                x: self.position[0],
                y: self.position[1],
                z: self.position[2],
            },
            orientation: Quaternion { x, y, z, w },
        })
    }
}
