use ros2_std_msgs::msg::Header;
use serde::{Deserialize, Serialize};

/// This contains the position of a point in free space.
#[derive(Deserialize, Serialize, PartialEq, Clone, Copy, Debug, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// This represents an orientation in free space in quaternion form.
#[derive(Deserialize, Serialize, PartialEq, Clone, Copy, Debug)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        // Identity rotation
        Quaternion {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
        }
    }
}

/// A representation of pose in free space, composed of position and orientation.
#[derive(Deserialize, Serialize, PartialEq, Clone, Copy, Debug, Default)]
pub struct Pose {
    pub position: Point,
    pub orientation: Quaternion,
}

/// This represents a vector in free space.
#[derive(Deserialize, Serialize, PartialEq, Clone, Copy, Debug, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// This represents the transform between two coordinate frames in free space.
#[derive(Deserialize, Serialize, PartialEq, Clone, Copy, Debug, Default)]
pub struct Transform {
    pub translation: Vector3,
    pub rotation: Quaternion,
}

impl From<Pose> for Transform {
    fn from(pose: Pose) -> Self {
        Transform {
            translation: Vector3 {
                x: pose.position.x,
                y: pose.position.y,
                z: pose.position.z,
            },
            rotation: pose.orientation,
        }
    }
}

/// This expresses a transform from coordinate frame header.frame_id
/// to the coordinate frame child_frame_id at the time of header.stamp
#[derive(Deserialize, Serialize, PartialEq, Clone, Debug)]
pub struct TransformStamped {
    /// The frame id in the header is used as the reference frame of this transform.
    pub header: Header,

    /// The frame id of the child frame to which this transform points.
    pub child_frame_id: String,

    /// Translation of child frame from header frame
    /// Rotation of child frame from header frame
    pub transform: Transform,
}
