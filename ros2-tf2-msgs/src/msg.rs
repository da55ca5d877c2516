use ros2_geometry_msgs::msg::TransformStamped;
use serde::{Deserialize, Serialize};

/// geometry_msgs/TransformStamped[] transforms
#[derive(Deserialize, Serialize, PartialEq, Clone, Debug)]
pub struct TFMessage {
    pub transforms: Vec<TransformStamped>,
}

impl TFMessage {
    pub fn name() -> &'static str {
        "TFMessage"
    }
}
