//! Message publishing seam and the rosbag2-compatible MCAP recorder.

use crate::Error;
use cdr::{CdrLe, Infinite};
use mcap::records::MessageHeader;
use mcap::Writer;
use ros2_builtin_interfaces::msg::Time;
use ros2_sensor_msgs::msg::Image;
use ros2_tf2_msgs::msg::TFMessage;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Outputs of one publish cycle. One implementor per transport; tests use
/// an in-memory capture.
pub trait MessageSink {
    fn publish_rgb(&mut self, image: &Image) -> Result<(), Error>;
    fn publish_depth(&mut self, image: &Image) -> Result<(), Error>;
    fn broadcast(&mut self, tf: &TFMessage) -> Result<(), Error>;
}

impl<T: MessageSink + ?Sized> MessageSink for &mut T {
    fn publish_rgb(&mut self, image: &Image) -> Result<(), Error> {
        (**self).publish_rgb(image)
    }

    fn publish_depth(&mut self, image: &Image) -> Result<(), Error> {
        (**self).publish_depth(image)
    }

    fn broadcast(&mut self, tf: &TFMessage) -> Result<(), Error> {
        (**self).broadcast(tf)
    }
}

// Concatenated message definitions, as rosbag2 stores them.
const IMAGE_SCHEMA: &str = "\
std_msgs/Header header
uint32 height
uint32 width
string encoding
uint8 is_bigendian
uint32 step
uint8[] data
================================================================================
MSG: std_msgs/Header
builtin_interfaces/Time stamp
string frame_id
================================================================================
MSG: builtin_interfaces/Time
int32 sec
uint32 nanosec
";

const TF_SCHEMA: &str = "\
geometry_msgs/TransformStamped[] transforms
================================================================================
MSG: geometry_msgs/TransformStamped
std_msgs/Header header
string child_frame_id
geometry_msgs/Transform transform
================================================================================
MSG: geometry_msgs/Transform
geometry_msgs/Vector3 translation
geometry_msgs/Quaternion rotation
================================================================================
MSG: geometry_msgs/Vector3
float64 x
float64 y
float64 z
================================================================================
MSG: geometry_msgs/Quaternion
float64 x 0
float64 y 0
float64 z 0
float64 w 1
================================================================================
MSG: std_msgs/Header
builtin_interfaces/Time stamp
string frame_id
================================================================================
MSG: builtin_interfaces/Time
int32 sec
uint32 nanosec
";

/// Records every published message into one MCAP file, CDR-encoded, the
/// way rosbag2 would have.
pub struct McapSink {
    writer: Writer<BufWriter<File>>,
    rgb_channel: u16,
    depth_channel: u16,
    tf_channel: u16,
    sequence: u32,
}

impl McapSink {
    pub fn create(path: &Path, rgb_topic: &str, depth_topic: &str) -> Result<Self, Error> {
        let mut writer = Writer::new(BufWriter::new(File::create(path)?))?;

        let image_schema =
            writer.add_schema("sensor_msgs/msg/Image", "ros2msg", IMAGE_SCHEMA.as_bytes())?;
        let tf_schema =
            writer.add_schema("tf2_msgs/msg/TFMessage", "ros2msg", TF_SCHEMA.as_bytes())?;

        let metadata = BTreeMap::new();
        let rgb_channel = writer.add_channel(image_schema, rgb_topic, "cdr", &metadata)?;
        let depth_channel = writer.add_channel(image_schema, depth_topic, "cdr", &metadata)?;
        let tf_channel = writer.add_channel(tf_schema, "/tf", "cdr", &metadata)?;

        Ok(McapSink {
            writer,
            rgb_channel,
            depth_channel,
            tf_channel,
            sequence: 0,
        })
    }

    fn write(&mut self, channel_id: u16, stamp: Time, payload: &[u8]) -> Result<(), Error> {
        let nanos = stamp.as_nanos();
        self.writer.write_to_known_channel(
            &MessageHeader {
                channel_id,
                sequence: self.sequence,
                log_time: nanos,
                publish_time: nanos,
            },
            payload,
        )?;
        self.sequence += 1;
        Ok(())
    }

    /// Finalize the recording. Must be called before drop for the file to
    /// carry its summary section.
    pub fn finish(&mut self) -> Result<(), Error> {
        self.writer.finish()?;
        Ok(())
    }
}

impl MessageSink for McapSink {
    fn publish_rgb(&mut self, image: &Image) -> Result<(), Error> {
        let payload = cdr::serialize::<_, _, CdrLe>(image, Infinite)?;
        self.write(self.rgb_channel, image.header.stamp, &payload)
    }

    fn publish_depth(&mut self, image: &Image) -> Result<(), Error> {
        let payload = cdr::serialize::<_, _, CdrLe>(image, Infinite)?;
        self.write(self.depth_channel, image.header.stamp, &payload)
    }

    fn broadcast(&mut self, tf: &TFMessage) -> Result<(), Error> {
        let payload = cdr::serialize::<_, _, CdrLe>(tf, Infinite)?;
        let stamp = tf
            .transforms
            .first()
            .map(|t| t.header.stamp)
            .unwrap_or(Time { sec: 0, nanosec: 0 });
        self.write(self.tf_channel, stamp, &payload)
    }
}
