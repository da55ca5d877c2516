use ros2_std_msgs::msg::Header;
use serde::{Deserialize, Serialize};

/// This message contains an uncompressed image.
/// (0, 0) is at top-left corner of image
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct Image {
    /// Header timestamp should be acquisition time of image
    /// Header frame_id should be optical frame of camera
    /// origin of frame should be optical center of camera
    /// +x should point to the right in the image
    /// +y should point down in the image
    /// +z should point into to plane of the image
    pub header: Header,

    /// image height, that is, number of rows
    pub height: u32,

    /// image width, that is, number of columns
    pub width: u32,

    /// Encoding of pixels -- channel meaning, ordering, size
    /// taken from the list of strings in include/sensor_msgs/image_encodings.hpp
    pub encoding: String,

    /// is this data bigendian?
    pub is_bigendian: u8,

    /// Full row length in bytes
    pub step: u32,

    /// actual matrix data, size is (step * rows)
    pub data: Vec<u8>,
}

impl Image {
    pub fn new(
        header: Header,
        height: u32,
        width: u32,
        encoding: String,
        step: u32,
        data: Vec<u8>,
    ) -> Self {
        Image {
            header,
            height,
            width,
            encoding,
            is_bigendian: 0,
            step,
            data,
        }
    }

    pub fn name() -> &'static str {
        "Image"
    }
}
