//! # ros2-builtin-interfaces
//!
//! Message definitions for types in the OMG IDL Platform Specific Model
//!
pub mod msg {
    use serde::{Deserialize, Serialize};

    /// Time indicates a specific point in time, relative to a clock's 0 point.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
    pub struct Time {
        /// The seconds component, valid over all int32 values.
        pub sec: i32,

        /// The nanoseconds component, valid in the range [0, 10e9).
        pub nanosec: u32,
    }

    impl Time {
        /// Build a stamp from a nanosecond count since the clock's 0 point.
        pub fn from_nanos(nanos: u64) -> Self {
            Time {
                sec: (nanos / 1_000_000_000) as i32,
                nanosec: (nanos % 1_000_000_000) as u32,
            }
        }

        /// Total nanoseconds since the clock's 0 point.
        pub fn as_nanos(&self) -> u64 {
            self.sec as u64 * 1_000_000_000 + self.nanosec as u64
        }

        /// The stamp as fractional seconds.
        pub fn as_secs_f64(&self) -> f64 {
            self.sec as f64 + self.nanosec as f64 * 1e-9
        }
    }

    /// Duration defines a period between two time points. It is comprised of a seconds component and a nanoseconds component.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
    pub struct Duration {
        /// Seconds component, range is valid over any possible int32 value.
        pub sec: i32,

        /// Nanoseconds component in the range of [0, 10e9).
        pub nanosec: u32,
    }
}
