//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements                                  | Connects to              |
//! |--------------|---------------------------------------------|--------------------------|
//! | `hardware`   | ClockPort, ClimatePort, AccelerometerPort,  | Sensor caches, LED pin   |
//! |              | BatteryPort, IndicatorPort                  |                          |
//! | `log_sink`   | EventSink                                   | Serial log output        |
//! | `radio`      | RadioPort                                   | Framed radio transport   |
//! | `time`       | ClockPort                                   | ESP32 system timer       |

pub mod hardware;
pub mod log_sink;
pub mod radio;
pub mod time;
