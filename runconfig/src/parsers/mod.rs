//! Decoders for the compact option syntaxes.
//!
//! Each parser handles exactly one grammar and holds no state.

pub mod device;
pub mod kv;
pub mod network;
pub mod ports;
pub mod restart;
pub mod volumes;

pub use device::parse_device;
pub use kv::{parse_driver_opts, parse_key_value_opt, parse_key_value_opts};
pub use network::parse_net_mode;
pub use ports::parse_ports;
pub use restart::parse_restart_policy;
pub use volumes::{VolumeSet, partition_volumes};
