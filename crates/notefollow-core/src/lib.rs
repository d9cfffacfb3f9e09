//! Domain model and pure logic for tracking one creator's follower count.

pub mod app_config;
pub mod clock;
pub mod codec;
pub mod config;
pub mod error;
pub mod stats;
pub mod store;
pub mod types;
pub mod view;

pub use app_config::{AppConfig, Environment};
pub use clock::{Clock, FixedClock, SystemClock, TrackingZone};
pub use codec::{deserialize, export_filename, inspect, serialize, DatasetWarning};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use stats::{compute_stats, nearest_on_or_before, Stats};
pub use types::{Creator, Dataset, Profile, Record};
pub use view::DashboardView;
