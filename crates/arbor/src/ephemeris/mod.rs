pub mod adapter;
pub mod houses;
pub mod oracle;
pub mod reading;
pub mod time;
pub mod types;

pub use adapter::SwissEphemerisAdapter;
pub use houses::{house_for_longitude, parse_house_label};
pub use oracle::{collect_snapshot, EphemerisError, PositionOracle, Snapshot};
pub use reading::{resolve_readings, HouseField, RawReading};
pub use time::{datetime_to_julian_day, julian_day_to_datetime};
pub use types::{BodyPosition, EphemerisSettings, GeoLocation, HousePositions};
