pub mod circuits;
pub mod names;
pub mod topology;

pub use circuits::{Circuit, parse_circuits_csv};
pub use names::normalize_country;
pub use topology::{Country, Polygon, WorldMap};
