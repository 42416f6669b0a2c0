pub mod birth;
pub mod celestial;
pub mod chart;
pub mod time;

pub use birth::*;
pub use celestial::*;
pub use chart::*;
pub use time::*;
