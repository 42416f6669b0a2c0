//! Pure angle, house and aspect math.
//!
//! Everything in this module is a stateless function of its inputs; the only
//! place geography enters the computation is the Placidus house calculation
//! in [`houses`].

pub mod angles;
pub mod aspects;
pub mod houses;

pub use angles::{degree_in_sign, house_of, normalize_deg, separation_deg, sign_of};
pub use aspects::{aspect_between, Aspect};
pub use houses::{ascendant_and_cusps, house_meaning, HouseStrategy};
