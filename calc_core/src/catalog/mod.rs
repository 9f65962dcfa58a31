//! # Design Catalogs
//!
//! Lookup tables the room load calculation draws on.
//!
//! - **Room types**: outdoor-air rates, air change rates and occupancy limits
//! - **Envelopes**: U-values and glazing g-values per construction standard
//!
//! ## Example
//!
//! ```rust
//! use calc_core::catalog::{EnvelopeType, RoomType};
//!
//! let office = RoomType::from_str_flexible("office").unwrap();
//! assert_eq!(office.rates().per_person_m3_h, 36.0);
//!
//! let modern = EnvelopeType::Modern.properties();
//! println!("U wall = {} W/m²K", modern.u_wall_w_m2k);
//! ```

pub mod envelopes;
pub mod room_types;

pub use envelopes::{EnvelopeProperties, EnvelopeType};
pub use room_types::{RoomType, RoomTypeRates};
