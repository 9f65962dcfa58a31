//! Room Types
//!
//! Ventilation design values per room use. Rates follow common German
//! practice (DIN EN 16798-1 category II, DIN 1946-6 for dwellings,
//! VDI 2052 for commercial kitchens) rounded to planning values.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Use of a room, which fixes its ventilation design rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomType {
    /// Single or open-plan office
    #[default]
    Office,
    /// Meeting or conference room
    MeetingRoom,
    /// School classroom or seminar room
    Classroom,
    /// Living or sleeping room in a dwelling
    Residential,
    /// Server or technical room dominated by equipment heat
    ServerRoom,
    /// Commercial kitchen
    Kitchen,
}

/// Ventilation design values for a room type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomTypeRates {
    /// Outdoor air per occupant (m³/h per person)
    pub per_person_m3_h: f64,
    /// Minimum air change rate (1/h)
    pub air_changes_per_h: f64,
    /// Outdoor air per floor area (m³/h per m²)
    pub per_area_m3_h_m2: f64,
    /// Occupant density above which the room counts as overcrowded (persons/m²)
    pub max_occupant_density: f64,
    /// Whether the air flow must also remove the internal heat
    pub heat_generating: bool,
}

impl RoomType {
    /// All room type variants for UI selection
    pub const ALL: [RoomType; 6] = [
        RoomType::Office,
        RoomType::MeetingRoom,
        RoomType::Classroom,
        RoomType::Residential,
        RoomType::ServerRoom,
        RoomType::Kitchen,
    ];

    /// Short code used on the command line and in JSON
    pub fn code(&self) -> &'static str {
        match self {
            RoomType::Office => "office",
            RoomType::MeetingRoom => "meeting-room",
            RoomType::Classroom => "classroom",
            RoomType::Residential => "residential",
            RoomType::ServerRoom => "server-room",
            RoomType::Kitchen => "kitchen",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "office" | "buero" | "büro" => Ok(RoomType::Office),
            "meeting-room" | "meeting" | "conference" => Ok(RoomType::MeetingRoom),
            "classroom" | "class" | "seminar" => Ok(RoomType::Classroom),
            "residential" | "living" | "dwelling" => Ok(RoomType::Residential),
            "server-room" | "server" | "technical" => Ok(RoomType::ServerRoom),
            "kitchen" | "kueche" | "küche" => Ok(RoomType::Kitchen),
            _ => Err(CalcError::unknown_entry("room type", s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RoomType::Office => "Office",
            RoomType::MeetingRoom => "Meeting room",
            RoomType::Classroom => "Classroom",
            RoomType::Residential => "Residential",
            RoomType::ServerRoom => "Server room",
            RoomType::Kitchen => "Commercial kitchen",
        }
    }

    /// Design rates for this room type
    pub fn rates(&self) -> RoomTypeRates {
        let (
            per_person_m3_h,
            air_changes_per_h,
            per_area_m3_h_m2,
            max_occupant_density,
            heat_generating,
        ) = match self {
            RoomType::Office => (36.0, 1.0, 2.5, 0.10, false),
            RoomType::MeetingRoom => (30.0, 2.0, 4.0, 0.50, false),
            RoomType::Classroom => (30.0, 2.0, 4.0, 0.50, false),
            RoomType::Residential => (30.0, 0.5, 1.5, 0.05, false),
            RoomType::ServerRoom => (0.0, 1.0, 0.0, 0.05, true),
            RoomType::Kitchen => (30.0, 10.0, 0.0, 0.20, true),
        };
        RoomTypeRates {
            per_person_m3_h,
            air_changes_per_h,
            per_area_m3_h_m2,
            max_occupant_density,
            heat_generating,
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
