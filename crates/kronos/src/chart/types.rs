use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PlacementError;

/// Bodies and points a natal chart source can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Chiron,
    #[serde(rename = "North Node")]
    NorthNode,
    #[serde(rename = "South Node")]
    SouthNode,
    Ascendant,
    Descendant,
    Midheaven,
    #[serde(rename = "Imum Coeli")]
    ImumCoeli,
}

const BODIES: &[Body] = &[
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
    Body::Chiron,
    Body::NorthNode,
    Body::SouthNode,
    Body::Ascendant,
    Body::Descendant,
    Body::Midheaven,
    Body::ImumCoeli,
];

impl Body {
    pub fn all() -> impl Iterator<Item = Body> {
        BODIES.iter().copied()
    }

    /// Display name as written by the chart source ("North Node", "Sun").
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::Chiron => "Chiron",
            Body::NorthNode => "North Node",
            Body::SouthNode => "South Node",
            Body::Ascendant => "Ascendant",
            Body::Descendant => "Descendant",
            Body::Midheaven => "Midheaven",
            Body::ImumCoeli => "Imum Coeli",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lowercase and drop separators so "North Node", "north_node" and "NorthNode" agree.
fn fold_name(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Body {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = fold_name(s);
        let alias = match folded.as_str() {
            "mc" => Some(Body::Midheaven),
            "ic" => Some(Body::ImumCoeli),
            "asc" => Some(Body::Ascendant),
            "dsc" | "desc" => Some(Body::Descendant),
            _ => None,
        };
        alias
            .or_else(|| Body::all().find(|b| fold_name(b.name()) == folded))
            .ok_or_else(|| PlacementError::UnknownBody(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

const SIGN_ORDER: &[ZodiacSign] = &[
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    /// Sign containing an ecliptic longitude; wraps values outside 0..360.
    pub fn from_longitude(longitude: f64) -> Self {
        let normalized = longitude.rem_euclid(360.0);
        let idx = ((normalized / 30.0).floor() as usize) % 12;
        SIGN_ORDER[idx]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ZodiacSign {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SIGN_ORDER
            .iter()
            .copied()
            .find(|sign| sign.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PlacementError::UnknownSign(s.to_string()))
    }
}

/// One natal body as supplied by the chart source.
///
/// Only `body` drives return computation. The other fields are carried for
/// presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub body: Body,
    pub sign: ZodiacSign,
    /// Degree within the sign, 0..30
    pub degree: f64,
    pub retrograde: bool,
    /// House number, 1..=12
    pub house: u8,
    /// Ecliptic longitude, 0..360
    pub angle: f64,
}

impl Placement {
    /// Placement derived from a longitude alone; sign and degree follow from the angle.
    pub fn at_longitude(body: Body, angle: f64, house: u8) -> Self {
        let angle = angle.rem_euclid(360.0);
        Self {
            body,
            sign: ZodiacSign::from_longitude(angle),
            degree: angle % 30.0,
            retrograde: false,
            house,
            angle,
        }
    }
}
