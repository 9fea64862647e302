/// Weapon edge quality, banded from the hunter's sharpness value.
///
/// Each band rolls a number of weapon dice; Red bounces off entirely.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Sharpness {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    White,
    Purple,
}

impl Sharpness {
    pub const MAX_VALUE: i32 = 200;

    /// Band containing `value`, or `None` outside `0..=200`.
    pub fn from_value(value: i32) -> Option<Self> {
        let band = match value {
            0..=25 => Self::Red,
            26..=37 => Self::Orange,
            38..=49 => Self::Yellow,
            50..=60 => Self::Green,
            61..=70 => Self::Blue,
            71..=80 => Self::White,
            81..=Self::MAX_VALUE => Self::Purple,
            _ => return None,
        };
        Some(band)
    }

    /// Weapon dice rolled in this band; `None` for a bounce.
    pub const fn dice(self) -> Option<u32> {
        match self {
            Self::Red => None,
            Self::Orange => Some(1),
            Self::Yellow => Some(2),
            Self::Green => Some(3),
            Self::Blue => Some(4),
            Self::White => Some(5),
            Self::Purple => Some(6),
        }
    }

    pub const fn bounces(self) -> bool {
        self.dice().is_none()
    }

    /// Band formula with `X` standing for the weapon die (`"3dX"`), or `"bounce"`.
    pub fn formula(self) -> String {
        match self.dice() {
            Some(count) => format!("{count}dX"),
            None => "bounce".to_owned(),
        }
    }
}
