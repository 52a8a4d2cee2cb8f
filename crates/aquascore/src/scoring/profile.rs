use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Consumer context that selects thresholds and weights for every metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    #[default]
    Standard,
    Infant,
    Pregnancy,
    Sport,
    BloodPressure,
    Renal,
    Coffee,
    Senior,
    Diabetes,
}

impl Profile {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::Standard,
            Self::Infant,
            Self::Pregnancy,
            Self::Sport,
            Self::BloodPressure,
            Self::Renal,
            Self::Coffee,
            Self::Senior,
            Self::Diabetes,
        ]
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Infant => "infant",
            Self::Pregnancy => "pregnancy",
            Self::Sport => "sport",
            Self::BloodPressure => "blood_pressure",
            Self::Renal => "renal",
            Self::Coffee => "coffee",
            Self::Senior => "senior",
            Self::Diabetes => "diabetes",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard adult",
            Self::Infant => "Infant formula",
            Self::Pregnancy => "Pregnancy",
            Self::Sport => "Sport & endurance",
            Self::BloodPressure => "Blood-pressure sensitive",
            Self::Renal => "Reduced kidney function",
            Self::Coffee => "Coffee brewing",
            Self::Senior => "Senior",
            Self::Diabetes => "Diabetes",
        }
    }

    /// Profiles that get the strict sodium ladder and double sodium weight.
    pub const fn is_sodium_sensitive(self) -> bool {
        matches!(
            self,
            Self::Infant | Self::Pregnancy | Self::BloodPressure | Self::Renal
        )
    }

    pub const fn is_nitrate_sensitive(self) -> bool {
        matches!(self, Self::Infant | Self::Pregnancy)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown profile '{0}'")]
pub struct UnknownProfile(pub String);

impl FromStr for Profile {
    type Err = UnknownProfile;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "" | "standard" | "adult" | "default" => Ok(Self::Standard),
            "infant" | "baby" => Ok(Self::Infant),
            "pregnancy" | "pregnant" => Ok(Self::Pregnancy),
            "sport" | "athlete" => Ok(Self::Sport),
            "blood_pressure" | "hypertension" | "bp" => Ok(Self::BloodPressure),
            "renal" | "kidney" => Ok(Self::Renal),
            "coffee" | "barista" => Ok(Self::Coffee),
            "senior" => Ok(Self::Senior),
            "diabetes" => Ok(Self::Diabetes),
            _ => Err(UnknownProfile(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip_through_from_str() {
        for profile in Profile::ordered() {
            assert_eq!(profile.slug().parse::<Profile>(), Ok(profile));
        }
    }

    #[test]
    fn accepts_common_aliases() {
        assert_eq!("Blood-Pressure".parse::<Profile>(), Ok(Profile::BloodPressure));
        assert_eq!("kidney".parse::<Profile>(), Ok(Profile::Renal));
        assert!("astronaut".parse::<Profile>().is_err());
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&Profile::BloodPressure).expect("serialize profile");
        assert_eq!(json, "\"blood_pressure\"");
    }
}
