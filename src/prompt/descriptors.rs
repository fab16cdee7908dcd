//! Descriptor tables: short form values mapped to prompt fragments.
//!
//! Each table is an enum with an exhaustive `match` and an explicit
//! `Unknown` case, so any input string maps to some fragment.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelType {
    Female,
    Male,
    Diverse,
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pose {
    Standing,
    Casual,
    Walking,
    Sitting,
    HandsInPockets,
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Background {
    StudioWhite,
    StudioGrey,
    Outdoor,
    Urban,
    Minimal,
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    Commercial,
    Editorial,
    Casual,
    Luxury,
    Unknown,
}

impl ModelType {
    pub fn parse(s: &str) -> Self {
        match s {
            "female" => ModelType::Female,
            "male" => ModelType::Male,
            "diverse" => ModelType::Diverse,
            _ => ModelType::Unknown,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            ModelType::Female => "professional female fashion model, athletic build, confident expression",
            ModelType::Male => "professional male fashion model, athletic build, confident expression",
            ModelType::Diverse => {
                "professional fashion model, diverse ethnicity, athletic build, confident expression"
            }
            ModelType::Unknown => "professional fashion model",
        }
    }
}

impl Pose {
    pub fn parse(s: &str) -> Self {
        match s {
            "standing" => Pose::Standing,
            "casual" => Pose::Casual,
            "walking" => Pose::Walking,
            "sitting" => Pose::Sitting,
            "hands_in_pockets" => Pose::HandsInPockets,
            _ => Pose::Unknown,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Pose::Standing => "standing straight, arms naturally at sides, direct eye contact with camera",
            Pose::Casual => "casual relaxed pose, slight hip shift, natural stance",
            Pose::Walking => "mid-walk pose, one foot forward, natural movement",
            Pose::Sitting => "sitting pose, legs crossed, elegant posture",
            Pose::HandsInPockets => "standing with hands in pockets, casual confident pose",
            Pose::Unknown => "standing naturally",
        }
    }
}

impl Background {
    pub fn parse(s: &str) -> Self {
        match s {
            "studio_white" => Background::StudioWhite,
            "studio_grey" => Background::StudioGrey,
            "outdoor" => Background::Outdoor,
            "urban" => Background::Urban,
            "minimal" => Background::Minimal,
            _ => Background::Unknown,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Background::StudioWhite => {
                "clean white photography studio background, professional lighting setup"
            }
            Background::StudioGrey => "neutral grey photography studio background, soft shadows",
            Background::Outdoor => "natural outdoor setting, soft natural daylight, blurred background",
            Background::Urban => "urban street background, city setting, shallow depth of field",
            Background::Minimal => "minimal abstract background, geometric shapes, modern aesthetic",
            Background::Unknown => "white studio background",
        }
    }
}

impl Style {
    pub fn parse(s: &str) -> Self {
        match s {
            "commercial" => Style::Commercial,
            "editorial" => Style::Editorial,
            "casual" => Style::Casual,
            "luxury" => Style::Luxury,
            _ => Style::Unknown,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Style::Commercial => {
                "commercial fashion photography style, clean professional lighting, sharp focus"
            }
            Style::Editorial => "editorial fashion photography, dramatic lighting, high contrast, artistic",
            Style::Casual => "lifestyle photography style, natural lighting, candid feel",
            Style::Luxury => "luxury brand photography, sophisticated lighting, premium aesthetic",
            Style::Unknown => "commercial photography style",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_values_use_the_fallback_fragment() {
        assert_eq!(ModelType::parse("robot").describe(), "professional fashion model");
        assert_eq!(Pose::parse("handstand").describe(), "standing naturally");
        assert_eq!(Background::parse("mars").describe(), "white studio background");
        assert_eq!(Style::parse("").describe(), "commercial photography style");
    }

    #[test]
    fn parsing_is_case_sensitive_like_the_form_values() {
        assert_eq!(ModelType::parse("Female"), ModelType::Unknown);
        assert_eq!(ModelType::parse("female"), ModelType::Female);
        assert_eq!(Pose::parse("hands_in_pockets"), Pose::HandsInPockets);
        assert_eq!(Background::parse("studio_grey"), Background::StudioGrey);
        assert_eq!(Style::parse("luxury"), Style::Luxury);
    }

    #[test]
    fn known_values_have_specific_fragments() {
        assert!(Pose::Walking.describe().starts_with("mid-walk pose"));
        assert!(Style::Casual.describe().starts_with("lifestyle photography"));
        assert!(ModelType::Diverse.describe().contains("diverse ethnicity"));
    }
}
