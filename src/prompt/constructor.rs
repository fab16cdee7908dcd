//! Prompt templating from the four descriptor tables.
//!
//! Given the raw form values, each is mapped through its descriptor table
//! and the fragments are slotted into a fixed six-line template. Pure and
//! total: every input yields a prompt.
use crate::prompt::descriptors::{Background, ModelType, Pose, Style};

/// The four fragments that make up a prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptParts {
    pub model: &'static str,
    pub pose: &'static str,
    pub background: &'static str,
    pub style: &'static str,
}

impl PromptParts {
    pub fn from_values(model_type: &str, pose: &str, background: &str, style: &str) -> Self {
        PromptParts {
            model: ModelType::parse(model_type).describe(),
            pose: Pose::parse(pose).describe(),
            background: Background::parse(background).describe(),
            style: Style::parse(style).describe(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "Professional high-quality fashion photograph, {style}.\n\
             {model}, {pose}.\n\
             Setting: {background}.\n\
             Full body shot, centered composition, perfect focus on model and garment.\n\
             Professional photography, Canon EOS 5D Mark IV, 85mm f/1.8 lens, natural skin tones.\n\
             Photorealistic, high detail, 8K quality, magazine quality photography.",
            style = self.style,
            model = self.model,
            pose = self.pose,
            background = self.background,
        )
    }
}

/// Build the generation prompt for the given form values.
pub fn build_prompt(model_type: &str, pose: &str, background: &str, style: &str) -> String {
    PromptParts::from_values(model_type, pose, background, style).render()
}
