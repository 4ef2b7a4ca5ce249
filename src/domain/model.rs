use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Label interpolated into the prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "남성",
            Gender::Female => "여성",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Wealth,
    Love,
}

impl Topic {
    pub fn label(&self) -> &'static str {
        match self {
            Topic::Wealth => "금전운",
            Topic::Love => "연애운",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Topic::Wealth => "Wealth",
            Topic::Love => "Love",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    General,
    Deep,
}

impl DetailLevel {
    pub fn label(&self) -> &'static str {
        match self {
            DetailLevel::General => "일반 버전 (2000자)",
            DetailLevel::Deep => "심층 버전 (3000자)",
        }
    }
}

/// One submission's worth of birth data and analysis options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    pub name: String,
    pub gender: Gender,
    pub birth_year: i32,
    pub birth_month: u32,
    pub birth_day: u32,
    /// `HH:MM`, or empty when the birth time is unknown.
    pub birth_time: String,
    pub target_year: i32,
    pub topic: Topic,
    pub detail_level: DetailLevel,
}

impl UserInput {
    /// Form defaults: born 1990-01-01 at an unknown time, reading for next year.
    pub fn with_defaults(name: impl Into<String>, current_year: i32) -> Self {
        Self {
            name: name.into(),
            gender: Gender::Male,
            birth_year: 1990,
            birth_month: 1,
            birth_day: 1,
            birth_time: String::new(),
            target_year: current_year + 1,
            topic: Topic::Wealth,
            detail_level: DetailLevel::General,
        }
    }

    pub fn has_birth_time(&self) -> bool {
        !self.birth_time.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyLuck {
    pub month: u32,
    pub score: u32,
    pub keyword: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SajuResult {
    pub narrative_text: String,
    pub monthly_luck: Vec<MonthlyLuck>,
}

impl SajuResult {
    pub fn has_series(&self) -> bool {
        !self.monthly_luck.is_empty()
    }
}

/// Everything sent to the completion service for one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub system_instruction: String,
    pub temperature: f64,
}
