use crate::domain::model::{DetailLevel, Gender, Topic, UserInput};
use clap::Parser;
use std::path::PathBuf;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "saju-reader.toml";

#[derive(Debug, Clone, Parser)]
#[command(name = "saju-reader")]
#[command(about = "Saju (four pillars) fortune reading powered by a hosted language model")]
pub struct CliArgs {
    /// Name of the person being read
    #[arg(long)]
    pub name: String,

    #[arg(long, value_enum, default_value_t = Gender::Male)]
    pub gender: Gender,

    #[arg(long, default_value_t = 1990)]
    pub birth_year: i32,

    #[arg(long, default_value_t = 1)]
    pub birth_month: u32,

    #[arg(long, default_value_t = 1)]
    pub birth_day: u32,

    /// Birth time as 24h HH:MM; omit if unknown
    #[arg(long, default_value = "")]
    pub birth_time: String,

    /// Year to analyse (defaults to next year)
    #[arg(long)]
    pub target_year: Option<i32>,

    #[arg(long, value_enum, default_value_t = Topic::Wealth)]
    pub topic: Topic,

    #[arg(long = "detail", value_enum, default_value_t = DetailLevel::General)]
    pub detail_level: DetailLevel,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Disable ANSI colors in the report
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CliArgs {
    pub fn to_user_input(&self, current_year: i32) -> UserInput {
        UserInput {
            name: self.name.trim().to_string(),
            gender: self.gender,
            birth_year: self.birth_year,
            birth_month: self.birth_month,
            birth_day: self.birth_day,
            birth_time: self.birth_time.trim().to_string(),
            target_year: self.target_year.unwrap_or(current_year + 1),
            topic: self.topic,
            detail_level: self.detail_level,
        }
    }

    /// Explicit `--config`, else the default file if it exists.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(|| {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.exists().then_some(default)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_input_form() {
        let args = CliArgs::try_parse_from(["saju-reader", "--name", " 홍길동 "]).unwrap();
        let input = args.to_user_input(2026);
        assert_eq!(input, UserInput::with_defaults("홍길동", 2026));
    }

    #[test]
    fn test_all_fields() {
        let args = CliArgs::try_parse_from([
            "saju-reader",
            "--name",
            "김서연",
            "--gender",
            "female",
            "--birth-year",
            "1994",
            "--birth-month",
            "11",
            "--birth-day",
            "3",
            "--birth-time",
            "14:20",
            "--target-year",
            "2028",
            "--topic",
            "love",
            "--detail",
            "deep",
            "--no-color",
        ])
        .unwrap();
        let input = args.to_user_input(2026);
        assert_eq!(input.gender, Gender::Female);
        assert_eq!(input.birth_time, "14:20");
        assert_eq!(input.target_year, 2028);
        assert_eq!(input.topic, Topic::Love);
        assert_eq!(input.detail_level, DetailLevel::Deep);
        assert!(args.no_color);
    }

    #[test]
    fn test_name_is_required() {
        assert!(CliArgs::try_parse_from(["saju-reader"]).is_err());
    }
}
