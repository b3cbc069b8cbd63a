use std::time::Duration;

use motion::{MotionError, RevealOptions, ScrollOptions, TypewriterOptions};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<MotionError> for ConfigError {
    fn from(err: MotionError) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

/// Parsed `hiredpath.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SiteConfig {
    pub version: u32,
    #[serde(default)]
    pub hero: HeroSection,
    #[serde(default)]
    pub scroll: ScrollOptions,
    #[serde(default)]
    pub effects: EffectsSection,
    #[serde(default)]
    pub page: PageSection,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            version: 1,
            hero: HeroSection::default(),
            scroll: ScrollOptions::default(),
            effects: EffectsSection::default(),
            page: PageSection::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionSetting {
    #[default]
    #[serde(alias = "auto")]
    NoPreference,
    Reduce,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HeroSection {
    /// Window size in logical pixels, written as `"WxH"`.
    #[serde(
        default,
        deserialize_with = "deserialize_size_opt",
        serialize_with = "serialize_size_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub size: Option<(u32, u32)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f32>,
    #[serde(
        default,
        deserialize_with = "deserialize_antialias_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub antialias: Option<AntialiasSetting>,
    #[serde(default)]
    pub motion: MotionSetting,
    #[serde(default = "default_max_pixel_ratio")]
    pub max_pixel_ratio: f32,
}

impl Default for HeroSection {
    fn default() -> Self {
        Self {
            size: None,
            fps: None,
            antialias: None,
            motion: MotionSetting::default(),
            max_pixel_ratio: default_max_pixel_ratio(),
        }
    }
}

/// `[effects]`: page effect tuning. Scalars come before the nested tables so
/// the TOML form keeps them under the `[effects]` header.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EffectsSection {
    pub parallax_speed: f32,
    pub tilt_max_degrees: f32,
    pub reveal: RevealOptions,
    pub typewriter: TypewriterOptions,
    pub count_up: CountUpSection,
}

impl Default for EffectsSection {
    fn default() -> Self {
        Self {
            parallax_speed: 0.2,
            tilt_max_degrees: 8.0,
            reveal: RevealOptions::default(),
            typewriter: TypewriterOptions::default(),
            count_up: CountUpSection::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CountUpSection {
    #[serde(default = "default_count_up_duration", with = "motion::duration")]
    pub duration: Duration,
}

impl Default for CountUpSection {
    fn default() -> Self {
        Self {
            duration: default_count_up_duration(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PageSection {
    pub title: String,
    pub waitlist_url: String,
}

impl Default for PageSection {
    fn default() -> Self {
        Self {
            title: "HiredPath".to_string(),
            waitlist_url: "https://forms.gle/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntialiasSetting {
    Auto,
    Off,
    Samples2,
    Samples4,
    Samples8,
    Samples16,
}

impl AntialiasSetting {
    /// MSAA sample count, or `None` for automatic selection.
    pub fn samples(self) -> Option<u32> {
        match self {
            Self::Auto => None,
            Self::Off => Some(1),
            Self::Samples2 => Some(2),
            Self::Samples4 => Some(4),
            Self::Samples8 => Some(8),
            Self::Samples16 => Some(16),
        }
    }
}

// Written the way `parse_antialias` reads it back.
impl Serialize for AntialiasSetting {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.samples() {
            None => serializer.serialize_str("auto"),
            Some(1) => serializer.serialize_str("off"),
            Some(samples) => serializer.serialize_u32(samples),
        }
    }
}

fn default_max_pixel_ratio() -> f32 {
    2.0
}

fn default_count_up_duration() -> Duration {
    Duration::from_secs(2)
}

fn deserialize_antialias_opt<'de, D>(deserializer: D) -> Result<Option<AntialiasSetting>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Helper {
        Str(String),
        Num(i64),
    }

    let helper: Option<Helper> = Option::deserialize(deserializer)?;
    let result = match helper {
        None => None,
        Some(Helper::Str(raw)) => Some(parse_antialias(&raw).map_err(de::Error::custom)?),
        Some(Helper::Num(value)) => {
            if value < 0 {
                return Err(de::Error::custom("antialias value must be non-negative"));
            }
            let raw = value.to_string();
            Some(parse_antialias(&raw).map_err(de::Error::custom)?)
        }
    };
    Ok(result)
}

/// Parses `auto`, `off` or an MSAA sample count.
pub fn parse_antialias(raw: &str) -> Result<AntialiasSetting, String> {
    let normalized = raw.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "auto" | "max" | "default" => Ok(AntialiasSetting::Auto),
        "off" | "none" | "disable" | "disabled" | "0" | "1" => Ok(AntialiasSetting::Off),
        "2" => Ok(AntialiasSetting::Samples2),
        "4" => Ok(AntialiasSetting::Samples4),
        "8" => Ok(AntialiasSetting::Samples8),
        "16" => Ok(AntialiasSetting::Samples16),
        other => Err(format!("invalid antialias setting '{other}'")),
    }
}

fn deserialize_size_opt<'de, D>(deserializer: D) -> Result<Option<(u32, u32)>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|value| parse_size(&value).map_err(de::Error::custom))
        .transpose()
}

fn serialize_size_opt<S>(value: &Option<(u32, u32)>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some((width, height)) => serializer.collect_str(&format_args!("{width}x{height}")),
        None => serializer.serialize_none(),
    }
}

/// Parses a `WIDTHxHEIGHT` pair such as `1280x720`.
pub fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("size must be WIDTHxHEIGHT (got '{value}')"))?;
    let width = w
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid width in '{value}'"))?;
    let height = h
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid height in '{value}'"))?;
    if width == 0 || height == 0 {
        return Err(format!("size must be non-zero (got '{value}')"));
    }
    Ok((width, height))
}

impl SiteConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: SiteConfig = toml::from_str(input)?;
        raw.validate()?;
        Ok(raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != 1 {
            return Err(ConfigError::Invalid(format!(
                "unsupported config version {}; expected 1",
                self.version
            )));
        }

        let hero = &self.hero;
        if let Some(fps) = hero.fps {
            if !(fps.is_finite() && fps >= 0.0) {
                return Err(ConfigError::Invalid("hero.fps must be >= 0".into()));
            }
        }
        if !(hero.max_pixel_ratio.is_finite()
            && hero.max_pixel_ratio > 0.0
            && hero.max_pixel_ratio <= 8.0)
        {
            return Err(ConfigError::Invalid(
                "hero.max_pixel_ratio must be in (0, 8]".into(),
            ));
        }

        self.scroll.validate()?;

        let effects = &self.effects;
        effects.reveal.validate()?;
        effects.typewriter.validate()?;
        if !effects.parallax_speed.is_finite() {
            return Err(ConfigError::Invalid(
                "effects.parallax_speed must be a finite number".into(),
            ));
        }
        if !(0.0..=45.0).contains(&effects.tilt_max_degrees) {
            return Err(ConfigError::Invalid(
                "effects.tilt_max_degrees must be between 0 and 45".into(),
            ));
        }

        let page = &self.page;
        if page.title.trim().is_empty() {
            return Err(ConfigError::Invalid("page.title must not be empty".into()));
        }
        let url = page.waitlist_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://") || url.starts_with('#')) {
            return Err(ConfigError::Invalid(format!(
                "page.waitlist_url must be an http(s) URL or #anchor (got '{url}')"
            )));
        }

        Ok(())
    }
}
