//! On-disk configuration.
//!
//! Everything is optional; a missing file or key falls back to the built-in
//! profile so the binary runs out of the box.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::rain::{RainOptions, DEFAULT_DENSITY, DEFAULT_SPEED};
use crate::theme::ThemeMode;
use crate::{Result, TermfolioError};

pub const DEFAULT_PROMPT: &str = "visitor@portfolio:~$";

const APP_DIR: &str = "termfolio";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermfolioConfig {
    pub theme: ThemeMode,
    pub prompt: String,
    pub rain: RainConfig,
    pub profile: Profile,
}

impl Default for TermfolioConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            prompt: DEFAULT_PROMPT.to_string(),
            rain: RainConfig::default(),
            profile: Profile::default(),
        }
    }
}

impl TermfolioConfig {
    /// `<config_dir>/termfolio/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|source| TermfolioError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Load from the default location, or defaults when there is none.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(TermfolioError::Config("prompt must not be empty".into()));
        }
        if !(self.rain.speed.is_finite() && self.rain.speed > 0.0) {
            return Err(TermfolioError::Config(format!(
                "rain.speed must be a positive number, got {}",
                self.rain.speed
            )));
        }
        if !(self.rain.density.is_finite() && self.rain.density > 0.0) {
            return Err(TermfolioError::Config(format!(
                "rain.density must be a positive number, got {}",
                self.rain.density
            )));
        }
        Ok(())
    }

    pub fn with_theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_rain_enabled(mut self, enabled: bool) -> Self {
        self.rain.enabled = enabled;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    pub enabled: bool,
    pub speed: f32,
    pub density: f32,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: DEFAULT_SPEED,
            density: DEFAULT_DENSITY,
        }
    }
}

impl RainConfig {
    pub fn options(&self) -> RainOptions {
        RainOptions::default()
            .with_speed(self.speed)
            .with_density(self.density)
    }
}

/// Portfolio content shown in the section panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub email: String,
    pub about: String,
    pub highlights: Vec<String>,
    pub skills: Vec<SkillCategory>,
    pub projects: Vec<Project>,
    pub timeline: Vec<TimelineEntry>,
    pub links: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub title: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineKind {
    Education,
    Experience,
}

impl TimelineKind {
    pub fn label(&self) -> &'static str {
        match self {
            TimelineKind::Education => "education",
            TimelineKind::Experience => "experience",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub kind: TimelineKind,
    pub title: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub description: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "John Doe".into(),
            role: "Full Stack Developer".into(),
            email: "contact@example.com".into(),
            about: "Welcome to my digital workspace. I craft elegant solutions to complex problems."
                .into(),
            highlights: strings(&["TypeScript", "React", "Node.js", "Python", "AWS"]),
            skills: vec![
                SkillCategory {
                    title: "Frontend".into(),
                    skills: strings(&["React", "TypeScript", "Next.js", "Tailwind CSS", "Redux"]),
                },
                SkillCategory {
                    title: "Backend".into(),
                    skills: strings(&["Node.js", "Python", "Express", "FastAPI", "GraphQL"]),
                },
                SkillCategory {
                    title: "Database".into(),
                    skills: strings(&["PostgreSQL", "MongoDB", "Redis", "Prisma", "Supabase"]),
                },
                SkillCategory {
                    title: "DevOps".into(),
                    skills: strings(&["AWS", "Docker", "CI/CD", "Kubernetes", "Terraform"]),
                },
            ],
            projects: vec![
                Project {
                    title: "Portfolio Website".into(),
                    description: "A modern portfolio website built with React and TypeScript featuring a terminal-inspired design.".into(),
                    technologies: strings(&["React", "TypeScript", "Tailwind"]),
                    url: Some("https://example.com".into()),
                },
                Project {
                    title: "E-Commerce Platform".into(),
                    description: "Full-stack e-commerce solution with real-time inventory management.".into(),
                    technologies: strings(&["Next.js", "Node.js", "MongoDB"]),
                    url: Some("https://example.com".into()),
                },
                Project {
                    title: "Weather Dashboard".into(),
                    description: "Real-time weather tracking application with interactive maps.".into(),
                    technologies: strings(&["React", "Redux", "OpenWeather API"]),
                    url: Some("https://example.com".into()),
                },
            ],
            timeline: vec![
                TimelineEntry {
                    kind: TimelineKind::Education,
                    title: "Master of Computer Science".into(),
                    organization: "Tech University".into(),
                    period: "2020 - 2022".into(),
                    description: "Specialized in Artificial Intelligence and Machine Learning".into(),
                },
                TimelineEntry {
                    kind: TimelineKind::Experience,
                    title: "Senior Software Engineer".into(),
                    organization: "Tech Corp".into(),
                    period: "2022 - Present".into(),
                    description: "Leading frontend development team and architecting scalable solutions".into(),
                },
                TimelineEntry {
                    kind: TimelineKind::Education,
                    title: "Bachelor of Computer Science".into(),
                    organization: "State University".into(),
                    period: "2016 - 2020".into(),
                    description: "Focus on Software Engineering and Web Technologies".into(),
                },
                TimelineEntry {
                    kind: TimelineKind::Experience,
                    title: "Software Developer".into(),
                    organization: "StartUp Inc".into(),
                    period: "2020 - 2022".into(),
                    description: "Full-stack development using React and Node.js".into(),
                },
            ],
            links: strings(&["https://github.com"]),
        }
    }
}
