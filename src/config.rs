use crate::checker::rules::{MatchMode, Rule, RuleCategory, RuleError, SuggestionStrategy};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = ".writecoach.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub personal_dictionary: Option<PathBuf>,

    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,

    #[serde(default)]
    pub ignored_words: Vec<String>,

    /// Rule ids or category names to switch off.
    #[serde(default)]
    pub disabled_rules: Vec<String>,

    /// Report every match of every rule instead of one per first-match rule.
    #[serde(default)]
    pub exhaustive_matching: bool,

    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default)]
    pub custom_rules: Vec<CustomRule>,
}

/// A user-supplied pattern rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomRule {
    pub id: String,
    pub category: RuleCategory,
    pub pattern: String,
    pub message: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default = "default_match_mode")]
    pub match_mode: MatchMode,
    /// Capture group to flag instead of the whole match.
    #[serde(default)]
    pub span_group: Option<usize>,
}

impl CustomRule {
    pub fn compile(&self) -> Result<Rule, RuleError> {
        let rule = Rule::new(
            &self.id,
            self.category,
            &self.pattern,
            &self.message,
            SuggestionStrategy::Static(self.suggestions.clone()),
            self.match_mode,
        )?;
        match self.span_group {
            Some(group) => rule.with_span_group(group),
            None => Ok(rule),
        }
    }
}

fn default_ignore_patterns() -> Vec<String> {
    vec![
        r"^[A-Z]{2,}$".to_string(), // ALL-CAPS acronyms
    ]
}

fn default_debounce_ms() -> u64 {
    1000
}

fn default_match_mode() -> MatchMode {
    MatchMode::FindFirst
}

impl Default for Config {
    fn default() -> Self {
        Self {
            personal_dictionary: None,
            ignore_patterns: default_ignore_patterns(),
            ignored_words: Vec::new(),
            disabled_rules: Vec::new(),
            exhaustive_matching: false,
            debounce_ms: default_debounce_ms(),
            custom_rules: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(
        personal_dict: Option<PathBuf>,
        cli_patterns: Vec<String>,
        exhaustive: bool,
    ) -> Result<Self> {
        let mut config = Self::default();

        // Load global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global_config = Self::from_file(&global_path)?;
                config = config.merge(global_config);
            }
        }

        // Load local config (overrides global)
        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            let local_config = Self::from_file(&local_path)?;
            config = config.merge(local_config);
        }

        // Apply CLI overrides
        if let Some(dict) = personal_dict {
            config.personal_dictionary = Some(dict);
        }
        if !cli_patterns.is_empty() {
            config.ignore_patterns.extend(cli_patterns);
        }
        if exhaustive {
            config.exhaustive_matching = true;
        }

        // Set default personal dictionary if not specified
        if config.personal_dictionary.is_none() {
            config.personal_dictionary = Self::default_personal_dict_path();
        }

        tracing::debug!(
            personal_dictionary = ?config.personal_dictionary,
            custom_rules = config.custom_rules.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: Self) -> Self {
        // Merge logic: other's values override self's if they differ from defaults
        if other.personal_dictionary.is_some() {
            self.personal_dictionary = other.personal_dictionary;
        }
        if other.ignore_patterns != default_ignore_patterns() {
            self.ignore_patterns = other.ignore_patterns;
        }
        self.ignored_words.extend(other.ignored_words);
        self.disabled_rules.extend(other.disabled_rules);
        if other.debounce_ms != default_debounce_ms() {
            self.debounce_ms = other.debounce_ms;
        }
        self.custom_rules.extend(other.custom_rules);
        self.exhaustive_matching |= other.exhaustive_matching;
        self
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "writecoach").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn default_personal_dict_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "writecoach").map(|dirs| dirs.config_dir().join("personal.txt"))
    }
}
