use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Result, bail};
use log::info;
use playlist_rs::{PatternError, RewriteRule, RuleSet, format::directives};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_output_filename")]
    pub output_filename: String,
    #[serde(default = "default_attribute_key")]
    pub attribute_key: String,
    pub sources: Vec<SourceConfig>,
    pub auxiliary: Option<AuxiliaryConfig>,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
    /// Everything up to and including this line is dropped from the source
    pub strip_sentinel: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfig {
    /// Omitted to match any value
    pub from: Option<String>,
    pub to: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuxiliaryConfig {
    pub path: PathBuf,
    /// Insert after this line instead of appending at the end
    pub insert_after: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpConfig {
    pub timeout: Option<u64>,
    pub user_agent: Option<String>,
    pub proxy: Option<String>,
}

fn default_output_dir() -> PathBuf {
    ".".into()
}

fn default_output_filename() -> String {
    "iptv.m3u".into()
}

fn default_attribute_key() -> String {
    directives::GROUP_TITLE.into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            output_filename: default_output_filename(),
            attribute_key: default_attribute_key(),
            sources: vec![
                SourceConfig::new(
                    "huya",
                    "http://10.0.1.1:35455/huyayqk.m3u",
                    vec![RuleConfig::exact("一起看", "huya"), RuleConfig::exact("原创", "huya")],
                ),
                SourceConfig::new(
                    "douyu",
                    "http://10.0.1.1:35455/douyuyqk.m3u",
                    vec![
                        RuleConfig::exact("一起看", "douyu"),
                        RuleConfig::exact("原创IP", "douyu"),
                    ],
                ),
            ],
            auxiliary: Some(AuxiliaryConfig {
                path: "updata.txt".into(),
                insert_after: None,
            }),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_filename)
    }

    /// `OUTPUT_DIR` wins over the configured directory
    pub fn override_output_dir(&mut self, output_dir: Option<impl Into<PathBuf>>) {
        if let Some(output_dir) = output_dir {
            self.output_dir = output_dir.into();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            bail!("No source configured");
        }
        if self.output_filename.trim().is_empty() {
            bail!("Output filename is empty");
        }
        if self.attribute_key.trim().is_empty() {
            bail!("Attribute key is empty");
        }

        for (index, source) in self.sources.iter().enumerate() {
            if source.name.trim().is_empty() {
                bail!("Source #{} has no name", index);
            }
            if source.url.trim().is_empty() {
                bail!("Source {} has no url", source.name);
            }
            if source.rules.iter().any(|x| x.to.is_empty()) {
                bail!("Source {} has a rule with an empty target", source.name);
            }
        }

        Ok(())
    }
}

impl SourceConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>, rules: Vec<RuleConfig>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            rules,
            strip_sentinel: None,
        }
    }

    pub fn rule_set(&self, attribute_key: &str) -> Result<RuleSet, PatternError> {
        let rules = self.rules.iter().map(RuleConfig::to_rule).collect();
        if attribute_key == directives::GROUP_TITLE {
            return Ok(RuleSet::group_title(rules));
        }
        RuleSet::new(attribute_key, rules)
    }
}

impl RuleConfig {
    pub fn exact(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: to.into(),
        }
    }

    pub fn any(to: impl Into<String>) -> Self {
        Self {
            from: None,
            to: to.into(),
        }
    }

    fn to_rule(&self) -> RewriteRule {
        match &self.from {
            Some(from) => RewriteRule::exact(from.as_str(), self.to.as_str()),
            None => RewriteRule::any(self.to.as_str()),
        }
    }
}

/// Environment variable naming the config file
pub const CONFIG_PATH_VAR: &str = "M3U_MERGE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.yml";

/// Loads the file named by `M3U_MERGE_CONFIG`, which then has to exist, or
/// else `config.yml` with the built-in sources as fallback.
pub fn load_config_from(configured: Option<impl AsRef<Path>>) -> Result<Config> {
    let Some(path) = configured else {
        return load_config(DEFAULT_CONFIG_PATH);
    };

    let path = path.as_ref();
    if !path.exists() {
        bail!(
            "Config file {} named by {} not found",
            path.display(),
            CONFIG_PATH_VAR
        );
    }
    load_config(path)
}

pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        info!("{} not found, using built-in sources", path.display());
        return Ok(Config::default());
    }

    let file = File::open(path)?;
    let config: Config = serde_yaml::from_reader(file)?;
    config.validate()?;
    Ok(config)
}
