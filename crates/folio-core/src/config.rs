use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::anim::EasingType;
use crate::observer::RootMargin;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub particles: ParticleConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub scroll_spy: ScrollSpyConfig,
    #[serde(default)]
    pub typing: TypingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Portfolio content file; the built-in sample is used when unset
    #[serde(default)]
    pub content_path: Option<PathBuf>,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            content_path: None,
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds while nothing is animating
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Target frame rate while animations are running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Show the measured frame rate in the status bar
    #[serde(default)]
    pub show_fps: bool,
    /// Terminal width (columns) below which the nav collapses into a menu
    #[serde(default = "default_compact_width")]
    pub compact_width: u16,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            show_fps: false,
            compact_width: default_compact_width(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "portfolio", "nord")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Custom deserializer to accept either a string or a struct
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => {
                            name = Some(map.next_value()?);
                        }
                        "colors" => {
                            colors = Some(map.next_value()?);
                        }
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "portfolio".to_string()
}

/// Optional color overrides for theme customization
/// Each color is a hex string (e.g., "#4f8cff" or "4f8cff")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Page background
    pub bg0: Option<String>,
    /// Card background
    pub bg1: Option<String>,
    /// Primary foreground
    pub fg0: Option<String>,
    /// Secondary foreground
    pub fg1: Option<String>,
    /// Dimmed text
    pub muted: Option<String>,
    /// Brand color (links, active nav item)
    pub primary: Option<String>,
    /// Second brand color (tags, success flashes)
    pub secondary: Option<String>,
    /// Accent color (stat numbers)
    pub accent: Option<String>,
    /// Focused block border
    pub focus: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Smooth scrolling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate scroll position changes
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Duration of a scroll animation in milliseconds
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    /// Easing curve for scroll animations
    #[serde(default = "default_scroll_easing")]
    pub easing: EasingType,
    /// Lines per step when smooth scrolling is disabled
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Space left above a section after jumping to it, in pixels
    #[serde(default = "default_nav_offset")]
    pub nav_offset_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: default_scroll_easing(),
            scroll_lines: default_scroll_lines(),
            nav_offset_px: default_nav_offset(),
        }
    }
}

/// Background particle simulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Number of particles in the field
    #[serde(default = "default_particle_count")]
    pub count: usize,
    /// Pointer attraction radius in pixels
    #[serde(default = "default_attraction_radius")]
    pub attraction_radius: f64,
    /// Maximum distance for a connecting line, in pixels
    #[serde(default = "default_connection_radius")]
    pub connection_radius: f64,
    /// Alpha of a connecting line between coincident particles
    #[serde(default = "default_connection_alpha")]
    pub connection_alpha: f64,
    /// Glow blur radius drawn around each particle
    #[serde(default = "default_glow_radius")]
    pub glow_radius: f64,
    /// Particle count above which connections use a uniform grid
    #[serde(default = "default_grid_threshold")]
    pub grid_threshold: usize,
    /// Fixed RNG seed for reproducible fields
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            count: default_particle_count(),
            attraction_radius: default_attraction_radius(),
            connection_radius: default_connection_radius(),
            connection_alpha: default_connection_alpha(),
            glow_radius: default_glow_radius(),
            grid_threshold: default_grid_threshold(),
            seed: None,
        }
    }
}

/// One-shot reveal animation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Visible fraction that triggers the reveal
    #[serde(default = "default_reveal_threshold")]
    pub threshold: f64,
    /// Margin applied to the viewport, CSS order (top right bottom left)
    #[serde(default = "default_reveal_margin")]
    pub root_margin: RootMargin,
    #[serde(default = "default_reveal_duration")]
    pub duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Upward travel of a revealing block, in pixels
    #[serde(default = "default_reveal_distance")]
    pub distance_px: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            threshold: default_reveal_threshold(),
            root_margin: default_reveal_margin(),
            duration_ms: default_reveal_duration(),
            easing: EasingType::default(),
            distance_px: default_reveal_distance(),
        }
    }
}

/// Stat counter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterConfig {
    /// Total time to count from zero to the target
    #[serde(default = "default_counter_duration")]
    pub duration_ms: u64,
    /// Delay before the first increment
    #[serde(default = "default_counter_delay")]
    pub initial_delay_ms: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_counter_duration(),
            initial_delay_ms: default_counter_delay(),
        }
    }
}

/// Active nav link tracking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollSpyConfig {
    #[serde(default = "default_spy_threshold")]
    pub threshold: f64,
    #[serde(default = "default_spy_margin")]
    pub root_margin: RootMargin,
}

impl Default for ScrollSpyConfig {
    fn default() -> Self {
        Self {
            threshold: default_spy_threshold(),
            root_margin: default_spy_margin(),
        }
    }
}

/// Hero typing effect configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypingConfig {
    /// Phrases cycled by the typing effect; the content file's phrases win
    /// when this is empty
    #[serde(default)]
    pub phrases: Vec<String>,
    #[serde(default = "default_typing_start_delay")]
    pub start_delay_ms: u64,
    #[serde(default = "default_type_delay")]
    pub type_delay_ms: u64,
    #[serde(default = "default_delete_delay")]
    pub delete_delay_ms: u64,
    /// Pause with the full phrase on screen
    #[serde(default = "default_hold_delay")]
    pub hold_delay_ms: u64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            phrases: Vec::new(),
            start_delay_ms: default_typing_start_delay(),
            type_delay_ms: default_type_delay(),
            delete_delay_ms: default_delete_delay(),
            hold_delay_ms: default_hold_delay(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_compact_width() -> u16 {
    80
}

fn default_scroll_duration() -> u64 {
    1000
}

fn default_scroll_easing() -> EasingType {
    EasingType::QuadInOut
}

fn default_scroll_lines() -> u16 {
    3
}

fn default_nav_offset() -> f64 {
    80.0
}

fn default_particle_count() -> usize {
    50
}

fn default_attraction_radius() -> f64 {
    100.0
}

fn default_connection_radius() -> f64 {
    120.0
}

fn default_connection_alpha() -> f64 {
    0.1
}

fn default_glow_radius() -> f64 {
    20.0
}

fn default_grid_threshold() -> usize {
    200
}

fn default_reveal_threshold() -> f64 {
    0.1
}

fn default_reveal_margin() -> RootMargin {
    RootMargin::new(0.0, 0.0, -50.0, 0.0)
}

fn default_reveal_duration() -> u64 {
    800
}

fn default_reveal_distance() -> f64 {
    30.0
}

fn default_counter_duration() -> u64 {
    2000
}

fn default_counter_delay() -> u64 {
    100
}

fn default_spy_threshold() -> f64 {
    0.3
}

fn default_spy_margin() -> RootMargin {
    RootMargin::vertical(-80.0)
}

fn default_typing_start_delay() -> u64 {
    1200
}

fn default_type_delay() -> u64 {
    100
}

fn default_delete_delay() -> u64 {
    50
}

fn default_hold_delay() -> u64 {
    2000
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults when it is missing
    pub fn load_from(config_path: &std::path::Path) -> crate::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the particle field cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        let radius = self.particles.connection_radius;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(crate::Error::Config(format!(
                "particles.connection_radius must be a positive number, got {}",
                radius
            )));
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/folio/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("folio")
            .join("config.toml")
    }

    /// Default location for a user-provided portfolio file
    pub fn default_content_path() -> PathBuf {
        Self::config_path().with_file_name("portfolio.toml")
    }

    /// Get the log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("folio.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Content file to load, if any (with tilde expansion)
    pub fn content_path(&self) -> Option<PathBuf> {
        self.general.content_path.as_deref().map(expand_tilde)
    }

    /// Shorten transitions on hosts with few cores
    ///
    /// Hosts with fewer than 4 CPUs get 150 ms reveals and 200 ms scrolls.
    pub fn tuned_for_host(mut self, cpus: usize) -> Self {
        if cpus < 4 {
            self.reveal.duration_ms = self.reveal.duration_ms.min(150);
            self.scroll.animation_duration_ms = self.scroll.animation_duration_ms.min(200);
            tracing::info!("Low core count ({}), using short transitions", cpus);
        }
        self
    }
}
