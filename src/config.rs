/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::sim::level::IslandLayout;

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub physics: PhysicsConfig,
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub session: SessionConfig,
}

/// Per-frame motion constants. `Default` is the canonical tuning.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsConfig {
    pub gravity: f32,              // added to dy every frame
    pub damping: f32,              // dx multiplier every frame
    pub max_run_speed: f32,        // |dx| bound before damping
    pub terminal_fall_speed: f32,  // upper bound on dy; ascent is unbounded
    pub jump_velocity: f32,
    pub broad_phase_radius: f32,   // origin-to-origin distance filter
}

#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    pub width: i32,
    pub height: i32,
    pub border: bool,
    pub seed: u64,
    pub islands: IslandLayout,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerConfig {
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub width: f32,
    pub height: f32,
    pub health: i32,
    pub run_accel: f32,            // dx added per frame while a direction is held
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    pub frames: u32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    physics: TomlPhysics,
    #[serde(default)]
    world: TomlWorld,
    #[serde(default)]
    player: TomlPlayer,
    #[serde(default)]
    session: TomlSession,
}

#[derive(Deserialize, Debug)]
struct TomlPhysics {
    #[serde(default = "default_gravity")]
    gravity: f32,
    #[serde(default = "default_damping")]
    damping: f32,
    #[serde(default = "default_max_run_speed")]
    max_run_speed: f32,
    #[serde(default = "default_terminal_fall_speed")]
    terminal_fall_speed: f32,
    #[serde(default = "default_jump_velocity")]
    jump_velocity: f32,
    #[serde(default = "default_broad_phase_radius")]
    broad_phase_radius: f32,
}

#[derive(Deserialize, Debug)]
struct TomlWorld {
    #[serde(default = "default_world_width")]
    width: i32,
    #[serde(default = "default_world_height")]
    height: i32,
    #[serde(default = "default_border")]
    border: bool,
    #[serde(default)]
    seed: u64,
    #[serde(default = "default_island_rows")]
    island_rows: u32,
    #[serde(default = "default_island_columns")]
    island_columns: u32,
}

#[derive(Deserialize, Debug)]
struct TomlPlayer {
    #[serde(default = "default_spawn_x")]
    spawn_x: f32,
    #[serde(default = "default_spawn_y")]
    spawn_y: f32,
    #[serde(default = "default_player_size")]
    width: f32,
    #[serde(default = "default_player_size")]
    height: f32,
    #[serde(default = "default_health")]
    health: i32,
    #[serde(default = "default_run_accel")]
    run_accel: f32,
}

#[derive(Deserialize, Debug)]
struct TomlSession {
    #[serde(default = "default_frames")]
    frames: u32,
    #[serde(default = "default_viewport_width")]
    viewport_width: f32,
    #[serde(default = "default_viewport_height")]
    viewport_height: f32,
}

// ── Defaults ──

fn default_gravity() -> f32 { 0.3 }
fn default_damping() -> f32 { 0.9 }
fn default_max_run_speed() -> f32 { 8.0 }
fn default_terminal_fall_speed() -> f32 { 5.0 }
fn default_jump_velocity() -> f32 { -12.0 }
fn default_broad_phase_radius() -> f32 { 40.0 }  // one tile

fn default_world_width() -> i32 { 200 }
fn default_world_height() -> i32 { 70 }
fn default_border() -> bool { true }
fn default_island_rows() -> u32 { 20 }
fn default_island_columns() -> u32 { 20 }

fn default_spawn_x() -> f32 { 40.0 }
fn default_spawn_y() -> f32 { 280.0 }
fn default_player_size() -> f32 { 30.0 }
fn default_health() -> i32 { 100 }
fn default_run_accel() -> f32 { 1.2 }

fn default_frames() -> u32 { 600 }               // 10s at 60 fps
fn default_viewport_width() -> f32 { 800.0 }
fn default_viewport_height() -> f32 { 450.0 }

impl Default for TomlPhysics {
    fn default() -> Self {
        TomlPhysics {
            gravity: default_gravity(),
            damping: default_damping(),
            max_run_speed: default_max_run_speed(),
            terminal_fall_speed: default_terminal_fall_speed(),
            jump_velocity: default_jump_velocity(),
            broad_phase_radius: default_broad_phase_radius(),
        }
    }
}

impl Default for TomlWorld {
    fn default() -> Self {
        TomlWorld {
            width: default_world_width(),
            height: default_world_height(),
            border: default_border(),
            seed: 0,
            island_rows: default_island_rows(),
            island_columns: default_island_columns(),
        }
    }
}

impl Default for TomlPlayer {
    fn default() -> Self {
        TomlPlayer {
            spawn_x: default_spawn_x(),
            spawn_y: default_spawn_y(),
            width: default_player_size(),
            height: default_player_size(),
            health: default_health(),
            run_accel: default_run_accel(),
        }
    }
}

impl Default for TomlSession {
    fn default() -> Self {
        TomlSession {
            frames: default_frames(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        TomlPhysics::default().into()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        TomlConfig::default().into()
    }
}

// ── Schema → public structs ──

impl From<TomlPhysics> for PhysicsConfig {
    fn from(t: TomlPhysics) -> Self {
        PhysicsConfig {
            gravity: t.gravity,
            damping: t.damping,
            max_run_speed: t.max_run_speed,
            terminal_fall_speed: t.terminal_fall_speed,
            jump_velocity: t.jump_velocity,
            broad_phase_radius: t.broad_phase_radius,
        }
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(t: TomlConfig) -> Self {
        GameConfig {
            physics: t.physics.into(),
            world: WorldConfig {
                width: t.world.width,
                height: t.world.height,
                border: t.world.border,
                seed: t.world.seed,
                islands: IslandLayout {
                    rows: t.world.island_rows,
                    columns: t.world.island_columns,
                },
            },
            player: PlayerConfig {
                spawn_x: t.player.spawn_x,
                spawn_y: t.player.spawn_y,
                width: t.player.width,
                height: t.player.height,
                health: t.player.health,
                run_accel: t.player.run_accel,
            },
            session: SessionConfig {
                frames: t.session.frames,
                viewport_width: t.session.viewport_width,
                viewport_height: t.session.viewport_height,
            },
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        for dir in candidate_dirs() {
            let path = dir.join("config.toml");
            if !path.exists() {
                continue;
            }
            match GameConfig::from_file(&path) {
                Ok(cfg) => {
                    info!(path = %path.display(), "loaded config");
                    return cfg;
                }
                Err(e @ ConfigError::Parse(_)) => {
                    warn!("{e}; using default settings");
                    return GameConfig::default();
                }
                Err(e) => warn!("{e}"),
            }
        }
        GameConfig::default()
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        GameConfig::from_toml_str(&text)
    }

    /// Strict parse: unknown sections are ignored, malformed values are errors.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(text)?;
        Ok(parsed.into())
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = GameConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, GameConfig::default());
        assert_eq!(cfg.physics.gravity, 0.3);
        assert_eq!(cfg.physics.damping, 0.9);
        assert_eq!(cfg.physics.max_run_speed, 8.0);
        assert_eq!(cfg.physics.terminal_fall_speed, 5.0);
        assert_eq!(cfg.physics.jump_velocity, -12.0);
        assert_eq!(cfg.physics.broad_phase_radius, 40.0);
        assert_eq!(cfg.world.islands, IslandLayout { rows: 20, columns: 20 });
        assert!(cfg.world.border);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = GameConfig::from_toml_str(
            "[world]\nseed = 99\nwidth = 64\n\n[player]\nrun_accel = 2.0\n",
        ).unwrap();
        assert_eq!(cfg.world.seed, 99);
        assert_eq!(cfg.world.width, 64);
        assert_eq!(cfg.world.height, 70);
        assert_eq!(cfg.player.run_accel, 2.0);
        assert_eq!(cfg.player.width, 30.0);
        assert_eq!(cfg.physics, PhysicsConfig::default());
    }

    #[test]
    fn malformed_value_is_a_parse_error() {
        let err = GameConfig::from_toml_str("[physics]\ngravity = \"down\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameConfig::from_file(Path::new("/nonexistent/island-hopper/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
