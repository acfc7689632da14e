//! Render job configuration.
//!
//! A TOML file lists one `[[job]]` table per image to render. Every field is
//! optional:
//!
//! ```toml
//! [[job]]
//! scene = "spheres"      # or "room"
//! width = 640
//! height = 480
//! reflect_levels = 2
//! shadows = true
//! output = "out1.png"
//! mesh_dir = "."         # where the room scene looks for Teddy.obj/Teapot.obj
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::raytrace::RenderSettings;
use crate::scene::{Scene, SceneError};
use crate::scenes;

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file does not exist.
    #[error("configuration file not found: {0}")]
    NotFound(String),

    /// The file exists but could not be read.
    #[error("failed to read configuration file: {0}")]
    Read(#[from] std::io::Error),

    /// The file is not valid TOML for a render configuration.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The file defines no jobs.
    #[error("configuration defines no [[job]] entries")]
    NoJobs,

    /// A job asks for an image with no pixels.
    #[error("job {job} has an empty image size {width}x{height}")]
    EmptyImage {
        /// 0-based position of the job in the file.
        job: usize,
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

/// Built-in scene selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Two spheres and a box in a corner.
    #[default]
    Spheres,
    /// Room with a box, floating spheres and the teddy/teapot meshes.
    Room,
}

impl SceneKind {
    /// Build the selected scene at the given resolution.
    pub fn build(self, width: u32, height: u32, mesh_dir: &Path) -> Result<Scene, SceneError> {
        match self {
            SceneKind::Spheres => scenes::spheres_and_cube(width, height),
            SceneKind::Room => scenes::room_with_meshes(width, height, mesh_dir),
        }
    }
}

/// One image to render.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    /// Scene to render.
    pub scene: SceneKind,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Mirror-reflection depth; 0 disables reflection.
    pub reflect_levels: u32,
    /// Whether lights cast shadows.
    pub shadows: bool,
    /// Output file (.png or .exr).
    pub output: PathBuf,
    /// Directory holding mesh files.
    pub mesh_dir: PathBuf,
}

impl Default for JobConfig {
    fn default() -> Self {
        let settings = RenderSettings::default();
        Self {
            scene: SceneKind::default(),
            width: 640,
            height: 480,
            reflect_levels: settings.reflect_levels,
            shadows: settings.has_shadow,
            output: PathBuf::from("output.png"),
            mesh_dir: PathBuf::from("."),
        }
    }
}

impl JobConfig {
    /// Tracing parameters for this job.
    pub fn settings(&self) -> RenderSettings {
        RenderSettings {
            reflect_levels: self.reflect_levels,
            has_shadow: self.shadows,
        }
    }

    /// Build the scene this job renders.
    pub fn build_scene(&self) -> Result<Scene, SceneError> {
        self.scene.build(self.width, self.height, &self.mesh_dir)
    }
}

/// Contents of a configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Jobs, rendered in order.
    #[serde(rename = "job", default)]
    pub jobs: Vec<JobConfig>,
}

impl RenderConfig {
    /// Parse configuration text.
    pub fn parse(content: &str) -> Result<RenderConfig, ConfigError> {
        let config: RenderConfig = toml::from_str(content)?;
        if config.jobs.is_empty() {
            return Err(ConfigError::NoJobs);
        }
        if let Some((job, j)) = config.jobs.iter().enumerate().find(|(_, j)| j.width == 0 || j.height == 0) {
            return Err(ConfigError::EmptyImage {
                job,
                width: j.width,
                height: j.height,
            });
        }
        Ok(config)
    }
}

/// Load configuration from a TOML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RenderConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    RenderConfig::parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_config() {
        let result = load_config("/nonexistent/render.toml");
        assert!(matches!(result.unwrap_err(), ConfigError::NotFound(_)));
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = RenderConfig::parse("[[job]\nwidth = ");
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = RenderConfig::parse("[[job]]\nsamples = 4\n");
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_empty_config_has_no_jobs() {
        assert!(matches!(RenderConfig::parse("").unwrap_err(), ConfigError::NoJobs));
    }

    #[test]
    fn test_zero_sized_job_is_rejected() {
        let result = RenderConfig::parse("[[job]]\n[[job]]\nwidth = 0\n");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::EmptyImage {
                job: 1,
                width: 0,
                height: 480
            }
        ));

        let result = RenderConfig::parse("[[job]]\nheight = 0\n");
        assert!(matches!(result.unwrap_err(), ConfigError::EmptyImage { job: 0, .. }));
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = RenderConfig::parse("[[job]]\nscene = \"room\"\nshadows = false\n").unwrap();
        let job = &config.jobs[0];
        assert_eq!(job.scene, SceneKind::Room);
        assert_eq!((job.width, job.height), (640, 480));
        assert_eq!(
            job.settings(),
            RenderSettings {
                reflect_levels: 2,
                has_shadow: false
            }
        );
        assert_eq!(job.output, PathBuf::from("output.png"));
    }

    #[test]
    fn test_load_config_valid() {
        let path = std::env::temp_dir().join("phongtrace_test_render.toml");
        let content = r#"
[[job]]
scene = "spheres"
width = 320
height = 240
reflect_levels = 0
output = "a.png"

[[job]]
scene = "room"
output = "b.exr"
mesh_dir = "meshes"
"#;
        std::fs::write(&path, content).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.jobs.len(), 2);
        assert_eq!(config.jobs[0].width, 320);
        assert_eq!(config.jobs[0].reflect_levels, 0);
        assert_eq!(config.jobs[1].scene, SceneKind::Room);
        assert_eq!(config.jobs[1].mesh_dir, PathBuf::from("meshes"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_job_builds_its_scene() {
        let job = JobConfig {
            width: 40,
            height: 30,
            ..JobConfig::default()
        };
        let scene = job.build_scene().unwrap();
        assert_eq!((scene.camera.image_width, scene.camera.image_height), (40, 30));
    }
}
