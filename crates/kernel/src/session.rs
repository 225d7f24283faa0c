use bealtmian_common::{ConfigError, SessionConfig};
use bealtmian_input::InputSnapshot;
use std::time::Duration;

use crate::{
    CameraMotion, CameraPose, GamePhase, LoadingState, RandomSource, Scene, SessionRng,
};

/// Everything a running demo owns: configuration, camera, scene, loading
/// state and the random source.
///
/// One instance per run, touched only by the tick that draws frames.
pub struct Session {
    config: SessionConfig,
    camera: CameraPose,
    motion: CameraMotion,
    scene: Scene,
    loading: LoadingState,
    rng: Box<dyn RandomSource>,
}

/// Borrowed view of a session for drawing one frame.
pub struct FrameParts<'a> {
    pub config: &'a SessionConfig,
    pub camera: &'a CameraPose,
    pub scene: &'a Scene,
    pub rng: &'a mut dyn RandomSource,
}

impl Session {
    /// Start a session at clock time `started_at` with the configured seed.
    pub fn new(config: SessionConfig, started_at: Duration) -> Result<Self, ConfigError> {
        let rng = SessionRng::new(config.seed);
        Self::with_random(config, started_at, Box::new(rng))
    }

    /// Start a session drawing from a caller-supplied random source.
    pub fn with_random(
        config: SessionConfig,
        started_at: Duration,
        mut rng: Box<dyn RandomSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let scene = Scene::generate(&config, rng.as_mut());
        Self::with_scene(config, started_at, scene, rng)
    }

    /// Start a session around an existing scene.
    pub fn with_scene(
        config: SessionConfig,
        started_at: Duration,
        scene: Scene,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            camera: CameraPose::at(config.camera_start),
            motion: CameraMotion::from_config(&config),
            loading: LoadingState::new(started_at, config.loading_duration),
            config,
            scene,
            rng,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn camera(&self) -> &CameraPose {
        &self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn phase(&self) -> GamePhase {
        self.loading.phase()
    }

    pub fn loading(&self) -> &LoadingState {
        &self.loading
    }

    pub fn loading_mut(&mut self) -> &mut LoadingState {
        &mut self.loading
    }

    pub fn frame_parts(&mut self) -> FrameParts<'_> {
        FrameParts {
            config: &self.config,
            camera: &self.camera,
            scene: &self.scene,
            rng: self.rng.as_mut(),
        }
    }

    /// One frame of camera physics.
    pub fn step_camera(&mut self, input: InputSnapshot) {
        self.camera.apply_input(input, self.motion);
    }
}
