use bealtmian_common::{Rgb, SessionConfig};
use bealtmian_input::InputSnapshot;
use bealtmian_kernel::scene::CUBE_FACES;
use bealtmian_kernel::{CameraPose, Cube, FloorGrid, GamePhase, RandomSource, Session};
use std::time::Duration;

use crate::pattern::{SKY_NOISE_RANGE, cube_color, floor_color, loading_color, sky_color};
use crate::{Canvas, Font, Viewport, project, project_all};

pub const LOADING_TEXT: &str = "LOADING BEALTMIAN";
pub const LOADING_FONT: Font = Font {
    family: "Arial Black",
    size: 34.0,
};

/// What one tick drew.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Phase the frame was drawn in.
    pub phase: GamePhase,
    /// Set on the tick that left the loading screen.
    pub entered_play: bool,
    pub floor_drawn: usize,
    pub floor_skipped: usize,
    pub faces_drawn: usize,
    pub faces_skipped: usize,
}

/// Per-tick orchestration over a `Session`.
///
/// Owns the session for the whole run. Each `tick` draws one complete frame
/// onto the canvas; in play it then advances the camera, so the frame shows
/// the pose from before this tick's input.
pub struct FrameComposer {
    session: Session,
    viewport: Viewport,
    frames: u64,
}

impl FrameComposer {
    pub fn new(session: Session) -> Self {
        let viewport = Viewport::from_config(session.config());
        Self {
            session,
            viewport,
            frames: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Ticks run so far, in either phase.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame at clock time `now` with the held keys in `input`.
    pub fn tick(&mut self, now: Duration, input: InputSnapshot, canvas: &mut dyn Canvas) -> FrameReport {
        let phase = self.session.phase();
        let _span = tracing::debug_span!("compose_frame", frame = self.frames, ?phase).entered();
        self.frames += 1;

        let report = match phase {
            GamePhase::Loading => self.loading_tick(now, canvas),
            GamePhase::Playing => self.playing_tick(input, canvas),
        };

        tracing::debug!(
            floor_drawn = report.floor_drawn,
            floor_skipped = report.floor_skipped,
            faces_drawn = report.faces_drawn,
            faces_skipped = report.faces_skipped,
            "frame composed"
        );
        report
    }

    fn loading_tick(&mut self, now: Duration, canvas: &mut dyn Canvas) -> FrameReport {
        let offset = self.session.loading().scroll_offset();
        draw_loading_screen(canvas, self.session.config(), offset);

        let loading = self.session.loading_mut();
        loading.advance_frame();
        let entered_play = loading.update(now).is_some();

        FrameReport {
            phase: GamePhase::Loading,
            entered_play,
            floor_drawn: 0,
            floor_skipped: 0,
            faces_drawn: 0,
            faces_skipped: 0,
        }
    }

    fn playing_tick(&mut self, input: InputSnapshot, canvas: &mut dyn Canvas) -> FrameReport {
        canvas.clear();
        let parts = self.session.frame_parts();
        draw_sky(canvas, parts.config, parts.rng);
        let (floor_drawn, floor_skipped) =
            draw_floor(canvas, parts.scene.floor(), parts.camera, &self.viewport);
        let (faces_drawn, faces_skipped) =
            draw_cubes(canvas, parts.scene.cubes(), parts.camera, &self.viewport);

        self.session.step_camera(input);

        FrameReport {
            phase: GamePhase::Playing,
            entered_play: false,
            floor_drawn,
            floor_skipped,
            faces_drawn,
            faces_skipped,
        }
    }
}

/// Clear, tile the canvas with the scrolling loading pattern, and center the
/// loading banner on top.
pub fn draw_loading_screen(canvas: &mut dyn Canvas, config: &SessionConfig, offset: i64) {
    canvas.clear();

    let tile = config.tile_size as usize;
    for y in (0..config.height).step_by(tile) {
        for x in (0..config.width).step_by(tile) {
            let color = loading_color(i64::from(x), i64::from(y), offset);
            let (x0, y0) = (f64::from(x), f64::from(y));
            let side = f64::from(config.tile_size);
            canvas.fill_rect(x0, y0, x0 + side, y0 + side, color);
        }
    }

    let (cx, cy) = config.center();
    canvas.draw_text(cx, cy, LOADING_TEXT, Rgb::WHITE, LOADING_FONT);
}

/// Full-width sky bands from the top down to the vertical midpoint, each with
/// a fresh random brightness.
pub fn draw_sky(canvas: &mut dyn Canvas, config: &SessionConfig, rng: &mut dyn RandomSource) {
    let band = config.sky_band_height as usize;
    let width = f64::from(config.width);
    let (lo, hi) = SKY_NOISE_RANGE;

    for top in (0..config.height / 2).step_by(band) {
        let noise = rng.int_inclusive(lo, hi).clamp(0, 255) as u8;
        let y0 = f64::from(top);
        canvas.fill_rect(
            0.0,
            y0,
            width,
            y0 + f64::from(config.sky_band_height),
            sky_color(noise),
        );
    }
}

/// Draw floor quads far to near. Returns `(drawn, skipped)`.
pub fn draw_floor(
    canvas: &mut dyn Canvas,
    floor: &FloorGrid,
    camera: &CameraPose,
    viewport: &Viewport,
) -> (usize, usize) {
    let mut drawn = 0;
    let mut skipped = 0;
    for quad in floor.quads() {
        match project_all(&quad.corners(), camera, viewport) {
            Some(points) => {
                let color = floor_color(f64::from(quad.x), f64::from(quad.z));
                canvas.fill_polygon(&points, color, None);
                drawn += 1;
            }
            None => skipped += 1,
        }
    }
    (drawn, skipped)
}

/// Cubes ordered farthest first by ground-plane distance from the camera.
/// The scene itself is left untouched, so every frame sorts from scene order
/// and cubes at exactly equal distance always come out in scene order, not in
/// whatever order the previous frame left them.
pub fn depth_order<'a>(cubes: &'a [Cube], camera: &CameraPose) -> Vec<&'a Cube> {
    let mut ordered: Vec<(f64, &Cube)> = cubes
        .iter()
        .map(|cube| (camera.ground_distance(cube.position), cube))
        .collect();
    ordered.sort_by(|a, b| b.0.total_cmp(&a.0));
    ordered.into_iter().map(|(_, cube)| cube).collect()
}

/// Painter's-order cube pass. Returns `(faces drawn, faces skipped)`.
pub fn draw_cubes(
    canvas: &mut dyn Canvas,
    cubes: &[Cube],
    camera: &CameraPose,
    viewport: &Viewport,
) -> (usize, usize) {
    depth_order(cubes, camera)
        .into_iter()
        .fold((0, 0), |(drawn, skipped), cube| {
            let (d, s) = draw_cube(canvas, cube, camera, viewport);
            (drawn + d, skipped + s)
        })
}

/// Draw the faces of one cube whose corners all project, outlined in black.
pub fn draw_cube(
    canvas: &mut dyn Canvas,
    cube: &Cube,
    camera: &CameraPose,
    viewport: &Viewport,
) -> (usize, usize) {
    let projected = cube.vertices().map(|v| project(v, camera, viewport));
    let color = cube_color(cube.position);

    let mut drawn = 0;
    let mut skipped = 0;
    for face in CUBE_FACES {
        let corners: Option<Vec<_>> = face.iter().map(|i| projected[*i].map(|p| p.xy())).collect();
        match corners {
            Some(points) => {
                canvas.fill_polygon(&points, color, Some(Rgb::BLACK));
                drawn += 1;
            }
            None => skipped += 1,
        }
    }
    (drawn, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DisplayList, DrawCommand};
    use bealtmian_kernel::{ScriptedRandom, Scene};
    use glam::DVec3;
    use std::f64::consts::PI;

    fn cube_at(x: f64, z: f64) -> Cube {
        Cube::new(DVec3::new(x, 0.0, z), 0.5)
    }

    fn composer(cubes: Vec<Cube>, camera_start: DVec3) -> FrameComposer {
        let config = SessionConfig {
            camera_start,
            ..SessionConfig::default()
        };
        let session = Session::with_scene(
            config,
            Duration::ZERO,
            Scene::from_cubes(cubes),
            Box::new(ScriptedRandom::constant(40)),
        )
        .unwrap();
        FrameComposer::new(session)
    }

    /// Run the loading splash out so the next tick is a play frame.
    fn into_play(composer: &mut FrameComposer) {
        let mut list = DisplayList::new();
        let report = composer.tick(Duration::from_secs(4), InputSnapshot::EMPTY, &mut list);
        assert!(report.entered_play);
    }

    #[test]
    fn depth_order_is_farthest_first() {
        let cubes = [cube_at(0.0, 5.0), cube_at(0.0, 20.0)];
        let camera = CameraPose::at(DVec3::ZERO);
        let ordered = depth_order(&cubes, &camera);
        assert_eq!(ordered[0].position.z, 20.0);
        assert_eq!(ordered[1].position.z, 5.0);
    }

    #[test]
    fn depth_order_uses_ground_plane_and_is_stable() {
        let cubes = [
            Cube::new(DVec3::new(3.0, 0.0, 4.0), 1.0),
            Cube::new(DVec3::new(0.0, 50.0, 5.0), 1.0),
            Cube::new(DVec3::new(0.0, 0.0, 1.0), 1.0),
        ];
        let camera = CameraPose::at(DVec3::ZERO);
        let ordered = depth_order(&cubes, &camera);
        // The first two tie at distance 5 and keep scene order.
        assert_eq!(ordered[0], &cubes[0]);
        assert_eq!(ordered[1], &cubes[1]);
        assert_eq!(ordered[2], &cubes[2]);
    }

    #[test]
    fn far_cube_is_drawn_before_near_cube() {
        let mut composer = composer(vec![cube_at(0.0, 5.0), cube_at(0.0, 20.0)], DVec3::ZERO);
        into_play(&mut composer);

        let mut list = DisplayList::new();
        composer.tick(Duration::from_secs(5), InputSnapshot::EMPTY, &mut list);

        let cube_fills: Vec<Rgb> = list
            .polygons()
            .filter(|(_, _, outline)| outline.is_some())
            .map(|(_, fill, _)| fill)
            .collect();
        let far = cube_color(DVec3::new(0.0, 0.0, 20.0));
        let near = cube_color(DVec3::new(0.0, 0.0, 5.0));
        let first_near = cube_fills.iter().position(|c| *c == near).unwrap();
        let last_far = cube_fills.iter().rposition(|c| *c == far).unwrap();
        assert!(last_far < first_near);
    }

    #[test]
    fn loading_frame_tiles_canvas_and_shows_banner() {
        let mut composer = composer(Vec::new(), DVec3::ZERO);
        let mut list = DisplayList::new();
        let report = composer.tick(Duration::from_millis(30), InputSnapshot::EMPTY, &mut list);

        assert_eq!(report.phase, GamePhase::Loading);
        assert!(!report.entered_play);
        let stats = list.stats();
        assert_eq!(stats.clears, 1);
        assert_eq!(stats.rects, 40 * 30);
        assert_eq!(stats.texts, 1);
        assert!(matches!(
            list.commands().last(),
            Some(DrawCommand::Text { text, x, y, .. })
                if text == LOADING_TEXT && *x == 400.0 && *y == 300.0
        ));
        assert_eq!(composer.session().loading().frame_count(), 1);
    }

    #[test]
    fn loading_pattern_scrolls_with_frame_counter() {
        let mut composer = composer(Vec::new(), DVec3::ZERO);
        let mut first = DisplayList::new();
        let mut second = DisplayList::new();
        composer.tick(Duration::ZERO, InputSnapshot::EMPTY, &mut first);
        composer.tick(Duration::from_millis(30), InputSnapshot::EMPTY, &mut second);

        // Second frame uses offset 5.
        let expected = loading_color(100, 40, 5);
        assert!(second.commands().iter().any(|cmd| matches!(
            cmd,
            DrawCommand::FillRect { x0, y0, color, .. }
                if *x0 == 100.0 && *y0 == 40.0 && *color == expected
        )));
    }

    #[test]
    fn loading_ignores_input() {
        let mut composer = composer(Vec::new(), DVec3::ZERO);
        let mut list = DisplayList::new();
        composer.tick(Duration::ZERO, InputSnapshot::from_chars("wd"), &mut list);
        assert_eq!(composer.session().camera().position, DVec3::ZERO);
        assert_eq!(composer.session().camera().yaw, 0.0);
    }

    #[test]
    fn play_stays_after_transition() {
        let mut composer = composer(Vec::new(), DVec3::ZERO);
        let mut list = DisplayList::new();
        composer.tick(Duration::from_millis(2900), InputSnapshot::EMPTY, &mut list);
        assert_eq!(composer.session().phase(), GamePhase::Loading);
        let report = composer.tick(Duration::from_millis(3100), InputSnapshot::EMPTY, &mut list);
        assert!(report.entered_play);
        assert_eq!(composer.session().phase(), GamePhase::Playing);

        for secs in [4, 60, 3600] {
            let report = composer.tick(Duration::from_secs(secs), InputSnapshot::EMPTY, &mut list);
            assert_eq!(report.phase, GamePhase::Playing);
        }
    }

    #[test]
    fn sky_bands_use_random_source() {
        let config = SessionConfig::default();
        let mut rng = ScriptedRandom::constant(40);
        let mut list = DisplayList::new();
        draw_sky(&mut list, &config, &mut rng);

        let bands: Vec<_> = list
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillRect { y0, y1, x1, color, .. } => Some((*y0, *y1, *x1, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(bands.len(), 15);
        assert_eq!(bands[0], (0.0, 20.0, 800.0, Rgb::new(40, 40, 60)));
        assert_eq!(bands[14].0, 280.0);
        assert!(bands.iter().all(|b| b.3.to_hex() == "#28283c"));
    }

    #[test]
    fn sky_noise_changes_per_band() {
        let config = SessionConfig::default();
        let mut rng = ScriptedRandom::new(vec![20, 60], Vec::new());
        let mut list = DisplayList::new();
        draw_sky(&mut list, &config, &mut rng);
        let colors: Vec<Rgb> = list
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors[0], sky_color(20));
        assert_eq!(colors[1], sky_color(60));
    }

    #[test]
    fn floor_fully_visible_from_default_pose() {
        let mut list = DisplayList::new();
        let floor = FloorGrid::default();
        let (drawn, skipped) =
            draw_floor(&mut list, &floor, &CameraPose::default(), &Viewport::default());
        assert_eq!((drawn, skipped), (300, 0));

        let (first_points, first_fill, outline) = list.polygons().next().unwrap();
        assert_eq!(first_points.len(), 4);
        assert_eq!(first_fill, floor_color(-30.0, 50.0));
        assert_eq!(outline, None);
    }

    #[test]
    fn floor_behind_camera_is_skipped() {
        let mut camera = CameraPose::default();
        camera.yaw = PI;
        let mut list = DisplayList::new();
        let (drawn, skipped) =
            draw_floor(&mut list, &FloorGrid::default(), &camera, &Viewport::default());
        assert_eq!((drawn, skipped), (0, 300));
        assert!(list.is_empty());
    }

    #[test]
    fn floor_straddling_camera_is_partially_skipped() {
        let camera = CameraPose::at(DVec3::new(0.0, -2.0, 20.0));
        let mut list = DisplayList::new();
        let (drawn, skipped) =
            draw_floor(&mut list, &FloorGrid::default(), &camera, &Viewport::default());
        // Rows z=25..50 lie ahead, z=5..20 touch or trail the camera.
        assert_eq!(drawn, 6 * 30);
        assert_eq!(skipped, 4 * 30);
    }

    #[test]
    fn cube_ahead_draws_all_faces_outlined() {
        let mut list = DisplayList::new();
        let (drawn, skipped) = draw_cube(
            &mut list,
            &cube_at(0.0, 10.0),
            &CameraPose::at(DVec3::ZERO),
            &Viewport::default(),
        );
        assert_eq!((drawn, skipped), (6, 0));
        assert!(list.polygons().all(|(points, fill, outline)| {
            points.len() == 4
                && fill == cube_color(DVec3::new(0.0, 0.0, 10.0))
                && outline == Some(Rgb::BLACK)
        }));
    }

    #[test]
    fn cube_straddling_near_plane_skips_faces() {
        let mut list = DisplayList::new();
        // Camera sits inside the cube: the near face vertices are behind it.
        let (drawn, skipped) = draw_cube(
            &mut list,
            &Cube::new(DVec3::new(0.0, 0.0, 0.0), 1.0),
            &CameraPose::at(DVec3::ZERO),
            &Viewport::default(),
        );
        assert_eq!(drawn, 1);
        assert_eq!(skipped, 5);
    }

    #[test]
    fn playing_frame_layers_sky_floor_cubes() {
        let mut composer = composer(vec![cube_at(0.0, 10.0)], DVec3::new(0.0, -2.0, -5.0));
        into_play(&mut composer);

        let mut list = DisplayList::new();
        let report = composer.tick(Duration::from_secs(5), InputSnapshot::EMPTY, &mut list);
        assert_eq!(report.phase, GamePhase::Playing);
        assert_eq!(report.floor_drawn, 300);
        assert_eq!(report.faces_drawn, 6);

        let cmds = list.commands();
        assert_eq!(cmds[0], DrawCommand::Clear);
        assert!(cmds[1..16].iter().all(|c| matches!(c, DrawCommand::FillRect { .. })));
        assert!(matches!(&cmds[16], DrawCommand::FillPolygon { outline: None, .. }));
        assert!(matches!(
            cmds.last(),
            Some(DrawCommand::FillPolygon {
                outline: Some(_),
                ..
            })
        ));
        assert_eq!(list.stats().polygons, 306);
    }

    #[test]
    fn physics_runs_after_drawing() {
        let mut composer = composer(Vec::new(), DVec3::new(0.0, -2.0, -5.0));
        into_play(&mut composer);

        let mut list = DisplayList::new();
        composer.tick(Duration::from_secs(5), InputSnapshot::from_chars("w"), &mut list);

        // The frame shows the pre-update pose.
        let expected = project_all(
            &FloorGrid::default().quads().next().unwrap().corners(),
            &CameraPose::default(),
            &Viewport::default(),
        )
        .unwrap();
        let (first_points, _, _) = list.polygons().next().unwrap();
        assert_eq!(first_points, &expected);

        // Then the camera moved.
        let z = composer.session().camera().position.z;
        assert!((z - (-4.7)).abs() < 1e-12);
    }

    #[test]
    fn scene_is_unchanged_after_many_frames() {
        let cubes = vec![cube_at(-5.0, 30.0), cube_at(0.0, 5.0), cube_at(12.0, 18.0)];
        let mut composer = composer(cubes.clone(), DVec3::new(0.0, -2.0, -5.0));
        into_play(&mut composer);

        let mut list = DisplayList::new();
        for i in 0..50 {
            let keys = if i % 2 == 0 { "wd" } else { "a" };
            composer.tick(Duration::from_secs(5), InputSnapshot::from_chars(keys), &mut list);
        }
        assert_eq!(composer.session().scene().cubes(), cubes.as_slice());
        assert_eq!(composer.frames(), 51);
    }
}
