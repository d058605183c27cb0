//! Gesture tracker and scene driven together, the way the render and
//! detection loops feed each other at runtime.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use glam::{Vec2, Vec3};
use tinsel::gesture::landmarks::{
    FINGERTIPS, INDEX_TIP, LANDMARK_COUNT, PALM_CENTER, THUMB_TIP, WRIST,
};
use tinsel::gesture::GestureClassifier;
use tinsel::scene::PhotoImage;
use tinsel::{
    DetectorError, DetectorPoll, GestureReport, GestureTracker, HandDetector,
    HandLandmarks, InteractionMode, Options, Scene,
};

struct Scripted(VecDeque<Result<DetectorPoll, DetectorError>>);

impl HandDetector for Scripted {
    fn detect(
        &mut self,
        _timestamp_ms: f64,
    ) -> Result<DetectorPoll, DetectorError> {
        self.0.pop_front().unwrap_or(Ok(DetectorPoll::NotReady))
    }
}

fn hand(spread: f32, pinch: bool, palm: Vec2) -> HandLandmarks {
    let mut points = [Vec3::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
    points[WRIST] = Vec3::new(0.5, 0.5, 0.0);
    for tip in FINGERTIPS {
        points[tip] = Vec3::new(0.5, 0.5 - spread, 0.0);
    }
    points[THUMB_TIP] = if pinch {
        points[INDEX_TIP] + Vec3::new(0.01, 0.0, 0.0)
    } else {
        Vec3::new(0.9, 0.5, 0.0)
    };
    points[PALM_CENTER] = palm.extend(0.0);
    HandLandmarks::new(points)
}

fn small_scene() -> Scene {
    let mut options = Options::default();
    options.scene.ornament_count = 60;
    options.scene.dust_count = 50;
    options.scene.seed = Some(42);
    Scene::new(&options)
}

fn photo() -> PhotoImage {
    PhotoImage::from_rgba(4, 2, vec![255; 4 * 2 * 4]).unwrap()
}

/// Run the tracker once per frame for `frames` frames, feeding reports into
/// the scene and ticking it at 60 Hz.
fn run(
    tracker: &mut GestureTracker<Scripted>,
    scene: &mut Scene,
    start_ms: f64,
    frames: usize,
) {
    for frame in 0..frames {
        if let Some(report) = tracker.tick(start_ms + frame as f64 * 16.0) {
            scene.apply_report(report);
        }
        scene.tick(1.0 / 60.0);
    }
}

#[test]
fn gestures_drive_mode_transitions() {
    let script = vec![
        Ok(DetectorPoll::NotReady),
        Ok(DetectorPoll::Hands(vec![hand(0.6, false, Vec2::new(0.7, 0.5))])),
        Ok(DetectorPoll::Hands(vec![hand(0.3, true, Vec2::new(0.5, 0.5))])),
        Ok(DetectorPoll::Hands(vec![hand(0.1, false, Vec2::new(0.5, 0.5))])),
        Ok(DetectorPoll::Hands(vec![])),
    ];
    let mut tracker =
        GestureTracker::new(Scripted(script.into()), GestureClassifier::default());
    let mut scene = small_scene();
    let _ = scene.add_photo(photo());

    let modes: Vec<InteractionMode> = (0..5)
        .filter_map(|i| {
            let report = tracker.tick(f64::from(i) * 16.0)?;
            scene.apply_report(report);
            Some(scene.mode())
        })
        .collect();

    assert_eq!(
        modes,
        vec![
            InteractionMode::Scatter,
            InteractionMode::Focus,
            InteractionMode::Tree,
            InteractionMode::Tree,
        ]
    );
    assert_eq!(tracker.stats().skipped, 1);
    assert_eq!(tracker.stats().processed, 4);
}

#[test]
fn pinch_brings_the_photo_forward() {
    let script: Vec<_> = (0..240)
        .map(|_| {
            Ok(DetectorPoll::Hands(vec![hand(0.3, true, Vec2::new(0.5, 0.5))]))
        })
        .collect();
    let mut tracker =
        GestureTracker::new(Scripted(script.into()), GestureClassifier::default());
    let mut scene = small_scene();
    let index = scene.add_photo(photo());

    run(&mut tracker, &mut scene, 0.0, 240);

    assert_eq!(scene.mode(), InteractionMode::Focus);
    assert_eq!(scene.focus_target(), Some(index));
    let focused = &scene.particles()[index];
    let slot = Vec3::from_array(scene.options().layout.focus_position);
    assert!(focused.current.position.distance(slot) < 1.0);
    assert!((focused.current.scale - scene.options().layout.focus_scale).abs() < 0.2);

    let background = scene.options().layout.background_scale;
    for p in scene.particles().iter().filter(|p| p.index() != index) {
        assert!((p.target.scale - background).abs() < 1e-6);
    }
}

#[test]
fn open_hand_steers_rotation_and_losing_it_holds() {
    let mut script = VecDeque::new();
    for _ in 0..120 {
        script.push_back(Ok(DetectorPoll::Hands(vec![hand(
            0.6,
            false,
            Vec2::new(1.0, 0.5),
        )])));
    }
    script.push_back(Ok(DetectorPoll::Hands(vec![])));
    let mut tracker =
        GestureTracker::new(Scripted(script), GestureClassifier::default());
    let mut scene = small_scene();

    run(&mut tracker, &mut scene, 0.0, 120);
    assert_eq!(scene.mode(), InteractionMode::Scatter);
    let yaw = scene.rotation().yaw();
    let (target_yaw, _) = tinsel::camera::SceneRotation::target_for(
        Vec2::new(1.0, 0.5),
        &scene.options().camera,
    );
    assert!((yaw - target_yaw).abs() < 1e-3);

    run(&mut tracker, &mut scene, 10_000.0, 1);
    assert_eq!(scene.mode(), InteractionMode::Tree);
    assert!((scene.rotation().yaw() - yaw).abs() < 1e-6);
}

#[test]
fn second_hand_is_ignored() {
    let script = vec![Ok(DetectorPoll::Hands(vec![
        hand(0.6, false, Vec2::new(0.2, 0.5)),
        hand(0.3, true, Vec2::new(0.8, 0.5)),
    ]))];
    let mut tracker =
        GestureTracker::new(Scripted(script.into()), GestureClassifier::default());
    let report = tracker.tick(1.0).unwrap();
    assert_eq!(report.mode, InteractionMode::Scatter);
    assert_eq!(report.pointer, Some(Vec2::new(0.2, 0.5)));
}

#[test]
fn detector_failures_keep_the_scene_alive() {
    let script = vec![
        Err(DetectorError::Unavailable("model failed to load".into())),
        Err(DetectorError::Transient("frame".into())),
        Ok(DetectorPoll::Hands(vec![hand(0.6, false, Vec2::new(0.5, 0.5))])),
    ];
    let mut tracker =
        GestureTracker::new(Scripted(script.into()), GestureClassifier::default());
    let seen = Rc::new(RefCell::new(Vec::<GestureReport>::new()));
    let sink = Rc::clone(&seen);
    tracker.set_listener(move |report| sink.borrow_mut().push(report));

    let mut scene = small_scene();
    run(&mut tracker, &mut scene, 0.0, 3);

    assert_eq!(tracker.stats().failed, 2);
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(scene.mode(), InteractionMode::Scatter);
}

#[test]
fn tree_layout_settles_onto_the_spiral() {
    let mut scene = small_scene();
    for _ in 0..600 {
        scene.tick(1.0 / 60.0);
    }
    let count = scene.particles().len();
    for p in scene.particles() {
        let expected =
            tinsel::scene::layout::tree(p.index(), count, &scene.options().layout);
        assert!(p.current.position.distance(expected.position) < 1e-2);
    }
}
