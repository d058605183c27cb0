//! The particle choreographer.
//!
//! [`Scene`] owns every particle, the current [`InteractionMode`], the focus
//! target, the pointer-driven [`SceneRotation`], and the ambient dust field.
//! Target transforms are recomputed only when the mode changes or a photo is
//! added; [`Scene::tick`] eases everything toward them each frame.

pub mod dust;
pub mod layout;
pub mod motion;
pub mod particle;
pub mod photo;

use glam::{Vec2, Vec3};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

pub use dust::DustField;
pub use particle::{Jitter, Particle, ParticleKind, PhotoId, Transform};
pub use photo::PhotoImage;

use crate::camera::SceneRotation;
use crate::gesture::{GestureReport, InteractionMode};
use crate::options::Options;

const ORNAMENT_KINDS: [ParticleKind; 3] =
    [ParticleKind::Cuboid, ParticleKind::Sphere, ParticleKind::Cane];

/// The authoritative particle scene.
pub struct Scene {
    particles: Vec<Particle>,
    mode: InteractionMode,
    focus: Option<usize>,
    rotation: SceneRotation,
    dust: DustField,
    photo_count: u32,
    pending_photos: Vec<(PhotoId, PhotoImage)>,
    options: Options,
    rng: StdRng,
}

impl Scene {
    /// Populate ornaments and dust from `options.scene` and lay them out in
    /// the default mode.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        let mut rng = options
            .scene
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let dust = DustField::new(
            options.scene.dust_count,
            options.scene.dust_radius,
            &mut rng,
        );
        let mut scene = Self {
            particles: Vec::with_capacity(options.scene.ornament_count),
            mode: InteractionMode::default(),
            focus: None,
            rotation: SceneRotation::default(),
            dust,
            photo_count: 0,
            pending_photos: Vec::new(),
            options: options.clone(),
            rng,
        };
        scene.populate_ornaments();
        scene.relayout();
        scene
    }

    fn populate_ornaments(&mut self) {
        let opts = &self.options.scene;
        let count = opts.ornament_count;
        let weights =
            WeightedIndex::new([opts.cuboid_weight, opts.sphere_weight, opts.cane_weight])
                .ok();
        if weights.is_none() {
            log::warn!("invalid ornament weights, using spheres only");
        }
        for _ in 0..count {
            let kind = weights
                .as_ref()
                .map_or(ParticleKind::Sphere, |w| ORNAMENT_KINDS[w.sample(&mut self.rng)]);
            let _ = self.push_particle(kind);
        }
    }

    fn push_particle(&mut self, kind: ParticleKind) -> usize {
        let m = self.options.scene.drift_magnitude;
        let drift = Vec3::new(
            self.rng.random_range(-1.0..=1.0),
            self.rng.random_range(-1.0..=1.0),
            self.rng.random_range(-1.0..=1.0),
        ) * m;
        let jitter = Jitter {
            radial: self.rng.random(),
            angle: self.rng.random(),
            depth: self.rng.random(),
        };
        let index = self.particles.len();
        self.particles.push(Particle::new(index, kind, drift, jitter));
        index
    }

    /// Recompute every particle's target for the current mode and focus.
    fn relayout(&mut self) {
        let count = self.particles.len();
        let (mode, focus) = (self.mode, self.focus);
        let opts = &self.options.layout;
        for p in &mut self.particles {
            p.target = layout::target_for(
                mode,
                p.index(),
                count,
                p.jitter(),
                focus == Some(p.index()),
                opts,
            );
        }
    }

    fn pick_focus(&mut self) -> Option<usize> {
        let photos: Vec<usize> = self
            .particles
            .iter()
            .filter(|p| p.kind().is_photo())
            .map(Particle::index)
            .collect();
        photos.choose(&mut self.rng).copied()
    }

    /// Switch interaction mode. Returns `false` (and does nothing) when
    /// `mode` is already current.
    ///
    /// Entering FOCUS picks a photo uniformly at random as the focus target;
    /// with no photos there is no target and every particle recedes.
    /// Leaving FOCUS clears the target.
    pub fn set_mode(&mut self, mode: InteractionMode) -> bool {
        if mode == self.mode {
            return false;
        }
        log::debug!("mode {} -> {}", self.mode, mode);
        self.mode = mode;
        let focus = if mode == InteractionMode::Focus {
            self.pick_focus()
        } else {
            None
        };
        self.set_focus(focus);
        self.relayout();
        true
    }

    /// Change the focus target. The focus target is drawn outside the scene
    /// rotation, so the outgoing and incoming particles have their current
    /// pose re-expressed in the other frame to keep them from jumping.
    fn set_focus(&mut self, focus: Option<usize>) {
        if focus == self.focus {
            return;
        }
        let rotation = self.rotation.quat();
        if let Some(p) = self.focus.and_then(|i| self.particles.get_mut(i)) {
            let inverse = rotation.inverse();
            p.current.position = inverse * p.current.position;
            p.current.rotation = (inverse * p.current.rotation).normalize();
        }
        if let Some(p) = focus.and_then(|i| self.particles.get_mut(i)) {
            p.current.position = rotation * p.current.position;
            p.current.rotation = (rotation * p.current.rotation).normalize();
        }
        self.focus = focus;
    }

    /// Append a framed photo panel and re-lay out so it eases into place.
    /// Returns the new particle's index (the prior particle count).
    pub fn add_photo(&mut self, image: PhotoImage) -> usize {
        let id = PhotoId(self.photo_count);
        self.photo_count += 1;
        let index = self.push_particle(ParticleKind::Photo {
            id,
            aspect: image.aspect(),
        });
        log::info!(
            "photo {} added as particle {index} ({}x{})",
            id.0,
            image.width(),
            image.height()
        );
        self.pending_photos.push((id, image));
        if self.mode == InteractionMode::Focus && self.focus.is_none() {
            let focus = self.pick_focus();
            self.set_focus(focus);
        }
        self.relayout();
        index
    }

    /// Feed the latest pointer. Absent pointers leave the rotation as is.
    pub fn update_interaction(&mut self, pointer: Option<Vec2>) {
        self.rotation.update(pointer, &self.options.camera);
    }

    /// Apply one classifier report: mode first, then pointer.
    pub fn apply_report(&mut self, report: GestureReport) {
        let _ = self.set_mode(report.mode);
        self.update_interaction(report.pointer);
    }

    /// Advance particles and dust by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let (mode, focus) = (self.mode, self.focus);
        let opts = &self.options.motion;
        for p in &mut self.particles {
            let focused = focus == Some(p.index());
            motion::advance(p, mode, focused, dt, opts);
        }
        self.dust.advance(dt, opts.dust_spin);
    }

    /// Replace options. Layout changes take effect immediately; population
    /// settings only apply to new scenes.
    pub fn set_options(&mut self, options: &Options) {
        self.options = options.clone();
        self.relayout();
    }

    /// Photos added since the last call, for texture upload.
    pub fn take_pending_photos(&mut self) -> Vec<(PhotoId, PhotoImage)> {
        std::mem::take(&mut self.pending_photos)
    }

    /// All particles in creation order.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current interaction mode.
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Index of the focused particle, if any.
    #[must_use]
    pub fn focus_target(&self) -> Option<usize> {
        self.focus
    }

    /// Scene-wide rotation.
    #[must_use]
    pub fn rotation(&self) -> &SceneRotation {
        &self.rotation
    }

    /// Ambient dust field.
    #[must_use]
    pub fn dust(&self) -> &DustField {
        &self.dust
    }

    /// Number of photo particles.
    #[must_use]
    pub fn photo_count(&self) -> u32 {
        self.photo_count
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }
}
