use crate::{
    effects::{
        counter::Counter,
        motion::VelocityFx,
        trail::TrailCanvas,
    },
    foundation::core::{Point, Rect, Viewport},
    foundation::error::HeroResult,
    hero::{
        config::{HeroConfig, Variant},
        timelines::{self, FLAME, HEADLIGHTS, SCROLL_PROMPT, VEHICLE},
    },
    interact::{
        keyboard::{KeyboardScroller, ScrollKey},
        rev::{RevGuard, rev_timeline},
        tilt::Tilt,
    },
    runtime::scheduler::{PlaybackId, Scheduler},
    scene::{
        registry::{ElementId, Scene, SceneSnapshot},
        style::Prop,
    },
    scroll::{
        adapter::{ScrollAdapter, ScrollPhase, ScrollUpdate},
        scrub::Scrub,
    },
    timeline::compile::CompiledTimeline,
};

/// Where the vehicle sits in the viewport before any translation, as
/// fractions of the viewport size. Used to place trail stamps.
const VEHICLE_ANCHOR: (f64, f64) = (0.5, 0.72);

/// Smallest horizontal move that leaves a new trail stamp.
const TRAIL_MIN_STEP_PX: f64 = 1.0;

struct Roles {
    vehicle: Option<ElementId>,
    flame: Option<ElementId>,
    prompt: Option<ElementId>,
    cards: Vec<ElementId>,
}

/// Result of one animation frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FrameReport {
    pub time: f64,
    pub progress: f64,
    /// Scroll timeline playhead in seconds.
    pub playhead: f64,
    /// Offset the host should scroll to (batched keyboard input).
    pub scroll_request: Option<f64>,
    pub rev_finished: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageSnapshot {
    pub time: f64,
    pub mounted: bool,
    pub offset: f64,
    pub progress: f64,
    pub playhead: f64,
    pub phase: ScrollPhase,
    pub velocity: f64,
    pub revving: bool,
    pub counters: Vec<String>,
    pub trail_points: usize,
    pub scene: SceneSnapshot,
}

impl PageSnapshot {
    pub fn fingerprint(&self) -> HeroResult<u64> {
        let bytes = serde_json::to_vec(self)?;
        Ok(xxhash_rust::xxh3::xxh3_64(&bytes))
    }
}

/// The hero section: owns the scene, its timelines and every input handler.
///
/// Hosts forward events to the `on_*` callbacks and call [`HeroPage::frame`]
/// once per animation frame. All times are caller-supplied seconds on a
/// monotonic clock.
pub struct HeroPage {
    config: HeroConfig,
    fx: VelocityFx,
    counters: Vec<Counter>,
    scene: Scene,
    roles: Roles,
    scheduler: Scheduler,
    scroll: ScrollAdapter,
    scrub: Scrub,
    scroll_tl: Option<CompiledTimeline>,
    playhead: Option<f64>,
    load: Option<PlaybackId>,
    /// Properties written by both the load and the scroll timeline.
    contested: Vec<(ElementId, Prop)>,
    rev: RevGuard,
    keys: KeyboardScroller,
    trail: TrailCanvas,
    now: f64,
    last_frame: Option<f64>,
    velocity: f64,
    fx_resting: bool,
    last_trail_x: Option<f64>,
    mounted: bool,
}

impl HeroPage {
    pub fn new(config: HeroConfig) -> HeroResult<Self> {
        config.validate()?;
        let scene = timelines::build_scene(&config)?;
        let roles = Roles {
            vehicle: scene.lookup(VEHICLE),
            flame: scene.lookup(FLAME),
            prompt: scene.lookup(SCROLL_PROMPT),
            cards: (0..config.stats.len())
                .filter_map(|i| scene.lookup(&timelines::stat_name(i)))
                .collect(),
        };
        let vp = config.viewport;
        let scroll = ScrollAdapter::new(
            config.pin_steps(),
            config.region_start,
            vp,
            config.velocity_window_secs,
        )?;
        let keys = KeyboardScroller::new(
            config.arrow_step_px,
            vp.height * config.page_step_ratio,
            scroll.max_offset(),
        );
        let (w, h) = vp.surface_size();

        Ok(Self {
            fx: config.velocity_fx(),
            counters: config.counters()?,
            scrub: Scrub::new(config.scrub_lag()),
            trail: TrailCanvas::new(w, h, config.trail),
            scheduler: Scheduler::new(),
            scroll_tl: None,
            playhead: None,
            load: None,
            contested: Vec::new(),
            rev: RevGuard::default(),
            now: 0.0,
            last_frame: None,
            velocity: 0.0,
            fx_resting: true,
            last_trail_x: None,
            mounted: false,
            config,
            scene,
            roles,
            scroll,
            keys,
        })
    }

    pub fn config(&self) -> &HeroConfig {
        &self.config
    }

    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Host-side structural changes (an element leaving the document).
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn trail(&self) -> &TrailCanvas {
        &self.trail
    }

    pub fn scroll(&self) -> &ScrollAdapter {
        &self.scroll
    }

    pub fn scroll_timeline(&self) -> Option<&CompiledTimeline> {
        self.scroll_tl.as_ref()
    }

    pub fn progress(&self) -> f64 {
        self.scroll.progress()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_revving(&self) -> bool {
        self.rev.is_revving()
    }

    pub fn is_loading(&self) -> bool {
        self.load.is_some()
    }

    /// Current text of every statistic counter.
    pub fn counter_texts(&self) -> Vec<String> {
        self.counters
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let v = self
                    .roles
                    .cards
                    .get(i)
                    .and_then(|id| self.scene.scalar(*id, Prop::Counter))
                    .unwrap_or(c.value);
                c.format(v)
            })
            .collect()
    }

    /// Apply initial state, bind the scroll timeline and start the load
    /// sequence.
    #[tracing::instrument(skip(self), fields(variant = ?self.config.variant))]
    pub fn mount(&mut self, now: f64) -> HeroResult<()> {
        if self.mounted {
            return Ok(());
        }
        self.now = now;
        self.last_frame = Some(now);
        let update = self.scroll.update(self.scroll.offset(), now);
        self.scrub.jump(update.progress);
        self.rebuild(Some(0.0))?;
        self.mounted = true;
        tracing::info!(progress = update.progress, "hero mounted");
        Ok(())
    }

    /// Stop everything and return the scene to its unanimated state.
    pub fn unmount(&mut self) {
        self.scheduler.clear();
        self.scene.revert();
        self.trail.reset();
        self.rev.reset();
        self.keys.flush_frame();
        self.load = None;
        self.contested.clear();
        self.scroll_tl = None;
        self.playhead = None;
        self.last_trail_x = None;
        self.mounted = false;
        tracing::info!("hero unmounted");
    }

    pub fn on_scroll(&mut self, offset: f64, now: f64) -> HeroResult<ScrollUpdate> {
        self.now = now;
        let update = self.scroll.update(offset, now);
        self.velocity = update.velocity;
        if self.mounted {
            self.scrub.set_target(update.progress, now);
            self.apply_motion(update.velocity, update.progress)?;
        }
        Ok(update)
    }

    pub fn on_pointer_move(&mut self, card: usize, rect: Rect, pointer: Point) -> HeroResult<Option<Tilt>> {
        let Some(id) = self.present_card(card) else {
            return Ok(None);
        };
        let tilt = Tilt::from_pointer(rect, pointer, self.config.tilt.gain);
        for spec in tilt.follow(id, &self.config.tilt) {
            self.scheduler.tween(&mut self.scene, spec)?;
        }
        Ok(Some(tilt))
    }

    pub fn on_pointer_leave(&mut self, card: usize) -> HeroResult<bool> {
        let Some(id) = self.present_card(card) else {
            return Ok(false);
        };
        for spec in Tilt::reset(id, &self.config.tilt) {
            self.scheduler.tween(&mut self.scene, spec)?;
        }
        Ok(true)
    }

    /// Start the rev sequence. Returns `false` when ignored.
    pub fn on_vehicle_click(&mut self) -> HeroResult<bool> {
        if !self.mounted || self.roles.vehicle.is_none_or(|id| !self.scene.is_present(id)) {
            return Ok(false);
        }
        if self.rev.is_revving() {
            tracing::debug!("rev ignored: already revving");
            return Ok(false);
        }
        let tl = rev_timeline(VEHICLE, FLAME, HEADLIGHTS)?.compile(&self.scene, self.scene.viewport())?;
        let id = self.scheduler.play(tl, &mut self.scene);
        Ok(self.rev.begin(id))
    }

    /// Queue a key press; returns whether the key scrolls the page.
    pub fn on_key(&mut self, key: &str) -> bool {
        match ScrollKey::from_dom(key) {
            Some(k) => {
                self.keys.press(k);
                true
            }
            None => false,
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn on_resize(&mut self, viewport: Viewport, now: f64) -> HeroResult<ScrollUpdate> {
        viewport.validate()?;
        self.now = now;
        self.config.viewport = viewport;
        self.scene.set_viewport(viewport);

        let update = self.scroll.resize(viewport, now)?;
        self.keys.set_extent(
            viewport.height * self.config.page_step_ratio,
            self.scroll.max_offset(),
        );
        let (w, h) = viewport.surface_size();
        self.trail.resize(w, h);
        self.scrub.jump(update.progress);

        if self.mounted {
            let load_time = self.load.and_then(|id| self.scheduler.playback_time(id));
            self.rebuild(load_time)?;
        }
        Ok(update)
    }

    /// Advance animations to `now` and render. Does nothing while unmounted.
    pub fn frame(&mut self, now: f64) -> HeroResult<FrameReport> {
        let dt = self.last_frame.map_or(0.0, |t| (now - t).max(0.0));
        self.last_frame = Some(now);
        self.now = now;

        if !self.mounted {
            self.keys.flush_frame();
            return Ok(FrameReport {
                time: now,
                progress: self.scroll.progress(),
                playhead: self.playhead.unwrap_or(0.0),
                scroll_request: None,
                rev_finished: false,
            });
        }

        let scroll_request = self
            .keys
            .flush_frame()
            .map(|r| r.target(self.scroll.offset(), self.scroll.max_offset()));

        let finished = self.scheduler.tick(dt, &mut self.scene);
        let load_finished = self.load.is_some_and(|id| finished.contains(&id));
        if load_finished {
            self.load = None;
        }
        let rev_finished = self.rev.finish(&finished);

        let progress = self.scrub.advance(now);
        let mut playhead = self.playhead.unwrap_or(0.0);
        if let Some(tl) = &self.scroll_tl {
            playhead = progress * tl.duration();
            tl.apply(&mut self.scene, self.playhead, playhead);
            self.playhead = Some(playhead);
            if load_finished {
                reassert(tl, &self.contested, &mut self.scene, playhead);
            }
        }

        self.velocity = self.scroll.velocity(now);
        if self.velocity == 0.0 && !self.fx_resting {
            self.apply_motion(0.0, self.scroll.progress())?;
        }
        self.stamp_trail(now);

        Ok(FrameReport {
            time: now,
            progress: self.scroll.progress(),
            playhead,
            scroll_request,
            rev_finished,
        })
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            time: self.now,
            mounted: self.mounted,
            offset: self.scroll.offset(),
            progress: self.scroll.progress(),
            playhead: self.playhead.unwrap_or(0.0),
            phase: self.scroll.phase(),
            velocity: self.velocity,
            revving: self.rev.is_revving(),
            counters: self.counter_texts(),
            trail_points: self.trail.points().count(),
            scene: self.scene.snapshot(),
        }
    }

    fn present_card(&self, card: usize) -> Option<ElementId> {
        if !self.mounted {
            return None;
        }
        self.roles
            .cards
            .get(card)
            .copied()
            .filter(|id| self.scene.is_present(*id))
    }

    /// Re-run the initial sets and rebind both timelines against the current
    /// viewport. `load_time` resumes the load sequence; `None` means it had
    /// already finished. The scroll timeline renders last so scroll-driven
    /// properties match the current progress.
    fn rebuild(&mut self, load_time: Option<f64>) -> HeroResult<()> {
        let tls = timelines::build_timelines(&self.config)?;
        let vp = self.scene.viewport();

        self.scene.revert();
        tls.initial
            .compile(&self.scene, vp)?
            .apply(&mut self.scene, None, 0.0);

        let load = tls.load.compile(&self.scene, vp)?;
        let scroll = tls.scroll.compile(&self.scene, vp)?;
        self.contested = scroll
            .channels()
            .iter()
            .filter(|c| load.channel(c.element, c.prop).is_some())
            .map(|c| (c.element, c.prop))
            .collect();

        if let Some(id) = self.load.take() {
            self.scheduler.stop(id);
        }
        match load_time {
            Some(at) => self.load = Some(self.scheduler.play_from(load, &mut self.scene, at)),
            None => {
                load.apply(&mut self.scene, None, load.duration());
            }
        }

        let t = self.scrub.current() * scroll.duration();
        scroll.apply(&mut self.scene, None, t);
        self.playhead = Some(t);
        self.scroll_tl = Some(scroll);

        self.last_trail_x = None;
        Ok(())
    }

    fn apply_motion(&mut self, velocity: f64, progress: f64) -> HeroResult<()> {
        let sample = self.fx.sample(velocity, progress);
        let present = |id: Option<ElementId>| id.filter(|id| self.scene.is_present(*id));
        let specs = self.fx.tweens(
            &sample,
            present(self.roles.vehicle),
            present(self.roles.flame),
            present(self.roles.prompt),
        );
        for spec in specs {
            self.scheduler.tween(&mut self.scene, spec)?;
        }
        self.fx_resting = velocity == 0.0;
        Ok(())
    }

    fn stamp_trail(&mut self, now: f64) {
        let Some(id) = self.roles.vehicle.filter(|id| self.scene.is_present(*id)) else {
            return;
        };
        let style = match self.scene.style(id) {
            Some(s) => s,
            None => return,
        };
        let x = style.scalar(Prop::X);
        let y = style.scalar(Prop::Y);
        let moved = self
            .last_trail_x
            .is_none_or(|last| (x - last).abs() >= TRAIL_MIN_STEP_PX);
        if moved {
            let vp = self.scene.viewport();
            let at = Point::new(
                vp.width * VEHICLE_ANCHOR.0 + x,
                vp.height * VEHICLE_ANCHOR.1 + y,
            );
            self.trail.push(at, now);
            self.last_trail_x = Some(x);
        } else if self.trail.points().next().is_some() {
            self.trail.redraw(now);
        }
    }
}

/// Hand properties the finished load sequence was animating back to the
/// scroll timeline.
fn reassert(scroll: &CompiledTimeline, contested: &[(ElementId, Prop)], scene: &mut Scene, playhead: f64) {
    for &(element, prop) in contested {
        if let Some(value) = scroll.channel(element, prop).and_then(|c| c.sample(playhead)) {
            scene.write(element, prop, &value);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hero/page.rs"]
mod tests;
