//! Session state machine: the only writer of view mode, selection and fullscreen.
//!
//! Each view mode owns a presentation context holding its model interaction
//! state and any timers. Switching modes drops the old context, which cancels
//! its timers; timer messages already in flight are discarded by epoch.

use std::sync::Arc;

use catalog::Catalog;
use chrono::Utc;
use shared::{
    domain::{CapabilitySnapshot, Product, ProductId, ScenePreset, ViewMode},
    error::Rejection,
    protocol::{EnvironmentSignals, HostSignal, ViewerIntent},
};
use tracing::{debug, info, warn};

use crate::{
    capability::CapabilityDetector,
    capture::capture_request,
    config::ViewerSettings,
    frame::{
        watermark, ArRealView, ChromeVisibility, ModelView, PlacementView, PresentationFrame,
        XrSupport,
    },
    interaction::ModelInteractionState,
    keymap::{shortcut_for, Shortcut},
    placement::ArPlacementSimulator,
    scheduler::{ScheduledTask, Scheduler, TimerEvent},
    surface::HostEnvironment,
    SessionEvent,
};

const MODEL_BASE_SCALE: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Applied,
    /// Accepted without a state change (including fire-and-forget host requests).
    Ignored,
    Rejected(Rejection),
}

impl DispatchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, DispatchOutcome::Applied)
    }

    fn changed(changed: bool) -> Self {
        if changed {
            DispatchOutcome::Applied
        } else {
            DispatchOutcome::Ignored
        }
    }
}

struct PendingSelection {
    generation: u64,
    product_id: ProductId,
    _timer: ScheduledTask,
}

struct NormalScene {
    model: Option<ModelInteractionState>,
}

struct ArRealContext {
    epoch: u64,
    model: Option<ModelInteractionState>,
    xr_support: XrSupport,
    in_session: bool,
    _probe: ScheduledTask,
}

struct ArDemoContext {
    epoch: u64,
    simulator: ArPlacementSimulator,
    model: Option<ModelInteractionState>,
    _ticker: ScheduledTask,
}

enum PresentationContext {
    Normal(NormalScene),
    ArReal(ArRealContext),
    ArDemo(ArDemoContext),
}

impl PresentationContext {
    fn mode(&self) -> ViewMode {
        match self {
            PresentationContext::Normal(_) => ViewMode::Normal,
            PresentationContext::ArReal(_) => ViewMode::ArReal,
            PresentationContext::ArDemo(_) => ViewMode::ArDemo,
        }
    }

    fn model(&self) -> Option<&ModelInteractionState> {
        match self {
            PresentationContext::Normal(scene) => scene.model.as_ref(),
            PresentationContext::ArReal(ctx) => ctx.model.as_ref(),
            PresentationContext::ArDemo(ctx) => ctx.model.as_ref(),
        }
    }

    fn model_mut(&mut self) -> Option<&mut ModelInteractionState> {
        match self {
            PresentationContext::Normal(scene) => scene.model.as_mut(),
            PresentationContext::ArReal(ctx) => ctx.model.as_mut(),
            PresentationContext::ArDemo(ctx) => ctx.model.as_mut(),
        }
    }

    /// A different product is a different model: start from a fresh state.
    fn remount_model(&mut self, has_product: bool) {
        let fresh = || has_product.then(ModelInteractionState::interactive);
        match self {
            PresentationContext::Normal(scene) => scene.model = fresh(),
            PresentationContext::ArReal(ctx) => ctx.model = fresh(),
            PresentationContext::ArDemo(ctx) => {
                ctx.model = (ctx.simulator.placed() && has_product)
                    .then(ModelInteractionState::interactive);
            }
        }
    }
}

pub struct ViewSessionController {
    catalog: Catalog,
    settings: ViewerSettings,
    detector: CapabilityDetector,
    environment: EnvironmentSignals,
    capabilities: CapabilitySnapshot,
    selected: Option<ProductId>,
    pending: Option<PendingSelection>,
    is_fullscreen: bool,
    scene_preset: ScenePreset,
    context: PresentationContext,
    next_generation: u64,
    next_epoch: u64,
    scheduler: Arc<dyn Scheduler>,
    host: Arc<dyn HostEnvironment>,
}

impl ViewSessionController {
    pub fn new(
        catalog: Catalog,
        settings: ViewerSettings,
        environment: EnvironmentSignals,
        scheduler: Arc<dyn Scheduler>,
        host: Arc<dyn HostEnvironment>,
    ) -> Self {
        let detector = CapabilityDetector::new(settings.compact_breakpoint_px);
        let capabilities = detector.evaluate(&environment);
        let selected = catalog.first().map(|product| product.id);
        info!(products = catalog.len(), ?capabilities, "session: started");
        Self {
            catalog,
            settings,
            detector,
            environment,
            capabilities,
            selected,
            pending: None,
            is_fullscreen: false,
            scene_preset: ScenePreset::default(),
            context: PresentationContext::Normal(NormalScene {
                model: selected.map(|_| ModelInteractionState::interactive()),
            }),
            next_generation: 0,
            next_epoch: 0,
            scheduler,
            host,
        }
    }

    pub fn dispatch(&mut self, event: SessionEvent) -> DispatchOutcome {
        let outcome = match event {
            SessionEvent::Intent(intent) => self.handle_intent(intent),
            SessionEvent::Host(signal) => self.handle_host(signal),
            SessionEvent::Timer(timer) => self.handle_timer(timer),
            SessionEvent::XrSupportResolved { epoch, supported } => {
                self.xr_support_resolved(epoch, supported)
            }
        };
        if let DispatchOutcome::Rejected(reason) = outcome {
            debug!(%reason, "session: request rejected");
        }
        outcome
    }

    pub fn handle_intent(&mut self, intent: ViewerIntent) -> DispatchOutcome {
        match intent {
            ViewerIntent::SelectProduct { product_id } => self.select_product(product_id),
            ViewerIntent::RequestMode { mode } => self.request_mode(mode),
            ViewerIntent::ExitImmersive => self.exit_immersive(),
            ViewerIntent::ToggleFullscreen => self.toggle_fullscreen(),
            ViewerIntent::Capture => self.capture(),
            ViewerIntent::SetScenePreset { preset } => self.set_scene_preset(preset),
            ViewerIntent::HoverEnter => self.with_model(ModelInteractionState::on_hover_enter),
            ViewerIntent::HoverLeave => self.with_model(ModelInteractionState::on_hover_leave),
            ViewerIntent::Activate => self.with_model(ModelInteractionState::on_activate),
            ViewerIntent::Place => self.place(),
            ViewerIntent::ScaleBy { factor } => self.scale_by(factor),
            ViewerIntent::Key { key } => self.handle_key(key),
        }
    }

    pub fn handle_host(&mut self, signal: HostSignal) -> DispatchOutcome {
        match signal {
            HostSignal::Resized { viewport_width } => {
                let mut environment = self.environment.clone();
                environment.viewport_width = viewport_width;
                self.environment_changed(environment)
            }
            HostSignal::EnvironmentChanged(environment) => self.environment_changed(environment),
            HostSignal::FullscreenChanged { active } => {
                let changed = self.is_fullscreen != active;
                self.is_fullscreen = active;
                DispatchOutcome::changed(changed)
            }
            HostSignal::XrSessionStarted => self.set_xr_session(true),
            HostSignal::XrSessionEnded => self.set_xr_session(false),
        }
    }

    pub fn handle_timer(&mut self, timer: TimerEvent) -> DispatchOutcome {
        match timer {
            TimerEvent::SelectionLoaded {
                generation,
                product_id,
            } => self.complete_selection(generation, product_id),
            TimerEvent::StatusTick { epoch } => match &mut self.context {
                PresentationContext::ArDemo(ctx) if ctx.epoch == epoch => {
                    ctx.simulator.advance_status();
                    DispatchOutcome::Applied
                }
                _ => {
                    debug!(epoch, "ar-demo: dropping status tick for discarded context");
                    DispatchOutcome::Ignored
                }
            },
        }
    }

    /// Starts the simulated load; supersedes any load still in flight.
    pub fn select_product(&mut self, product_id: ProductId) -> DispatchOutcome {
        if self.catalog.by_id(product_id).is_none() {
            return DispatchOutcome::Rejected(Rejection::UnknownProduct { product_id });
        }

        self.next_generation += 1;
        let generation = self.next_generation;
        let timer = self.scheduler.schedule_once(
            self.settings.selection_delay(),
            TimerEvent::SelectionLoaded {
                generation,
                product_id,
            },
        );
        if let Some(previous) = self.pending.replace(PendingSelection {
            generation,
            product_id,
            _timer: timer,
        }) {
            debug!(
                superseded = %previous.product_id,
                product_id = %product_id,
                "selection: pending load superseded"
            );
        }
        info!(product_id = %product_id, generation, "selection: loading");
        DispatchOutcome::Applied
    }

    fn complete_selection(&mut self, generation: u64, product_id: ProductId) -> DispatchOutcome {
        match &self.pending {
            Some(pending) if pending.generation == generation => {}
            _ => {
                debug!(
                    product_id = %product_id,
                    generation,
                    "selection: dropping stale load completion"
                );
                return DispatchOutcome::Ignored;
            }
        }

        self.pending = None;
        self.selected = Some(product_id);
        self.context.remount_model(true);
        info!(product_id = %product_id, "selection: load completed");
        DispatchOutcome::Applied
    }

    pub fn request_mode(&mut self, mode: ViewMode) -> DispatchOutcome {
        if mode == self.mode() {
            return DispatchOutcome::Ignored;
        }
        if mode == ViewMode::ArReal && !self.capabilities.ar_real_available() {
            warn!(
                secure = self.capabilities.is_secure_transport,
                handheld = self.capabilities.is_handheld_device,
                "mode: real AR requested without capability"
            );
            return DispatchOutcome::Rejected(Rejection::ArRealUnavailable);
        }

        self.enter(mode);
        DispatchOutcome::Applied
    }

    pub fn exit_immersive(&mut self) -> DispatchOutcome {
        if !self.is_immersive() {
            return DispatchOutcome::Ignored;
        }
        self.enter(ViewMode::Normal);
        DispatchOutcome::Applied
    }

    fn enter(&mut self, mode: ViewMode) {
        let previous = self.mode();
        let has_product = self.selected.is_some();
        self.next_epoch += 1;
        let epoch = self.next_epoch;

        // Drop the old context first so its timers are cancelled before new ones start.
        self.context = PresentationContext::Normal(NormalScene { model: None });
        self.context = match mode {
            ViewMode::Normal => PresentationContext::Normal(NormalScene {
                model: has_product.then(ModelInteractionState::interactive),
            }),
            ViewMode::ArReal => PresentationContext::ArReal(ArRealContext {
                epoch,
                model: has_product.then(ModelInteractionState::interactive),
                xr_support: XrSupport::Checking,
                in_session: false,
                _probe: self.scheduler.spawn_xr_probe(self.host.clone(), epoch),
            }),
            ViewMode::ArDemo => PresentationContext::ArDemo(ArDemoContext {
                epoch,
                simulator: ArPlacementSimulator::new(),
                model: None,
                _ticker: self.scheduler.schedule_repeating(
                    self.settings.status_tick(),
                    TimerEvent::StatusTick { epoch },
                ),
            }),
        };
        info!(
            from = previous.label(),
            to = mode.label(),
            epoch,
            "mode: transitioned"
        );
    }

    pub fn toggle_fullscreen(&mut self) -> DispatchOutcome {
        self.is_fullscreen = !self.is_fullscreen;
        self.host.request_fullscreen(self.is_fullscreen);
        info!(fullscreen = self.is_fullscreen, "fullscreen: toggled");
        DispatchOutcome::Applied
    }

    /// Captures only exist for the Normal canvas; no session state changes.
    pub fn capture(&mut self) -> DispatchOutcome {
        if self.is_immersive() {
            debug!(mode = self.mode().label(), "capture: no canvas in immersive mode");
            return DispatchOutcome::Ignored;
        }
        let request = capture_request(
            &self.settings.capture_prefix,
            self.selected_product(),
            Utc::now(),
        );
        info!(file_name = %request.file_name, "capture: requested");
        self.host.request_capture(request);
        DispatchOutcome::Ignored
    }

    pub fn set_scene_preset(&mut self, preset: ScenePreset) -> DispatchOutcome {
        let changed = self.scene_preset != preset;
        self.scene_preset = preset;
        DispatchOutcome::changed(changed)
    }

    fn with_model(
        &mut self,
        apply: impl FnOnce(&mut ModelInteractionState) -> bool,
    ) -> DispatchOutcome {
        match self.context.model_mut() {
            Some(model) => DispatchOutcome::changed(apply(model)),
            None => DispatchOutcome::Rejected(Rejection::NoActiveModel),
        }
    }

    pub fn place(&mut self) -> DispatchOutcome {
        let has_product = self.selected.is_some();
        let mode = self.mode();
        let PresentationContext::ArDemo(ctx) = &mut self.context else {
            debug!(mode = mode.label(), "ar-demo: place outside demo mode");
            return DispatchOutcome::Ignored;
        };
        if !ctx.simulator.place() {
            return DispatchOutcome::Ignored;
        }
        ctx.model = has_product.then(ModelInteractionState::interactive);
        info!(epoch = ctx.epoch, "ar-demo: object placed");
        DispatchOutcome::Applied
    }

    pub fn scale_by(&mut self, factor: f32) -> DispatchOutcome {
        let PresentationContext::ArDemo(ctx) = &mut self.context else {
            return DispatchOutcome::Rejected(Rejection::NotPlaced);
        };
        let before = ctx.simulator.scale();
        match ctx.simulator.scale_by(factor) {
            Ok(scale) => {
                debug!(factor, scale, "ar-demo: scaled");
                DispatchOutcome::changed(scale != before)
            }
            Err(reason) => DispatchOutcome::Rejected(reason),
        }
    }

    pub fn handle_key(&mut self, key: char) -> DispatchOutcome {
        match shortcut_for(key) {
            Some(Shortcut::SelectPosition(position)) => match self.catalog.at(position) {
                Some(product) => {
                    let product_id = product.id;
                    self.select_product(product_id)
                }
                None => DispatchOutcome::Rejected(Rejection::ShortcutOutOfRange {
                    position: position + 1,
                }),
            },
            Some(Shortcut::ToggleFullscreen) => self.toggle_fullscreen(),
            Some(Shortcut::Capture) => self.capture(),
            None => DispatchOutcome::Ignored,
        }
    }

    pub fn environment_changed(&mut self, environment: EnvironmentSignals) -> DispatchOutcome {
        let capabilities = self.detector.evaluate(&environment);
        self.environment = environment;
        if capabilities == self.capabilities {
            return DispatchOutcome::Ignored;
        }
        info!(?capabilities, "capability: snapshot changed");
        self.capabilities = capabilities;
        DispatchOutcome::Applied
    }

    fn set_xr_session(&mut self, in_session: bool) -> DispatchOutcome {
        match &mut self.context {
            PresentationContext::ArReal(ctx) => {
                let changed = ctx.in_session != in_session;
                ctx.in_session = in_session;
                DispatchOutcome::changed(changed)
            }
            _ => DispatchOutcome::Ignored,
        }
    }

    fn xr_support_resolved(&mut self, epoch: u64, supported: bool) -> DispatchOutcome {
        match &mut self.context {
            PresentationContext::ArReal(ctx) if ctx.epoch == epoch => {
                ctx.xr_support = if supported {
                    XrSupport::Supported
                } else {
                    XrSupport::Unsupported
                };
                info!(supported, "ar-real: immersive support resolved");
                DispatchOutcome::Applied
            }
            _ => DispatchOutcome::Ignored,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn mode(&self) -> ViewMode {
        self.context.mode()
    }

    pub fn is_immersive(&self) -> bool {
        self.mode().is_immersive()
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.selected.and_then(|id| self.catalog.by_id(id))
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_product(&self) -> Option<ProductId> {
        self.pending.as_ref().map(|pending| pending.product_id)
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    pub fn capabilities(&self) -> CapabilitySnapshot {
        self.capabilities
    }

    pub fn scene_preset(&self) -> ScenePreset {
        self.scene_preset
    }

    pub fn model(&self) -> Option<&ModelInteractionState> {
        self.context.model()
    }

    pub fn placement(&self) -> Option<&ArPlacementSimulator> {
        match &self.context {
            PresentationContext::ArDemo(ctx) => Some(&ctx.simulator),
            _ => None,
        }
    }

    pub fn ar_real(&self) -> Option<ArRealView> {
        match &self.context {
            PresentationContext::ArReal(ctx) => Some(ArRealView {
                xr_support: ctx.xr_support,
                in_session: ctx.in_session,
            }),
            _ => None,
        }
    }

    pub fn frame(&self) -> PresentationFrame {
        let mode = self.mode();
        let selected_product = self.selected_product();
        PresentationFrame {
            mode,
            is_immersive: mode.is_immersive(),
            is_loading: self.is_loading(),
            is_fullscreen: self.is_fullscreen,
            selected_product: selected_product.cloned(),
            capabilities: self.capabilities,
            chrome: ChromeVisibility::derive(mode, self.capabilities, self.is_loading()),
            scene_preset: self.scene_preset,
            scene: self.scene_preset.scene_options(),
            catalog: self.catalog.stats(),
            model: selected_product
                .zip(self.model())
                .map(|(product, state)| ModelView::new(product, state, MODEL_BASE_SCALE)),
            placement: self.placement().map(PlacementView::from),
            ar_real: self.ar_real(),
            watermark: watermark(&self.settings.app_title, mode),
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
