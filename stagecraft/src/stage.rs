// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One displayed stage.
//!
//! A [`Stage`] owns the object registry, the pointer controller and the view
//! state of a single stage. The view state (viewport, zoom animator) lives
//! behind a lock because zoom animation frames run on the scheduler's thread;
//! everything else is only touched through `&mut Stage` on the event thread.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use kurbo::{Point, Size, Vec2};
use parking_lot::Mutex;
use stagecraft_editor::{AddSession, AddressPicker, EditOutcome, EditSession};
use stagecraft_objects::{
    AddressAllocator, Block, CapacityError, Container, ObjectId, ObjectRegistry, ObjectRules,
    PlacedObject,
};
use stagecraft_pointer::{PointerButton, PointerController, PointerOutcome};
use stagecraft_view::{StageViewport, ZoomAnimator, ZoomMode, ZoomStep};

use crate::config::StageConfig;
use crate::error::StageError;
use crate::frame::{Frame, MarkerPalette, build_frame};
use crate::scheduler::{FrameScheduler, FrameTask, ThreadScheduler};
use crate::summary::{ObjectSummary, TypeCatalog};

/// Identifies a stage within a [`StageSet`](crate::StageSet).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StageId(usize);

impl StageId {
    /// Creates an id from a stage index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the stage index.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// Called whenever a stage needs repainting.
///
/// May run on the zoom scheduler's thread, so it should only post a message
/// to the event loop.
pub type RedrawNotifier = Arc<dyn Fn(StageId) + Send + Sync>;

/// Externally supplied contents of one stage.
#[derive(Clone, Debug)]
pub struct StageLoad {
    /// Size of the background image, in world units.
    pub image_size: Size,
    /// Objects in registry order.
    pub objects: Vec<PlacedObject>,
}

impl StageLoad {
    /// Creates a load description.
    #[must_use]
    pub fn new(image_size: Size, objects: Vec<PlacedObject>) -> Self {
        Self {
            image_size,
            objects,
        }
    }
}

/// Collaborators and tunables shared by every stage of a set.
#[derive(Clone)]
pub struct StageContext {
    config: StageConfig,
    rules: Arc<dyn ObjectRules + Send + Sync>,
    scheduler: Arc<dyn FrameScheduler>,
}

impl fmt::Debug for StageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl StageContext {
    /// Creates a context with the default configuration, animating on
    /// background threads.
    pub fn new(rules: impl ObjectRules + Send + Sync + 'static) -> Self {
        Self {
            config: StageConfig::default(),
            rules: Arc::new(rules),
            scheduler: Arc::new(ThreadScheduler::new()),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: StageConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the frame scheduler.
    #[must_use]
    pub fn with_scheduler(mut self, scheduler: Arc<dyn FrameScheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Returns the level format rules.
    #[must_use]
    pub fn rules(&self) -> &(dyn ObjectRules + Send + Sync) {
        &*self.rules
    }

    pub(crate) fn build_registry(
        &self,
        objects: Vec<PlacedObject>,
    ) -> Result<ObjectRegistry, CapacityError> {
        let mut registry = ObjectRegistry::with_limit(self.config.object_limit);
        registry.replace_all(objects)?;
        Ok(registry)
    }
}

struct ViewState {
    viewport: StageViewport,
    animator: ZoomAnimator,
    // Bumped whenever an animation is started or abandoned; a frame that
    // sees a different value belongs to a dead animation.
    generation: u64,
}

struct SharedView {
    id: StageId,
    state: Mutex<ViewState>,
    dirty: AtomicBool,
    notifier: Mutex<Option<RedrawNotifier>>,
}

impl SharedView {
    fn invalidate(&self) {
        self.dirty.store(true, Ordering::Release);
        let notifier = self.notifier.lock().clone();
        if let Some(notify) = notifier {
            notify(self.id);
        }
    }

    /// Runs one animation frame. Returns `true` to be called again.
    ///
    /// A frame that panics leaves no animation behind: the scheduler drops
    /// the task, so the animator is cancelled to match.
    fn step(&self, generation: u64) -> bool {
        let _unwind = AbandonOnUnwind(self);
        let step = {
            let mut state = self.state.lock();
            if state.generation != generation {
                return false;
            }
            let ViewState {
                viewport, animator, ..
            } = &mut *state;
            animator.step(viewport)
        };
        match step {
            ZoomStep::Held => true,
            ZoomStep::Advanced => {
                self.invalidate();
                true
            }
            ZoomStep::Finished => {
                log::trace!("stage {}: zoom animation finished", self.id.get());
                self.invalidate();
                false
            }
            ZoomStep::Idle => false,
        }
    }

    fn abandon_animation(&self) {
        let mut state = self.state.lock();
        state.animator.cancel();
        state.generation = state.generation.wrapping_add(1);
    }
}

struct AbandonOnUnwind<'a>(&'a SharedView);

impl Drop for AbandonOnUnwind<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            log::warn!("stage {}: zoom frame panicked, animation abandoned", self.0.id.get());
            self.0.abandon_animation();
        }
    }
}

/// A loaded stage with its view, objects and interaction state.
pub struct Stage {
    id: StageId,
    context: StageContext,
    shared: Arc<SharedView>,
    registry: ObjectRegistry,
    pointer: PointerController,
    allocator: AddressAllocator,
    zoom_mode: ZoomMode,
    task: Option<FrameTask>,
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("id", &self.id)
            .field("objects", &self.registry.len())
            .field("pointer", &self.pointer)
            .field("zoom_mode", &self.zoom_mode)
            .finish_non_exhaustive()
    }
}

impl Drop for Stage {
    fn drop(&mut self) {
        self.cancel_task();
    }
}

impl Stage {
    /// Creates a stage from `load`, focused on the image center at scale `1`.
    ///
    /// Fails if `load` holds more objects than the configured limit.
    pub fn new(
        id: StageId,
        load: StageLoad,
        view_size: Size,
        context: StageContext,
    ) -> Result<Self, StageError> {
        let registry = context.build_registry(load.objects)?;
        let config = *context.config();
        let mut viewport = StageViewport::new(view_size, load.image_size);
        viewport.set_scale_limits(config.min_scale, config.max_scale);
        Ok(Self {
            id,
            shared: Arc::new(SharedView {
                id,
                state: Mutex::new(ViewState {
                    viewport,
                    animator: ZoomAnimator::new(config.zoom_frames),
                    generation: 0,
                }),
                dirty: AtomicBool::new(true),
                notifier: Mutex::new(None),
            }),
            registry,
            pointer: PointerController::new(config.selection_threshold),
            allocator: AddressAllocator::new(config.address_layout),
            zoom_mode: config.zoom_mode,
            task: None,
            context,
        })
    }

    /// Returns the stage id.
    #[must_use]
    pub fn id(&self) -> StageId {
        self.id
    }

    /// Returns the shared collaborators.
    #[must_use]
    pub fn context(&self) -> &StageContext {
        &self.context
    }

    // --- view ---

    /// Returns a copy of the current viewport.
    #[must_use]
    pub fn viewport(&self) -> StageViewport {
        self.shared.state.lock().viewport.clone()
    }

    /// Returns the current scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.shared.state.lock().viewport.scale()
    }

    /// Returns the lower scale bound.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.shared.state.lock().viewport.min_scale()
    }

    /// Returns the upper scale bound.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.shared.state.lock().viewport.max_scale()
    }

    /// Returns the world point at the center of the view.
    #[must_use]
    pub fn focus(&self) -> Point {
        self.shared.state.lock().viewport.focus()
    }

    /// Sets the scale directly, keeping the focus. Stops any zoom animation.
    pub fn set_scale(&mut self, scale: f64) {
        self.cancel_animation();
        self.shared.state.lock().viewport.set_scale(scale);
        self.shared.invalidate();
    }

    /// Updates the size of the drawing surface.
    pub fn resize_view(&mut self, view_size: Size) {
        self.shared.state.lock().viewport.set_view_size(view_size);
        self.shared.invalidate();
    }

    /// Pans by a display-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.shared.state.lock().viewport.pan_by_view(delta);
        self.shared.invalidate();
    }

    /// Returns how wheel zoom is applied.
    #[must_use]
    pub fn zoom_mode(&self) -> ZoomMode {
        self.zoom_mode
    }

    /// Chooses between animated and instant wheel zoom.
    pub fn set_zoom_mode(&mut self, mode: ZoomMode) {
        self.zoom_mode = mode;
    }

    /// Returns `true` while a smooth zoom is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.shared.state.lock().animator.is_animating()
    }

    /// Zooms by one wheel `tick`, keeping the world point under the display
    /// point `anchor` fixed.
    ///
    /// In smooth mode the change is spread over the configured number of
    /// frames; a zoom arriving mid-animation replaces the running one, which
    /// never completes. If no frame callback can be scheduled the target is
    /// applied at once.
    pub fn zoom(&mut self, tick: f64, anchor: Point) {
        let config = *self.context.config();
        let mut state = self.shared.state.lock();
        let target = state
            .viewport
            .zoom_target(tick, anchor, config.zoom_sensitivity);
        state.generation = state.generation.wrapping_add(1);
        let generation = state.generation;

        if self.zoom_mode == ZoomMode::Instant {
            state.animator.cancel();
            state.viewport.apply_target(target);
            drop(state);
            self.cancel_task();
            self.shared.invalidate();
            return;
        }

        if state.animator.start(target) {
            log::debug!(
                "stage {}: zoom restarted towards scale {}",
                self.id.get(),
                target.scale
            );
        }
        // The scheduler may run the first frame right away, so the lock must
        // be released first.
        drop(state);
        self.cancel_task();

        let shared = Arc::clone(&self.shared);
        match self
            .context
            .scheduler
            .schedule(config.frame_interval, Box::new(move || shared.step(generation)))
        {
            Ok(task) => self.task = Some(task),
            Err(err) => {
                log::warn!(
                    "stage {}: cannot schedule zoom animation, zooming instantly: {err}",
                    self.id.get()
                );
                let mut state = self.shared.state.lock();
                if state.generation == generation {
                    state.animator.cancel();
                    state.viewport.apply_target(target);
                }
                drop(state);
                self.shared.invalidate();
            }
        }
    }

    /// Stops a running zoom animation where it is.
    pub fn cancel_animation(&mut self) {
        self.shared.abandon_animation();
        self.cancel_task();
    }

    fn cancel_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
    }

    // --- redraw ---

    /// Returns `true` if something changed since the last
    /// [`Stage::take_redraw`].
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.shared.dirty.load(Ordering::Acquire)
    }

    /// Clears and returns the redraw flag.
    pub fn take_redraw(&self) -> bool {
        self.shared.dirty.swap(false, Ordering::AcqRel)
    }

    /// Installs or removes the redraw callback.
    pub fn set_redraw_notifier(&self, notifier: Option<RedrawNotifier>) {
        *self.shared.notifier.lock() = notifier;
    }

    // --- pointer ---

    /// Forwards a button press at display position `pos`.
    pub fn pointer_press(&mut self, button: PointerButton, pos: Point) -> PointerOutcome {
        let outcome = {
            let state = self.shared.state.lock();
            self.pointer
                .on_press(button, pos, &state.viewport, &self.registry)
        };
        self.after_pointer(outcome)
    }

    /// Forwards a pointer move to display position `pos`.
    pub fn pointer_move(&mut self, pos: Point) -> PointerOutcome {
        let outcome = {
            let mut state = self.shared.state.lock();
            self.pointer
                .on_move(pos, &mut state.viewport, &mut self.registry)
        };
        self.after_pointer(outcome)
    }

    /// Forwards a button release at display position `pos`.
    pub fn pointer_release(&mut self, button: PointerButton, pos: Point) -> PointerOutcome {
        let outcome = {
            let state = self.shared.state.lock();
            self.pointer
                .on_release(button, pos, &state.viewport, &self.registry)
        };
        self.after_pointer(outcome)
    }

    fn after_pointer(&self, outcome: PointerOutcome) -> PointerOutcome {
        if let PointerOutcome::DragEnded(id) = outcome {
            log::debug!("stage {}: object {} moved", self.id.get(), id.get());
        }
        if outcome.needs_redraw() {
            self.shared.invalidate();
        }
        outcome
    }

    // --- objects and selection ---

    /// Returns the registry.
    #[must_use]
    pub fn objects(&self) -> &ObjectRegistry {
        &self.registry
    }

    /// Returns a copy of every object, in registry order.
    #[must_use]
    pub fn current_objects(&self) -> Vec<PlacedObject> {
        self.registry.to_vec()
    }

    /// Returns the container filter.
    #[must_use]
    pub fn filter(&self) -> Option<Container> {
        self.pointer.filter()
    }

    /// Sets the container filter. Returns `true` if the selection was
    /// cleared because it is no longer visible.
    pub fn set_filter(&mut self, filter: Option<Container>) -> bool {
        let cleared = self.pointer.set_filter(filter, &self.registry);
        self.shared.invalidate();
        cleared
    }

    /// Returns the selected object's id, if it exists and is visible.
    #[must_use]
    pub fn selected(&self) -> Option<ObjectId> {
        self.pointer.selected(&self.registry)
    }

    /// Returns the selected object, if it exists and is visible.
    #[must_use]
    pub fn selected_object(&self) -> Option<&PlacedObject> {
        self.pointer.selected_object(&self.registry)
    }

    /// Selects `id`, or clears the selection.
    pub fn select(&mut self, id: Option<ObjectId>) {
        self.pointer.select(id);
        self.shared.invalidate();
    }

    /// Removes the selected object and clears the selection.
    pub fn remove_selected(&mut self) -> Result<PlacedObject, StageError> {
        let removed = self
            .selected()
            .and_then(|id| self.registry.remove(id))
            .ok_or(StageError::NoObjectSelected)?;
        self.pointer.clear_selection();
        log::info!(
            "stage {}: removed object at {}",
            self.id.get(),
            removed.position()
        );
        self.shared.invalidate();
        Ok(removed)
    }

    // --- editing ---

    /// Returns the address allocator.
    #[must_use]
    pub fn allocator(&self) -> AddressAllocator {
        self.allocator
    }

    /// Returns every address block with its occupants.
    #[must_use]
    pub fn block_table(&self, exclude: Option<ObjectId>) -> Vec<Block> {
        self.allocator.block_table(&self.registry, exclude)
    }

    /// Opens an edit session on the selected object.
    pub fn begin_edit(&self) -> Result<EditSession, StageError> {
        let id = self.selected().ok_or(StageError::NoObjectSelected)?;
        EditSession::open(&self.registry, id, self.context.rules()).map_err(StageError::from)
    }

    /// Opens a block picker for `session`.
    #[must_use]
    pub fn edit_picker(&self, session: &EditSession) -> AddressPicker {
        session.address_picker(self.allocator, &self.registry)
    }

    /// Applies `session` to its object.
    pub fn commit_edit(&mut self, session: &EditSession) -> Result<EditOutcome, StageError> {
        let id = self.id;
        let before = self
            .registry
            .get(session.target())
            .map(PlacedObject::container);
        let outcome = session
            .commit(&mut self.registry, self.context.rules())
            .inspect_err(|err| log::warn!("stage {}: edit rejected: {err}", id.get()))?;

        let hid_selection = self.pointer.set_filter(self.pointer.filter(), &self.registry);
        if outcome.type_changed || hid_selection || before != Some(session.container) {
            self.shared.invalidate();
        }
        Ok(outcome)
    }

    /// Opens an add session at the current view focus.
    pub fn begin_add(&self) -> Result<AddSession, StageError> {
        let focus = self.focus();
        AddSession::open(&self.registry, focus, self.context.rules()).map_err(|err| {
            log::warn!("stage {}: cannot add object: {err}", self.id.get());
            StageError::from(err)
        })
    }

    /// Opens a block picker for `session`.
    #[must_use]
    pub fn add_picker(&self, session: &AddSession) -> AddressPicker {
        session.address_picker(self.allocator, &self.registry)
    }

    /// Appends the object described by `session`.
    pub fn commit_add(&mut self, session: &AddSession) -> Result<ObjectId, StageError> {
        let id = self.id;
        let object = session
            .commit(&mut self.registry, self.context.rules())
            .inspect_err(|err| log::warn!("stage {}: add rejected: {err}", id.get()))?;
        log::info!(
            "stage {}: added object at {}",
            self.id.get(),
            session.position()
        );
        self.shared.invalidate();
        Ok(object)
    }

    // --- output ---

    /// Builds a render snapshot.
    #[must_use]
    pub fn frame(&self, palette: &(impl MarkerPalette + ?Sized)) -> Frame {
        let viewport = self.viewport();
        build_frame(
            &viewport,
            &self.registry,
            self.pointer.filter(),
            self.selected(),
            palette,
        )
    }

    /// Summarizes the selected object.
    #[must_use]
    pub fn summary(&self, catalog: &(impl TypeCatalog + ?Sized)) -> Option<ObjectSummary> {
        self.selected_object()
            .map(|object| ObjectSummary::new(object, self.context.rules(), catalog))
    }

    /// Swaps in reloaded contents.
    ///
    /// Stops any animation, clears the selection and re-clamps the focus to
    /// the new image. The view size and scale are kept.
    pub(crate) fn install(&mut self, image_size: Size, registry: ObjectRegistry) {
        self.cancel_animation();
        self.shared
            .state
            .lock()
            .viewport
            .set_image_size(image_size);
        self.registry = registry;
        self.pointer.clear_selection();
        self.shared.invalidate();
    }
}
