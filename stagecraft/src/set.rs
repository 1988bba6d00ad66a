// Copyright 2026 the Stagecraft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;
use stagecraft_objects::PlacedObject;
use stagecraft_view::ZoomMode;

use crate::error::StageError;
use crate::stage::{RedrawNotifier, Stage, StageContext, StageId, StageLoad};

/// Every stage of a loaded level, addressed by [`StageId`].
///
/// Stages are fully independent: each has its own viewport, animation,
/// registry and selection.
#[derive(Debug)]
pub struct StageSet {
    stages: Vec<Stage>,
    context: StageContext,
}

impl StageSet {
    /// Loads one stage per entry of `loads`, in order.
    ///
    /// Fails if any stage holds more objects than the configured limit.
    pub fn load(
        loads: Vec<StageLoad>,
        view_size: Size,
        context: StageContext,
    ) -> Result<Self, StageError> {
        let stages = loads
            .into_iter()
            .enumerate()
            .map(|(index, load)| Stage::new(StageId::new(index), load, view_size, context.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("loaded {} stages", stages.len());
        Ok(Self { stages, context })
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` if no stage is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Iterates over the stage ids.
    pub fn ids(&self) -> impl Iterator<Item = StageId> + '_ {
        self.stages.iter().map(Stage::id)
    }

    /// Returns a stage.
    pub fn stage(&self, id: StageId) -> Result<&Stage, StageError> {
        self.stages
            .get(id.get())
            .ok_or(StageError::UnknownStage(id))
    }

    /// Returns a stage for mutation.
    pub fn stage_mut(&mut self, id: StageId) -> Result<&mut Stage, StageError> {
        self.stages
            .get_mut(id.get())
            .ok_or(StageError::UnknownStage(id))
    }

    /// Returns a copy of the objects of `id`, in registry order, for
    /// serialization.
    pub fn current_objects(&self, id: StageId) -> Result<Vec<PlacedObject>, StageError> {
        Ok(self.stage(id)?.current_objects())
    }

    /// Returns a copy of the selected object of `id`.
    pub fn selected_object(&self, id: StageId) -> Result<Option<PlacedObject>, StageError> {
        Ok(self.stage(id)?.selected_object().cloned())
    }

    /// Returns the scale of `id`.
    pub fn scale(&self, id: StageId) -> Result<f64, StageError> {
        Ok(self.stage(id)?.scale())
    }

    /// Returns the lower scale bound of `id`.
    pub fn min_scale(&self, id: StageId) -> Result<f64, StageError> {
        Ok(self.stage(id)?.min_scale())
    }

    /// Returns the upper scale bound of `id`.
    pub fn max_scale(&self, id: StageId) -> Result<f64, StageError> {
        Ok(self.stage(id)?.max_scale())
    }

    /// Sets the scale of `id`, clamped to its bounds.
    pub fn set_scale(&mut self, id: StageId, scale: f64) -> Result<(), StageError> {
        self.stage_mut(id)?.set_scale(scale);
        Ok(())
    }

    /// Sets the zoom mode of every stage.
    pub fn set_zoom_mode(&mut self, mode: ZoomMode) {
        for stage in &mut self.stages {
            stage.set_zoom_mode(mode);
        }
    }

    /// Installs `notifier` on every stage.
    pub fn set_redraw_notifier(&self, notifier: Option<RedrawNotifier>) {
        for stage in &self.stages {
            stage.set_redraw_notifier(notifier.clone());
        }
    }

    /// Replaces the contents of every stage.
    ///
    /// Nothing changes unless `loads` has one entry per stage and every entry
    /// fits the object limit. Each stage keeps its view size and scale; its
    /// selection is cleared and any zoom animation stopped.
    pub fn reload(&mut self, loads: Vec<StageLoad>) -> Result<(), StageError> {
        if loads.len() != self.stages.len() {
            let err = StageError::StageCountMismatch {
                expected: self.stages.len(),
                found: loads.len(),
            };
            log::warn!("reload rejected: {err}");
            return Err(err);
        }
        let prepared = loads
            .into_iter()
            .map(|load| -> Result<_, StageError> {
                let registry = self.context.build_registry(load.objects)?;
                Ok((load.image_size, registry))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (stage, (image_size, registry)) in self.stages.iter_mut().zip(prepared) {
            log::debug!(
                "stage {}: reloaded with {} objects",
                stage.id().get(),
                registry.len()
            );
            stage.install(image_size, registry);
        }
        log::info!("reloaded {} stages", self.stages.len());
        Ok(())
    }
}
