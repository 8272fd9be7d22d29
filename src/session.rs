//! Project/session binding.
//!
//! DESIGN
//! ======
//! One [`EditingSession`] per open project view. It owns a canvas editor and
//! a scene editor outright, so two sessions never share history and tearing
//! a session down is just dropping it. Backend state is pulled, never pushed
//! implicitly: `bind_project` and `refresh` fetch the project and its
//! variants, then install them in one synchronous step.
//!
//! ERROR HANDLING
//! ==============
//! A failed call leaves the editors and cached project exactly as they were.
//! The failure is logged, kept as `last_error` for display and returned.
//! An expired session is terminal: the editors are cleared, the project is
//! unbound and every later call returns [`SessionError::Expired`].

use std::collections::HashMap;
use std::sync::Arc;

use api::ApiError;
use api::types::{
    DesignVariant, ImageKind, ItemInstance, ItemInstanceId, Project, ProjectId, ProjectImage, UploadFile, VariantId,
};
use api::{ItemService, ProjectService};
use editor::{CanvasEditor, ItemId, SceneEditor};
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::convert::{canvas_item_from_instance, draft_from_canvas_item, instance_id, patch_from_canvas_item};
use crate::error::SessionError;
use crate::poll::{PollHandle, PollOutcome, spawn_variant_poll};

pub const CANVAS_SURFACE: &str = "canvas";
pub const SCENE_SURFACE: &str = "scene";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    /// Credentials could not be refreshed. The user must sign in again.
    Expired,
}

/// Editing state for one project view.
pub struct EditingSession<S: ProjectService + ?Sized> {
    service: Arc<S>,
    config: SessionConfig,
    canvas: CanvasEditor,
    scene: SceneEditor,
    project_id: Option<ProjectId>,
    project: Option<Project>,
    variants: Vec<DesignVariant>,
    active_variant: Option<VariantId>,
    /// Canvas items created on the backend this session, keyed by their
    /// local canvas id.
    saved_instances: HashMap<ItemId, (VariantId, ItemInstanceId)>,
    last_error: Option<String>,
    state: SessionState,
}

impl<S> EditingSession<S>
where
    S: ProjectService + ?Sized + 'static,
{
    #[must_use]
    pub fn new(service: Arc<S>, config: SessionConfig) -> Self {
        Self {
            service,
            config,
            canvas: CanvasEditor::new(CANVAS_SURFACE),
            scene: SceneEditor::new(SCENE_SURFACE),
            project_id: None,
            project: None,
            variants: Vec::new(),
            active_variant: None,
            saved_instances: HashMap::new(),
            last_error: None,
            state: SessionState::Active,
        }
    }

    // =========================================================================
    // BINDING
    // =========================================================================

    /// Fetch project `id` with its variants and make it the session's project.
    ///
    /// Binding a different project clears both editors. Rebinding the same
    /// project keeps them.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the previous binding stays in place.
    pub async fn bind_project(&mut self, id: ProjectId) -> Result<(), SessionError> {
        self.ensure_active()?;
        let (project, variants) = match self.pull(id).await {
            Ok(pulled) => pulled,
            Err(e) => return Err(self.fail(e)),
        };

        if self.project_id != Some(id) {
            self.canvas.reset();
            self.scene.reset();
            self.active_variant = None;
            self.saved_instances.clear();
        }
        self.install(project, variants);
        self.last_error = None;
        info!(project_id = id, variants = self.variants.len(), "project bound");
        Ok(())
    }

    /// Refetch the bound project and its variants.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoProject`] when nothing is bound, otherwise the fetch error.
    pub async fn refresh(&mut self) -> Result<(), SessionError> {
        self.ensure_active()?;
        let id = self.bound_id()?;
        match self.pull(id).await {
            Ok((project, variants)) => {
                self.install(project, variants);
                debug!(project_id = id, variants = self.variants.len(), "project refreshed");
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    async fn pull(&self, id: ProjectId) -> Result<(Project, Vec<DesignVariant>), ApiError> {
        let project = self.service.get_project(id).await?;
        let variants = self.service.list_variants(id).await?;
        Ok((project, variants))
    }

    fn install(&mut self, project: Project, variants: Vec<DesignVariant>) {
        if let Some(photo) = project.latest_image(ImageKind::Original) {
            let url = photo.image_url.clone();
            self.scene.set_background_image(Some(url.clone()));
            if self.active_variant.is_none() {
                self.canvas.set_background_image(Some(url));
            }
        }
        if self.active_variant.is_some_and(|active| !variants.iter().any(|v| v.id == active)) {
            self.active_variant = None;
        }
        self.project_id = Some(project.id);
        self.project = Some(project);
        self.variants = variants;
    }

    // =========================================================================
    // IMAGES
    // =========================================================================

    /// Show `url` as the background of both surfaces. Not recorded in history.
    pub fn apply_uploaded_image(&mut self, url: &str) {
        self.canvas.set_background_image(Some(url.to_owned()));
        self.scene.set_background_image(Some(url.to_owned()));
        debug!(url, "background applied");
    }

    /// Upload an image to the bound project.
    ///
    /// A room photo ([`ImageKind::Original`]) becomes the background of both
    /// surfaces. The project is refreshed afterwards; a failed refresh is
    /// logged but doesn't fail the upload unless the session expired.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoProject`] when nothing is bound, otherwise the upload error.
    pub async fn upload_background(&mut self, file: UploadFile, kind: ImageKind) -> Result<ProjectImage, SessionError> {
        self.ensure_active()?;
        let id = self.bound_id()?;
        let file_name = file.file_name.clone();
        let image = match self.service.upload_image(id, file, kind).await {
            Ok(image) => image,
            Err(e) => return Err(self.fail(e)),
        };
        info!(project_id = id, file_name = %file_name, kind = %kind, image_id = image.id, "image uploaded");

        if kind == ImageKind::Original {
            self.apply_uploaded_image(&image.image_url);
        }
        if let Err(e) = self.refresh().await {
            if e.is_session_expired() {
                return Err(e);
            }
            warn!(project_id = id, error = %e, "refresh after upload failed");
        }
        Ok(image)
    }

    // =========================================================================
    // VARIANTS
    // =========================================================================

    /// Ask the backend for a new variant and start polling for it.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoProject`] when nothing is bound, otherwise the generation error.
    pub async fn request_variant(&mut self, prompt: &str) -> Result<PollHandle, SessionError> {
        self.ensure_active()?;
        let id = self.bound_id()?;
        match self.service.generate_variant(id, prompt).await {
            Ok(accepted) => info!(project_id = id, task_id = %accepted.task_id, "generation requested"),
            Err(e) => return Err(self.fail(e)),
        }
        Ok(spawn_variant_poll(Arc::clone(&self.service), id, self.variants.len(), self.config.poll))
    }

    /// Install the list a poll of `project_id` ended with. Returns how many
    /// variants are new.
    ///
    /// # Errors
    ///
    /// [`SessionError::StalePoll`] when `project_id` is no longer bound; the
    /// outcome is discarded. Otherwise the poll's error when it ended in
    /// [`PollOutcome::Failed`].
    pub fn apply_poll_outcome(&mut self, project_id: ProjectId, outcome: PollOutcome) -> Result<usize, SessionError> {
        self.ensure_active()?;
        if self.project_id != Some(project_id) {
            if let PollOutcome::Failed(e) = outcome {
                if e.is_session_expired() {
                    return Err(self.fail(e));
                }
            }
            debug!(poll_project = project_id, bound = ?self.project_id, "discarding stale variant poll");
            return Err(SessionError::StalePoll(project_id));
        }
        match outcome {
            PollOutcome::Ready(variants) | PollOutcome::Exhausted(variants) => {
                let added = variants.len().saturating_sub(self.variants.len());
                self.variants = variants;
                debug!(project_id = ?self.project_id, added, "variant list updated");
                Ok(added)
            }
            PollOutcome::Cancelled => Ok(0),
            PollOutcome::Failed(e) => Err(self.fail(e)),
        }
    }

    /// Load variant `id`'s persisted items onto the canvas, with the variant
    /// image as background. Canvas history restarts from the loaded items.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnknownVariant`] when `id` isn't in the fetched list.
    pub fn open_variant(&mut self, id: VariantId) -> Result<usize, SessionError> {
        self.ensure_active()?;
        let Some(variant) = self.variants.iter().find(|v| v.id == id) else {
            return Err(SessionError::UnknownVariant(id));
        };
        let items = variant.items.iter().map(canvas_item_from_instance).collect();
        let image_url = variant.image_url.clone();

        let loaded = self.canvas.load(items);
        self.canvas.set_background_image(Some(image_url));
        self.active_variant = Some(id);
        self.saved_instances.clear();
        info!(variant_id = id, loaded, "variant opened");
        Ok(loaded)
    }

    /// Save canvas item `item_id` under `variant_id`.
    ///
    /// Items hydrated from the backend, or already created by an earlier save
    /// under the same variant, are updated in place; anything else is created.
    /// The cached variant is updated with the stored instance.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnknownVariant`] or [`SessionError::UnknownItem`] for
    /// bad ids, otherwise the item service's error.
    pub async fn persist_canvas_item(
        &mut self,
        items: &dyn ItemService,
        variant_id: VariantId,
        item_id: &str,
    ) -> Result<ItemInstance, SessionError> {
        self.ensure_active()?;
        if !self.variants.iter().any(|v| v.id == variant_id) {
            return Err(SessionError::UnknownVariant(variant_id));
        }
        let Some(item) = self.canvas.item(item_id).cloned() else {
            return Err(SessionError::UnknownItem(item_id.to_owned()));
        };

        let known = instance_id(&item.id).or_else(|| {
            self.saved_instances
                .get(&item.id)
                .and_then(|&(variant, instance)| (variant == variant_id).then_some(instance))
        });
        let result = match known {
            Some(instance) => items.update_item(instance, &patch_from_canvas_item(&item)).await,
            None => items.add_item(variant_id, &draft_from_canvas_item(&item, variant_id)).await,
        };
        let saved = match result {
            Ok(saved) => saved,
            Err(e) => return Err(self.fail(e)),
        };
        if known.is_none() {
            self.saved_instances.insert(item.id.clone(), (variant_id, saved.id));
        }

        if let Some(variant) = self.variants.iter_mut().find(|v| v.id == variant_id) {
            match variant.items.iter_mut().find(|i| i.id == saved.id) {
                Some(existing) => *existing = saved.clone(),
                None => variant.items.push(saved.clone()),
            }
        }
        info!(variant_id, item_id, instance_id = saved.id, "canvas item saved");
        Ok(saved)
    }

    // =========================================================================
    // FAILURE AND TEARDOWN
    // =========================================================================

    fn fail(&mut self, error: impl Into<SessionError>) -> SessionError {
        let error = error.into();
        warn!(project_id = ?self.project_id, code = error.error_code(), error = %error, "session call failed");
        self.last_error = Some(error.to_string());
        if error.is_session_expired() {
            self.expire();
        }
        error
    }

    fn expire(&mut self) {
        info!(project_id = ?self.project_id, "session expired; clearing editors");
        self.state = SessionState::Expired;
        self.canvas.reset();
        self.scene.reset();
        self.project_id = None;
        self.project = None;
        self.variants.clear();
        self.active_variant = None;
        self.saved_instances.clear();
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Active => Ok(()),
            SessionState::Expired => Err(SessionError::Expired),
        }
    }

    fn bound_id(&self) -> Result<ProjectId, SessionError> {
        self.project_id.ok_or(SessionError::NoProject)
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    #[must_use]
    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn canvas(&self) -> &CanvasEditor {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut CanvasEditor {
        &mut self.canvas
    }

    #[must_use]
    pub fn scene(&self) -> &SceneEditor {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneEditor {
        &mut self.scene
    }

    #[must_use]
    pub fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    #[must_use]
    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    #[must_use]
    pub fn variants(&self) -> &[DesignVariant] {
        &self.variants
    }

    #[must_use]
    pub fn active_variant(&self) -> Option<VariantId> {
        self.active_variant
    }

    /// Message of the most recent failure, for display.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
