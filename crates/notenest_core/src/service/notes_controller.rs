//! Notes list state machine.
//!
//! # Responsibility
//! - Load the note collection after a minimum loading delay.
//! - Process create/edit/delete intents gated by the capability set.
//! - Persist the full collection after every confirmed mutation.
//! - Produce the filtered, sorted `NotesView` for rendering.
//!
//! # Invariants
//! - Nothing is written to the store before the initial load completes.
//! - Note ids are unique and strictly increasing in issue order.
//! - A failed validation leaves the collection and modal state untouched.
//! - After `teardown` no timer fires and every intent is rejected.

use crate::config::NotesConfig;
use crate::model::capability::{Capabilities, PermissionsProvider};
use crate::model::note::{
    normalize_content, normalize_title, seed_notes, Note, NoteId, NoteValidationError,
};
use crate::repo::notes_repo::{LoadOutcome, NotesRepository};
use crate::search::{visible_notes, SortMode};
use crate::service::clock::Clock;
use crate::service::relative_time::format_relative_time;
use crate::service::timer::{TimerId, TimerQueue};
use crate::service::view::{FormMode, FormView, ModalState, NoteListItem, NotesView};
use crate::store::{BlobStore, StoreError};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Action names used in permission errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteAction {
    Create,
    Edit,
    Delete,
}

impl NoteAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

/// Intent failure.
#[derive(Debug)]
pub enum ControllerError {
    /// The initial load has not completed.
    StillLoading,
    /// The controller was torn down.
    TornDown,
    /// The capability set does not allow the action.
    Forbidden(NoteAction),
    /// A modal is already open.
    ModalOpen,
    /// The intent needs an open modal.
    NoModal,
    NoteNotFound(NoteId),
    Validation(NoteValidationError),
    /// The mutation was applied in memory but the write-back failed.
    Persist(StoreError),
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StillLoading => write!(f, "notes are still loading"),
            Self::TornDown => write!(f, "notes view was torn down"),
            Self::Forbidden(action) => write!(f, "not allowed to {} notes", action.as_str()),
            Self::ModalOpen => write!(f, "a note dialog is already open"),
            Self::NoModal => write!(f, "no note dialog is open"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Persist(err) => write!(f, "failed to save notes: {err}"),
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persist(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NoteValidationError> for ControllerError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ControllerError {
    fn from(value: StoreError) -> Self {
        Self::Persist(value)
    }
}

pub type ControllerResult<T> = Result<T, ControllerError>;

/// Keyboard input routed to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Char(char),
}

/// Control that should receive focus after a dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    CreateButton,
}

/// Work scheduled on the controller's timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    FinishLoad,
    DismissNotice,
}

#[derive(Debug)]
enum Phase {
    Loading {
        pending: Vec<Note>,
        outcome: LoadOutcome,
    },
    Ready,
    TornDown,
}

#[derive(Debug, Default)]
struct NoteForm {
    title: String,
    content: String,
    error: Option<String>,
}

#[derive(Debug)]
struct Notice {
    message: &'static str,
    timer: TimerId,
}

/// Client-side controller for the notes list.
pub struct NotesController<S: BlobStore, C: Clock> {
    repo: NotesRepository<S>,
    clock: C,
    capabilities: Capabilities,
    config: NotesConfig,
    phase: Phase,
    notes: Vec<Note>,
    last_issued_id: NoteId,
    search_query: String,
    sort_mode: SortMode,
    modal: ModalState,
    form: NoteForm,
    staged_delete: Option<NoteId>,
    notice: Option<Notice>,
    load_error: Option<String>,
    timers: TimerQueue<TimerTask>,
}

impl<S: BlobStore, C: Clock> NotesController<S, C> {
    /// Reads the stored collection and schedules its reveal after the
    /// configured load delay. Store failures are absorbed here.
    pub fn mount(
        store: S,
        clock: C,
        permissions: &impl PermissionsProvider,
        config: NotesConfig,
    ) -> Self {
        let repo = NotesRepository::new(store, config.storage_key.clone());
        let (pending, outcome) = repo.load();
        let due = clock.now_ms().saturating_add(delay_ms(config.load_delay_ms));
        let mut timers = TimerQueue::new();
        timers.schedule(due, TimerTask::FinishLoad);

        debug!(
            "event=notes_mount module=controller status=loading outcome={:?} stored_count={} delay_ms={}",
            outcome,
            pending.len(),
            config.load_delay_ms
        );

        Self {
            repo,
            clock,
            capabilities: permissions.capabilities(),
            config,
            phase: Phase::Loading { pending, outcome },
            notes: Vec::new(),
            last_issued_id: 0,
            search_query: String::new(),
            sort_mode: SortMode::default(),
            modal: ModalState::Closed,
            form: NoteForm::default(),
            staged_delete: None,
            notice: None,
            load_error: None,
            timers,
        }
    }

    /// Fires every timer due at the current clock time.
    ///
    /// Returns the tasks that ran, in firing order.
    pub fn tick(&mut self) -> Vec<TimerTask> {
        if matches!(self.phase, Phase::TornDown) {
            return Vec::new();
        }

        let fired = self.timers.take_due(self.clock.now_ms());
        let mut ran = Vec::with_capacity(fired.len());
        for (id, task) in fired {
            match task {
                TimerTask::FinishLoad => self.finish_load(),
                TimerTask::DismissNotice => {
                    if self.notice.as_ref().is_some_and(|notice| notice.timer == id) {
                        self.notice = None;
                    }
                }
            }
            ran.push(task);
        }
        ran
    }

    /// Earliest pending timer due time, for hosts that sleep between ticks.
    pub fn next_timer_due(&self) -> Option<i64> {
        self.timers.next_due()
    }

    /// Cancels pending timers; the controller is inert afterwards.
    pub fn teardown(&mut self) {
        if matches!(self.phase, Phase::TornDown) {
            return;
        }
        let cancelled = self.timers.cancel_all();
        self.notice = None;
        self.phase = Phase::TornDown;
        debug!("event=notes_teardown module=controller status=ok cancelled_timers={cancelled}");
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    pub fn is_torn_down(&self) -> bool {
        matches!(self.phase, Phase::TornDown)
    }

    /// Collection in storage (insertion) order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn modal(&self) -> ModalState {
        self.modal
    }

    pub fn staged_delete(&self) -> Option<NoteId> {
        self.staged_delete
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn config(&self) -> &NotesConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        self.repo.store()
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
    }

    /// Opens the empty create form.
    pub fn open_create(&mut self) -> ControllerResult<()> {
        self.ensure_ready()?;
        if !self.capabilities.can_create_note {
            return Err(ControllerError::Forbidden(NoteAction::Create));
        }
        self.ensure_modal_closed()?;

        self.form = NoteForm::default();
        self.modal = ModalState::OpenCreate;
        debug!("event=note_form_open module=controller status=ok mode=create");
        Ok(())
    }

    /// Opens the form pre-filled with note `id`.
    pub fn open_edit(&mut self, id: NoteId) -> ControllerResult<()> {
        self.ensure_ready()?;
        if !self.capabilities.shows_item_actions() {
            return Err(ControllerError::Forbidden(NoteAction::Edit));
        }
        self.ensure_modal_closed()?;
        let form = {
            let note = self.find(id).ok_or(ControllerError::NoteNotFound(id))?;
            NoteForm {
                title: note.title.clone(),
                content: note.content.clone().unwrap_or_default(),
                error: None,
            }
        };

        self.form = form;
        self.modal = ModalState::OpenEdit(id);
        debug!("event=note_form_open module=controller status=ok mode=edit note_id={id}");
        Ok(())
    }

    /// Replaces the title input and clears any validation error.
    pub fn set_form_title(&mut self, title: impl Into<String>) -> ControllerResult<()> {
        self.ensure_modal_open()?;
        self.form.title = title.into();
        self.form.error = None;
        Ok(())
    }

    pub fn set_form_content(&mut self, content: impl Into<String>) -> ControllerResult<()> {
        self.ensure_modal_open()?;
        self.form.content = content.into();
        Ok(())
    }

    /// Closes the modal without saving.
    pub fn cancel_form(&mut self) -> ControllerResult<()> {
        self.ensure_modal_open()?;
        self.close_modal();
        Ok(())
    }

    /// Validates the form and applies it as a create or an edit.
    ///
    /// Returns the created or updated note.
    ///
    /// # Errors
    /// - `Validation` leaves the modal open with the inline error set.
    /// - `NoteNotFound` when the edit target disappeared; the modal stays open.
    /// - `Persist` after the mutation was applied and the modal closed.
    pub fn submit_form(&mut self) -> ControllerResult<Note> {
        self.ensure_ready()?;
        let mode = self.modal.form_mode().ok_or(ControllerError::NoModal)?;

        let title = match normalize_title(&self.form.title, self.config.title_max_chars) {
            Ok(title) => title,
            Err(err) => {
                debug!(
                    "event=note_submit module=controller status=rejected reason={:?}",
                    err
                );
                self.form.error = Some(err.to_string());
                return Err(err.into());
            }
        };
        let content = normalize_content(&self.form.content);

        let previous = self.modal;
        self.modal = ModalState::Submitting(mode);
        let saved = match mode {
            FormMode::Edit(id) => {
                let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
                    self.modal = previous;
                    return Err(ControllerError::NoteNotFound(id));
                };
                note.title = title;
                note.content = content;
                note.clone()
            }
            FormMode::Create => {
                let now = self.clock.now_ms();
                let id = self.next_note_id(now);
                let note = Note::new(id, title, content, now);
                self.notes.push(note.clone());
                note
            }
        };

        info!(
            "event=note_saved module=controller status=ok mode={} note_id={} count={}",
            match mode {
                FormMode::Create => "create",
                FormMode::Edit(_) => "edit",
            },
            saved.id,
            self.notes.len()
        );

        self.close_modal();
        self.show_notice(mode.success_message());
        self.persist()?;
        Ok(saved)
    }

    /// Stages note `id` for deletion pending confirmation.
    pub fn stage_delete(&mut self, id: NoteId) -> ControllerResult<()> {
        self.ensure_ready()?;
        if !self.capabilities.may_delete() {
            return Err(ControllerError::Forbidden(NoteAction::Delete));
        }
        if self.find(id).is_none() {
            return Err(ControllerError::NoteNotFound(id));
        }
        self.staged_delete = Some(id);
        Ok(())
    }

    /// Removes the staged note, if any, and persists.
    pub fn confirm_delete(&mut self) -> ControllerResult<Option<Note>> {
        self.ensure_ready()?;
        let Some(id) = self.staged_delete.take() else {
            return Ok(None);
        };
        let Some(index) = self.notes.iter().position(|note| note.id == id) else {
            return Ok(None);
        };

        let removed = self.notes.remove(index);
        info!(
            "event=note_deleted module=controller status=ok note_id={} count={}",
            removed.id,
            self.notes.len()
        );
        self.persist()?;
        Ok(Some(removed))
    }

    /// Clears the staged deletion. Returns whether one was staged.
    pub fn cancel_delete(&mut self) -> bool {
        self.staged_delete.take().is_some()
    }

    /// Routes a key press. Escape closes the modal and any staged delete.
    ///
    /// Returns the control to focus when something was dismissed.
    pub fn handle_key(&mut self, key: Key) -> Option<FocusTarget> {
        if key != Key::Escape || self.is_torn_down() {
            return None;
        }

        let closed_modal = self.modal.is_open();
        if closed_modal {
            self.close_modal();
        }
        let cleared_delete = self.cancel_delete();

        (closed_modal || cleared_delete).then_some(FocusTarget::CreateButton)
    }

    /// Builds the render snapshot at the current clock time.
    pub fn view(&self) -> NotesView {
        let is_loading = self.is_loading();
        let now = self.clock.now_ms();
        let notes: Vec<NoteListItem> = if is_loading {
            Vec::new()
        } else {
            visible_notes(&self.notes, &self.search_query, self.sort_mode)
                .into_iter()
                .map(|note| NoteListItem {
                    created_label: format_relative_time(note.created_at, now),
                    note,
                })
                .collect()
        };

        NotesView {
            is_loading,
            load_error: self.load_error.clone(),
            is_empty_result: !is_loading && notes.is_empty(),
            notes,
            search_query: self.search_query.clone(),
            sort_mode: self.sort_mode,
            form: self.form_view(),
            success_message: self.notice.as_ref().map(|notice| notice.message.to_string()),
            pending_delete: self.staged_delete.and_then(|id| self.find(id).cloned()),
            show_create_action: self.capabilities.can_create_note,
            show_item_actions: self.capabilities.shows_item_actions(),
        }
    }

    fn form_view(&self) -> Option<FormView> {
        let mode = self.modal.form_mode()?;
        Some(FormView {
            mode,
            heading: mode.heading(),
            submit_label: mode.submit_label(),
            title: self.form.title.clone(),
            content: self.form.content.clone(),
            title_char_count: self.form.title.chars().count(),
            title_max_chars: self.config.title_max_chars,
            error: self.form.error.clone(),
            can_submit: !self.form.title.trim().is_empty(),
        })
    }

    fn finish_load(&mut self) {
        if !self.is_loading() {
            return;
        }
        let Phase::Loading { pending, outcome } =
            std::mem::replace(&mut self.phase, Phase::Ready)
        else {
            return;
        };

        let seeded = pending.is_empty();
        self.notes = if seeded { seed_notes() } else { pending };
        self.last_issued_id = self.notes.iter().map(|note| note.id).max().unwrap_or(0);
        info!(
            "event=notes_loaded module=controller status=ok outcome={:?} seeded={} count={}",
            outcome,
            seeded,
            self.notes.len()
        );

        // No caller to report to; a failed write is already logged and kept in `load_error`.
        self.persist().ok();
    }

    fn persist(&mut self) -> ControllerResult<()> {
        if !matches!(self.phase, Phase::Ready) {
            return Ok(());
        }
        match self.repo.save(&self.notes) {
            Ok(()) => {
                self.load_error = None;
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=notes_persist module=controller status=error count={} error={}",
                    self.notes.len(),
                    err
                );
                self.load_error = Some(format!("Failed to save notes: {err}"));
                Err(err.into())
            }
        }
    }

    fn show_notice(&mut self, message: &'static str) {
        if let Some(previous) = self.notice.take() {
            self.timers.cancel(previous.timer);
        }
        let due = self
            .clock
            .now_ms()
            .saturating_add(delay_ms(self.config.notice_dismiss_ms));
        let timer = self.timers.schedule(due, TimerTask::DismissNotice);
        self.notice = Some(Notice { message, timer });
    }

    fn next_note_id(&mut self, now: i64) -> NoteId {
        let id = now.max(self.last_issued_id.saturating_add(1));
        self.last_issued_id = id;
        id
    }

    fn close_modal(&mut self) {
        self.modal = ModalState::Closed;
        self.form = NoteForm::default();
    }

    fn find(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    fn ensure_ready(&self) -> ControllerResult<()> {
        match self.phase {
            Phase::Ready => Ok(()),
            Phase::Loading { .. } => Err(ControllerError::StillLoading),
            Phase::TornDown => Err(ControllerError::TornDown),
        }
    }

    fn ensure_modal_closed(&self) -> ControllerResult<()> {
        if self.modal.is_open() {
            return Err(ControllerError::ModalOpen);
        }
        Ok(())
    }

    fn ensure_modal_open(&self) -> ControllerResult<()> {
        if self.is_torn_down() {
            return Err(ControllerError::TornDown);
        }
        if !self.modal.is_open() {
            return Err(ControllerError::NoModal);
        }
        Ok(())
    }
}

fn delay_ms(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::{ControllerError, NotesController, TimerTask};
    use crate::config::NotesConfig;
    use crate::model::capability::Capabilities;
    use crate::service::clock::ManualClock;
    use crate::store::MemoryBlobStore;
    use std::time::Duration;

    #[test]
    fn intents_are_rejected_until_the_load_timer_fires() {
        let clock = ManualClock::new(10_000);
        let mut controller = NotesController::mount(
            MemoryBlobStore::new(),
            clock.clone(),
            &Capabilities::editor(),
            NotesConfig::default(),
        );

        assert!(matches!(
            controller.open_create(),
            Err(ControllerError::StillLoading)
        ));
        clock.advance(Duration::from_millis(599));
        assert!(controller.tick().is_empty());
        assert!(controller.is_loading());

        clock.advance(Duration::from_millis(1));
        assert_eq!(controller.tick(), vec![TimerTask::FinishLoad]);
        assert!(!controller.is_loading());
        assert!(controller.open_create().is_ok());
    }

    #[test]
    fn ids_stay_unique_within_one_millisecond() {
        let clock = ManualClock::new(50_000);
        let mut controller = NotesController::mount(
            MemoryBlobStore::new(),
            clock.clone(),
            &Capabilities::editor(),
            NotesConfig {
                load_delay_ms: 0,
                ..NotesConfig::default()
            },
        );
        controller.tick();

        let mut ids = Vec::new();
        for title in ["a", "b", "c"] {
            controller.open_create().unwrap();
            controller.set_form_title(title).unwrap();
            ids.push(controller.submit_form().unwrap().id);
        }
        assert_eq!(ids, vec![50_000, 50_001, 50_002]);
    }
}
