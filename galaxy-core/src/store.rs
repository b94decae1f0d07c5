use crate::config::Params;

/// Owner of the live galaxy parameters.
///
/// The UI edits [`ParamStore::params_mut`] freely while a control is being
/// dragged and calls [`ParamStore::mark_changed`] whenever a value moved.
/// Once per frame it calls [`ParamStore::settle`]; only when the pointer
/// interaction has ended does a pending edit turn into a snapshot to
/// regenerate from. Intermediate drag values never reach the generator.
#[derive(Debug)]
pub struct ParamStore {
    live: Params,
    generated: Option<Params>,
    pending: bool,
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

impl ParamStore {
    /// Creates a store with `params` and a pending initial generation.
    pub fn new(params: Params) -> Self {
        Self {
            live: params,
            generated: None,
            pending: true,
        }
    }

    /// Current values, including any edit still in progress.
    pub fn params(&self) -> &Params {
        &self.live
    }

    pub fn params_mut(&mut self) -> &mut Params {
        &mut self.live
    }

    /// Parameters of the cloud currently on screen, if any was generated.
    pub fn generated(&self) -> Option<&Params> {
        self.generated.as_ref()
    }

    /// Records that a control changed the live parameters.
    pub fn mark_changed(&mut self) {
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Turns a finished edit into a generation request.
    ///
    /// ### Parameters
    /// - `interaction_active` - Whether the user is still dragging or
    ///   otherwise in the middle of an edit.
    ///
    /// ### Returns
    /// `Some(params)` to generate from when an edit is pending, the
    /// interaction has ended, and the sanitized values differ from the
    /// ones last generated. `None` otherwise.
    pub fn settle(&mut self, interaction_active: bool) -> Option<Params> {
        if !self.pending || interaction_active {
            return None;
        }
        self.pending = false;

        if let Err(e) = self.live.validate() {
            log::warn!("invalid galaxy parameters ({e}); clamping");
        }
        self.live = self.live.sanitized();

        if self.generated.as_ref() == Some(&self.live) {
            return None;
        }
        self.generated = Some(self.live);
        Some(self.live)
    }

    /// Forces the next [`ParamStore::settle`] to regenerate even if the
    /// values are unchanged (e.g. to draw a fresh random galaxy).
    pub fn request_regeneration(&mut self) {
        self.generated = None;
        self.pending = true;
    }

    /// Restores default parameters and schedules a regeneration.
    pub fn reset(&mut self) {
        self.live = Params::default();
        self.request_regeneration();
    }
}
