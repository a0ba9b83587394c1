use crate::{Clock, RegenError, RegenOptions, TimerQueue};
use serde::{Deserialize, Serialize};
use styletrend_dom::{Document, NodeId, SelectorList};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegenState {
    Idle,
    Loading,
}

/// One wrapper with its button, overlay and image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegenGroup {
    pub wrapper: NodeId,
    pub button: NodeId,
    pub overlay: NodeId,
    pub image: NodeId,
    state: RegenState,
    /// Bumped on every accepted click; timers from older clicks are stale
    generation: u64,
    /// Set between the source swap and the overlay being cleared
    awaiting_load: bool,
    /// Virtual time at which the overlay was last cleared
    cleared_at: Option<u64>,
}

impl RegenGroup {
    pub fn state(&self) -> RegenState {
        self.state
    }

    pub fn cleared_at(&self) -> Option<u64> {
        self.cleared_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegenTask {
    SwapImage { group: usize, generation: u64 },
    Fallback { group: usize, generation: u64 },
}

/// Replace any query string on `src` with `?{param}={timestamp}`
pub fn cache_busted(src: &str, param: &str, timestamp: i64) -> String {
    let base = src.split_once('?').map(|(base, _)| base).unwrap_or(src);
    format!("{}?{}={}", base, param, timestamp)
}

#[derive(Debug)]
pub struct RegenerationSimulator {
    options: RegenOptions,
    groups: Vec<RegenGroup>,
    timers: TimerQueue<RegenTask>,
}

impl RegenerationSimulator {
    /// Find every complete wrapper on the page.
    ///
    /// Wrappers missing a button, overlay or image are skipped.
    pub fn discover(doc: &Document, options: RegenOptions) -> Result<Self, RegenError> {
        let wrappers: SelectorList = options.wrapper_selector.parse()?;
        let buttons: SelectorList = options.button_selector.parse()?;
        let overlays: SelectorList = options.overlay_selector.parse()?;
        let images: SelectorList = options.image_selector.parse()?;

        let mut groups = Vec::new();
        for wrapper in doc.select(doc.root(), &wrappers) {
            let first = |selectors: &SelectorList| doc.select(wrapper, selectors).into_iter().next();
            match (first(&buttons), first(&overlays), first(&images)) {
                (Some(button), Some(overlay), Some(image)) => groups.push(RegenGroup {
                    wrapper,
                    button,
                    overlay,
                    image,
                    state: RegenState::Idle,
                    generation: 0,
                    awaiting_load: false,
                    cleared_at: None,
                }),
                _ => tracing::debug!(wrapper = %wrapper, "skipping incomplete regeneration wrapper"),
            }
        }

        tracing::debug!(groups = groups.len(), "discovered regeneration groups");
        Ok(Self {
            options,
            groups,
            timers: TimerQueue::new(),
        })
    }

    pub fn options(&self) -> &RegenOptions {
        &self.options
    }

    pub fn groups(&self) -> &[RegenGroup] {
        &self.groups
    }

    pub fn state(&self, group: usize) -> Option<RegenState> {
        self.groups.get(group).map(|g| g.state)
    }

    /// Group whose button is `node` or contains it
    pub fn group_for_button(&self, doc: &Document, node: NodeId) -> Option<usize> {
        let mut current = Some(node);
        while let Some(id) = current {
            if let Some(index) = self.groups.iter().position(|g| g.button == id) {
                return Some(index);
            }
            current = doc.parent(id);
        }
        None
    }

    pub fn group_for_image(&self, image: NodeId) -> Option<usize> {
        self.groups.iter().position(|g| g.image == image)
    }

    pub fn is_idle(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Start a regeneration. Clicks while already loading are ignored.
    pub fn click(&mut self, doc: &mut Document, group: usize, now: u64) -> Result<bool, RegenError> {
        let delay = self.options.processing_delay_ms;
        let entry = self.groups.get_mut(group).ok_or(RegenError::UnknownGroup(group))?;
        if entry.state == RegenState::Loading {
            return Ok(false);
        }

        doc.add_class(entry.overlay, &self.options.active_class)?;
        entry.state = RegenState::Loading;
        entry.generation += 1;
        entry.awaiting_load = false;
        let generation = entry.generation;

        self.timers
            .schedule(now, delay, RegenTask::SwapImage { group, generation });
        tracing::debug!(group, now, "regeneration started");
        Ok(true)
    }

    /// Run every timer due at or before `now`; returns how many fired
    pub fn advance(&mut self, doc: &mut Document, now: u64, clock: &dyn Clock) -> Result<usize, RegenError> {
        let mut fired = 0;
        while let Some((due, task)) = self.timers.pop_due(now) {
            fired += 1;
            match task {
                RegenTask::SwapImage { group, generation } => {
                    self.swap_image(doc, group, generation, due, clock)?
                }
                RegenTask::Fallback { group, generation } => {
                    if self.is_current(group, generation) {
                        self.clear(doc, group, due);
                    }
                }
            }
        }
        Ok(fired)
    }

    fn is_current(&self, group: usize, generation: u64) -> bool {
        self.groups
            .get(group)
            .map(|g| g.generation == generation && g.state == RegenState::Loading)
            .unwrap_or(false)
    }

    fn swap_image(
        &mut self,
        doc: &mut Document,
        group: usize,
        generation: u64,
        due: u64,
        clock: &dyn Clock,
    ) -> Result<(), RegenError> {
        if !self.is_current(group, generation) {
            return Ok(());
        }
        let image = self.groups[group].image;
        let src = doc.get_attribute(image, "src").unwrap_or_default();
        let new_src = cache_busted(src, &self.options.cache_bust_param, clock.now_millis());
        doc.set_attribute(image, "src", new_src.as_str())?;

        self.groups[group].awaiting_load = true;
        self.timers.schedule(
            due,
            self.options.fallback_delay_ms,
            RegenTask::Fallback { group, generation },
        );
        tracing::debug!(group, src = %new_src, "swapped image source");
        Ok(())
    }

    /// The image finished loading. Only a load after the swap clears the overlay.
    pub fn image_loaded(&mut self, doc: &mut Document, image: NodeId, now: u64) -> bool {
        let Some(group) = self.group_for_image(image) else {
            return false;
        };
        if !self.groups[group].awaiting_load {
            return false;
        }
        self.clear(doc, group, now);
        true
    }

    fn clear(&mut self, doc: &mut Document, group: usize, now: u64) {
        let entry = &mut self.groups[group];
        doc.remove_class(entry.overlay, &self.options.active_class);
        entry.state = RegenState::Idle;
        entry.awaiting_load = false;
        entry.cleared_at = Some(now);
        tracing::debug!(group, now, "regeneration finished");
    }
}
