//! Scroll-triggered reveal
//!
//! Elements marked for reveal start hidden and receive a `visible` class the
//! first time enough of them scrolls into view. After that they are no longer
//! watched: scrolling away and back does not hide or re-trigger them.

use std::collections::HashMap;
use std::hash::Hash;

use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{EffectsError, Result};
use crate::geometry::{Margin, Rect};

/// Class added to an element once it has been revealed
pub const VISIBLE_CLASS: &str = "visible";

/// Intersection settings for the reveal observer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RevealOptions {
    /// Fraction of the element that must be inside the root to reveal it
    pub threshold: f32,
    /// Adjustment applied to the viewport before intersecting
    pub root_margin: Margin,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            root_margin: Margin::new(0.0, 0.0, -40.0, 0.0),
        }
    }
}

impl RevealOptions {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(EffectsError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }

    /// Fraction of `element` inside the viewport after applying the margin
    pub fn intersection_ratio(&self, viewport: &Rect, element: &Rect) -> f32 {
        let root = viewport.expand(&self.root_margin);
        let Some(overlap) = root.intersection(element) else {
            return 0.0;
        };

        let area = element.area();
        if area <= 0.0 {
            // Zero-sized elements are either touching the root or not
            return 1.0;
        }
        (overlap.area() / area).clamp(0.0, 1.0)
    }

    /// Whether the element would be revealed in this viewport
    pub fn is_revealing(&self, viewport: &Rect, element: &Rect) -> bool {
        let root = viewport.expand(&self.root_margin);
        if root.intersection(element).is_none() {
            return false;
        }
        self.intersection_ratio(viewport, element) >= self.threshold
    }
}

/// Reveal state of a single element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    /// Still being observed
    Hidden,
    /// Revealed and no longer observed
    Visible,
}

/// One-shot reveal observer keyed by element id
#[derive(Debug, Clone)]
pub struct RevealTracker<K> {
    options: RevealOptions,
    states: HashMap<K, RevealState>,
}

impl<K: Eq + Hash + Clone> RevealTracker<K> {
    pub fn new(options: RevealOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            states: HashMap::new(),
        })
    }

    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    /// Start observing an element
    ///
    /// Observing an element that was already revealed has no effect.
    pub fn observe(&mut self, id: K) {
        self.states.entry(id).or_insert(RevealState::Hidden);
    }

    /// Observe every element of an iterator
    pub fn observe_all<I: IntoIterator<Item = K>>(&mut self, ids: I) {
        for id in ids {
            self.observe(id);
        }
    }

    /// Current state, `None` if the element was never observed
    pub fn state(&self, id: &K) -> Option<RevealState> {
        self.states.get(id).copied()
    }

    pub fn is_visible(&self, id: &K) -> bool {
        self.state(id) == Some(RevealState::Visible)
    }

    /// Number of elements still waiting to be revealed
    pub fn pending(&self) -> usize {
        self.states
            .values()
            .filter(|state| **state == RevealState::Hidden)
            .count()
    }

    /// Evaluate the current layout
    ///
    /// `elements` holds the on-screen rectangle of each element the host
    /// knows about; ids that are not observed, or already revealed, are
    /// ignored. Returns the ids revealed by this update, in input order.
    pub fn update<'a, I>(&mut self, viewport: &Rect, elements: I) -> Vec<K>
    where
        I: IntoIterator<Item = (&'a K, &'a Rect)>,
        K: 'a,
    {
        let mut revealed = Vec::new();

        for (id, rect) in elements {
            let Some(state) = self.states.get_mut(id) else {
                continue;
            };
            if *state == RevealState::Visible {
                continue;
            }
            if self.options.is_revealing(viewport, rect) {
                *state = RevealState::Visible;
                revealed.push(id.clone());
            }
        }

        if !revealed.is_empty() {
            debug!(
                "Revealed {} element(s), {} still pending",
                revealed.len(),
                self.pending()
            );
        }
        revealed
    }
}
