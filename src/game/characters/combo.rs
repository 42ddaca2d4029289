// Attack combo bookkeeping

/// Tracks which attack variant comes next
///
/// The index only ever grows on `record`; `select` brings it back to the
/// first variant when the combo ran out of variants or the window between
/// attacks elapsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComboTracker {
    index: usize,
    last_attack: Option<f32>,
}

impl ComboTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variant the next recorded attack will count from
    pub fn index(&self) -> usize {
        self.index
    }

    /// Time the last attack ended, if any
    pub fn last_attack(&self) -> Option<f32> {
        self.last_attack
    }

    /// Pick the variant for an attack starting at `now`
    pub fn select(&mut self, now: f32, variant_count: usize, window: f32) -> usize {
        let expired = self
            .last_attack
            .map_or(true, |last| now - last >= window);

        if self.index >= variant_count || expired {
            self.index = 0;
        }
        self.index
    }

    /// Count an attack that ended at `now`
    pub fn record(&mut self, now: f32) {
        self.index = self.index.saturating_add(1);
        self.last_attack = Some(now);
    }
}
