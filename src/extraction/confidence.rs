/// Confidence thresholds used by validation and review routing
pub mod thresholds {
    /// Below this: extraction likely failed. Route straight to manual review.
    pub const VERY_LOW: f32 = 0.30;

    /// Below this: significant uncertainty. Flag the field by name.
    pub const LOW: f32 = 0.50;

    /// Below this: some uncertainty. No flagging, surfaced in audit only.
    pub const MODERATE: f32 = 0.70;

    /// Above this: high confidence. Matched an explicit, distinctive phrase.
    pub const HIGH: f32 = 0.85;
}
