//! Fade overlay around camera track transitions

use vectorfields_core::Color;
use vectorfields_render::FadeQuad;

/// Ticks from a transition at which the fade becomes invisible
pub const FADE_THRESHOLD: i64 = 1024;

/// Distance in ticks to the nearest transition, never negative
pub fn ticks_to_transition(tick: i64, track_start: i64, next_track_start: i64) -> i64 {
    (tick - track_start).min(next_track_start - tick).max(0)
}

/// Darkening quad for `tick`, or `None` when the frame stays untouched.
///
/// The quad is black at a transition and brightens linearly until
/// `threshold` ticks away from it.
pub fn fade_overlay(
    tick: i64,
    track_start: i64,
    next_track_start: i64,
    threshold: i64,
) -> Option<FadeQuad> {
    let min_fade = ticks_to_transition(tick, track_start, next_track_start);
    if min_fade >= threshold {
        return None;
    }
    let level = min_fade as f32 / threshold as f32;
    Some(FadeQuad {
        color: Color::gray(level, 0.0),
    })
}
