//! Placeholder marker selection and emphasis interpolation.
//!
//! Markers give the day column visual rhythm: interval-aligned
//! placeholders around scheduled tasks, exactly one midpoint marker in
//! each large gap, and a suppression rule so gaps already carrying the
//! now-marker stay clean.

use std::collections::{BTreeSet, HashMap};

use crate::config::MarkerTuning;

/// Select the placeholder minutes for a day.
///
/// `scheduled` is the set of scheduled task minutes (any order,
/// duplicates fine); `now` is the current minute when composing today.
/// Pure: same inputs, same output, sorted ascending.
pub fn placeholder_minutes(scheduled: &[u16], now: Option<u16>, tuning: &MarkerTuning) -> Vec<u16> {
    let interval = tuning.interval_min.max(1);
    let minutes: BTreeSet<u16> = scheduled.iter().copied().collect();

    if minutes.is_empty() {
        // Empty day: structure around the fixed anchor and, when today,
        // the interval brackets of the current minute.
        let mut result: BTreeSet<u16> = BTreeSet::new();
        result.insert(tuning.default_anchor_minute);
        if let Some(now) = now {
            let lower = now - now % interval;
            result.insert(lower);
            if let Some(upper) = lower.checked_add(interval).filter(|m| *m < 1440) {
                result.insert(upper);
            }
        }
        return result.into_iter().collect();
    }

    let sorted: Vec<u16> = minutes.iter().copied().collect();
    let anchor = sorted[0];

    // Candidate boundaries around every scheduled minute.
    let mut candidates: BTreeSet<u16> = BTreeSet::new();
    candidates.insert(anchor);
    for &minute in &sorted {
        let lower = minute - minute % interval;
        if minute == lower {
            // On a boundary: the boundaries on either side.
            if let Some(below) = minute.checked_sub(interval) {
                candidates.insert(below);
            }
            if let Some(above) = minute.checked_add(interval).filter(|m| *m < 1440) {
                candidates.insert(above);
            }
        } else {
            candidates.insert(lower);
            if let Some(above) = lower.checked_add(interval).filter(|m| *m < 1440) {
                candidates.insert(above);
            }
        }
    }

    // One midpoint marker per wide gap between consecutive tasks.
    let mut chosen_per_gap: HashMap<(u16, u16), u16> = HashMap::new();
    for pair in sorted.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if b - a < interval {
            continue;
        }
        let midpoint = a + (b - a) / 2;
        let lower = midpoint - midpoint % interval;
        let upper = lower + interval;
        // Aligned minute closest to the midpoint, ties toward the
        // smaller minute.
        let chosen = if midpoint - lower <= upper - midpoint {
            lower
        } else {
            upper
        };
        chosen_per_gap.insert((a, b), chosen);
        candidates.insert(chosen);
    }

    // Suppress stray boundary markers inside gaps: only the chosen
    // midpoint survives, and not even that when "now" sits in the gap.
    for pair in sorted.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let now_in_gap = now.is_some_and(|n| n > a && n < b);
        let chosen = chosen_per_gap.get(&(a, b)).copied();
        candidates.retain(|&m| {
            if m <= a || m >= b {
                return true;
            }
            !now_in_gap && chosen == Some(m)
        });
    }

    candidates.into_iter().collect()
}

/// Assign a visual emphasis in `[emphasis_min, emphasis_max]` to each
/// placeholder minute.
///
/// The placeholders bracketing the current minute share the emphasis by
/// linear interpolation of the current minute's position between them;
/// everything else sits at the floor. Without a current minute all
/// placeholders are background.
pub fn emphasis_map(
    placeholders: &[u16],
    now: Option<u16>,
    tuning: &MarkerTuning,
) -> HashMap<u16, f32> {
    let (lo, hi) = (tuning.emphasis_min, tuning.emphasis_max);
    let mut map: HashMap<u16, f32> = placeholders.iter().map(|&m| (m, lo)).collect();

    if placeholders.len() <= 1 {
        if let Some(&only) = placeholders.first() {
            map.insert(only, hi);
        }
        return map;
    }
    let Some(now) = now else {
        return map;
    };

    let first = placeholders[0];
    let last = placeholders[placeholders.len() - 1];
    if now <= first {
        map.insert(first, hi);
        return map;
    }
    if now >= last {
        map.insert(last, hi);
        return map;
    }

    // now is strictly inside: find the bracketing pair.
    let after_idx = placeholders
        .iter()
        .position(|&m| m > now)
        .unwrap_or(placeholders.len() - 1);
    let before = placeholders[after_idx - 1];
    let after = placeholders[after_idx];
    let span = (after - before) as f32;
    let frac = (now - before) as f32 / span.max(1.0);
    map.insert(before, lo + (hi - lo) * (1.0 - frac));
    map.insert(after, lo + (hi - lo) * frac);
    map
}
