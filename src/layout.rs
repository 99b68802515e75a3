//! Fusion of page text, attribute runs and per-character layout.
//!
//! The three inputs come from separate native calls. Fusion pairs character
//! `i` of the text with `layout[i]` and with the first run, in native order,
//! whose closed range `start..=end` contains `i`.

use crate::error::{Error, Result};
use crate::model::{Rectangle, TextAttributes, TextEl, TextLayoutAndAttrs};

/// How covering runs are looked up during fusion.
///
/// Both strategies produce identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FusionStrategy {
    /// Scan every run for every character, O(n·m).
    LinearScan,
    /// Resolve all characters up front with a skip table, ~O(n + m).
    #[default]
    Indexed,
}

/// Combine text, runs and layout into one element per character.
///
/// Fails with [`Error::IndexMismatch`] unless the layout has exactly one box
/// per character of `text`.
pub fn fuse(
    text: &str,
    attributes: Vec<TextAttributes>,
    layout: &[Rectangle],
    strategy: FusionStrategy,
) -> Result<TextLayoutAndAttrs> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() != layout.len() {
        return Err(Error::IndexMismatch {
            text_len: chars.len(),
            layout_len: layout.len(),
        });
    }

    let resolved = match strategy {
        FusionStrategy::LinearScan => resolve_linear(chars.len(), &attributes),
        FusionStrategy::Indexed => resolve_indexed(chars.len(), &attributes),
    };

    let elements = chars
        .into_iter()
        .zip(layout)
        .zip(resolved)
        .map(|((text, rect), attrs)| TextEl {
            text,
            attrs,
            rect: *rect,
        })
        .collect();

    Ok(TextLayoutAndAttrs {
        attributes,
        elements,
    })
}

fn resolve_linear(len: usize, runs: &[TextAttributes]) -> Vec<Option<usize>> {
    (0..len)
        .map(|i| runs.iter().position(|run| run.covers(i)))
        .collect()
}

/// Fill each slot with the first run covering it.
///
/// Runs are visited in native order and only write unresolved slots, so the
/// first match wins. `next_open[i]` points at the first unresolved slot at or
/// after `i` (path-compressed), letting each run jump over slots that earlier
/// runs already claimed.
fn resolve_indexed(len: usize, runs: &[TextAttributes]) -> Vec<Option<usize>> {
    let mut resolved = vec![None; len];
    let mut next_open: Vec<usize> = (0..=len).collect();

    for (run_idx, run) in runs.iter().enumerate() {
        if run.start_index >= len {
            continue;
        }
        let end = run.end_index.min(len - 1);
        let mut i = find_open(&mut next_open, run.start_index);
        while i <= end {
            resolved[i] = Some(run_idx);
            next_open[i] = i + 1;
            i = find_open(&mut next_open, i + 1);
        }
    }

    resolved
}

fn find_open(next_open: &mut [usize], start: usize) -> usize {
    let mut root = start;
    while next_open[root] != root {
        root = next_open[root];
    }
    let mut i = start;
    while next_open[i] != root {
        let next = next_open[i];
        next_open[i] = root;
        i = next;
    }
    root
}
