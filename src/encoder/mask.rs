//! Mask selection: apply each pattern, score the N1-N4 penalties, keep the
//! cheapest.

use rayon::prelude::*;

use crate::models::{EcLevel, MaskPattern, MaskSpec, QrMatrix, ALL_MASK_PATTERNS};

/// Apply the requested or best-scoring mask and write the matching format
/// information.
///
/// A fixed mask skips evaluation entirely. Automatic selection tries all
/// eight patterns on independent copies (in parallel); ties break toward
/// the lowest pattern index, so the result never depends on scheduling.
pub fn apply_best_mask(matrix: QrMatrix, ec_level: EcLevel, spec: MaskSpec) -> QrMatrix {
    match spec {
        MaskSpec::Fixed(pattern) => masked(&matrix, ec_level, pattern),
        MaskSpec::Auto => {
            let trials: Vec<(u32, u8, QrMatrix)> = ALL_MASK_PATTERNS
                .par_iter()
                .map(|&pattern| {
                    let trial = masked(&matrix, ec_level, pattern);
                    (penalty(&trial), pattern.index(), trial)
                })
                .collect();
            trials
                .into_iter()
                .min_by_key(|(score, index, _)| (*score, *index))
                .map(|(_, _, trial)| trial)
                .expect("eight mask trials")
        }
    }
}

fn masked(matrix: &QrMatrix, ec_level: EcLevel, pattern: MaskPattern) -> QrMatrix {
    let mut trial = matrix.clone();
    trial.mask(pattern);
    trial.set_format_info(ec_level, pattern);
    trial
}

/// Total penalty score of a finished symbol (N1 + N2 + N3 + N4).
pub fn penalty(matrix: &QrMatrix) -> u32 {
    penalty_runs(matrix) + penalty_blocks(matrix) + penalty_finder_like(matrix)
        + penalty_balance(matrix)
}

/// N1: rows and columns with 5 or more same-colored modules in a run score
/// 3 plus one per extra module.
fn penalty_runs(matrix: &QrMatrix) -> u32 {
    let size = matrix.size();
    let mut score = 0;
    for i in 0..size {
        score += line_run_penalty((0..size).map(|j| matrix.get(j, i).is_dark()));
        score += line_run_penalty((0..size).map(|j| matrix.get(i, j).is_dark()));
    }
    score
}

fn line_run_penalty(line: impl Iterator<Item = bool>) -> u32 {
    let mut score = 0;
    let mut run_color = None;
    let mut run_len = 0u32;
    for dark in line {
        if Some(dark) == run_color {
            run_len += 1;
            if run_len == 5 {
                score += 3;
            } else if run_len > 5 {
                score += 1;
            }
        } else {
            run_color = Some(dark);
            run_len = 1;
        }
    }
    score
}

/// N2: every 2x2 block of one color scores 3.
fn penalty_blocks(matrix: &QrMatrix) -> u32 {
    let size = matrix.size();
    let mut score = 0;
    for y in 0..size - 1 {
        for x in 0..size - 1 {
            let dark = matrix.get(x, y).is_dark();
            if dark == matrix.get(x + 1, y).is_dark()
                && dark == matrix.get(x, y + 1).is_dark()
                && dark == matrix.get(x + 1, y + 1).is_dark()
            {
                score += 3;
            }
        }
    }
    score
}

/// N3: a 1:1:3:1:1 finder-like run with four light modules on either side
/// scores 40 per occurrence, in rows and columns.
fn penalty_finder_like(matrix: &QrMatrix) -> u32 {
    const PATTERNS: [[bool; 11]; 2] = [
        [
            true, false, true, true, true, false, true, false, false, false, false,
        ],
        [
            false, false, false, false, true, false, true, true, true, false, true,
        ],
    ];
    let size = matrix.size();
    let mut score = 0;
    for i in 0..size {
        let row: Vec<bool> = (0..size).map(|j| matrix.get(j, i).is_dark()).collect();
        let col: Vec<bool> = (0..size).map(|j| matrix.get(i, j).is_dark()).collect();
        for line in [&row, &col] {
            for window in line.windows(11) {
                if PATTERNS.iter().any(|p| window == p.as_slice()) {
                    score += 40;
                }
            }
        }
    }
    score
}

/// N4: 10 points per 5% the dark-module share strays from 50%.
fn penalty_balance(matrix: &QrMatrix) -> u32 {
    let total = matrix.size() * matrix.size();
    let dark = matrix.count_dark();
    let percent = dark * 100 / total;
    let deviation = percent.abs_diff(50) as u32;
    10 * (deviation / 5)
}
