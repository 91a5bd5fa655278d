//! Iterative row/column decoding.
//!
//! Each pass first decodes every violated row against the row code, then every violated column
//! against the column code, each with its component's bounded-distance decoder. A row the row
//! decoder cannot repair marks its index as an erasure for the following column pass, and a
//! column the column decoder cannot repair does the same for the next row pass. With erasures
//! a single-parity component can still fill one unknown symbol, which is what lets the product
//! of two single-parity codes correct an error neither component could correct alone.

use alloc::vec::Vec;
use core::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tc_code::{CodeError, LinearCode};
use tc_field::Fq;
use tc_matrix::Matrix;
use tc_matrix::dense::RowMajorMatrix;
use tc_maybe_rayon::prelude::*;
use tracing::{debug, instrument, trace};

use crate::product::satisfies;
use crate::{CodeMatrix, DecodeFailure, DecoderConfig, TensorCodeError, TensorProductCode};

/// How decoding ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecodeStatus {
    /// Every row and column is a codeword.
    Converged,
    /// A full pass changed no symbol and handed the next pass the same erasures as before.
    Stalled,
    /// The configured number of passes ran out.
    IterationCap,
}

impl fmt::Display for DecodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Converged => "converged",
            Self::Stalled => "stalled",
            Self::IterationCap => "hit the iteration cap",
        })
    }
}

/// A successful decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// The repaired matrix. It is a codeword iff `residual_violations == 0`; otherwise it is the
    /// candidate with the fewest violations seen, accepted because the caller allowed that many.
    pub matrix: CodeMatrix,
    pub passes: usize,
    pub residual_violations: usize,
    pub status: DecodeStatus,
}

impl Decoded {
    #[must_use]
    pub const fn is_codeword(&self) -> bool {
        self.residual_violations == 0
    }
}

/// The outcome of decoding a well-formed word: a repaired matrix, or a [`DecodeFailure`].
pub type DecodeResult = Result<Decoded, DecodeFailure>;

/// What a component decoder did with one row or column.
enum Repair {
    Clean,
    Fixed(Vec<Fq>),
    Failed,
}

impl TensorProductCode {
    /// [`decode_with_config`](Self::decode_with_config) with the default [`DecoderConfig`].
    pub fn decode(
        &self,
        received: &CodeMatrix,
        max_violations: usize,
    ) -> Result<DecodeResult, TensorCodeError> {
        self.decode_with_config(received, max_violations, &DecoderConfig::default())
    }

    /// Best-effort iterative decoding.
    ///
    /// A `received` word that is already a codeword comes back unchanged after zero passes.
    /// Otherwise passes repeat until the matrix is a codeword, a pass changes neither the matrix
    /// nor the columns it hands on as erasures, or `config.max_passes` passes have run. In the
    /// last two cases the candidate with the fewest violated rows plus columns is returned if
    /// that count is at most `max_violations`, and a [`DecodeFailure`] otherwise.
    ///
    /// The outer `Result` carries faults in the input (wrong shape, symbols outside the field).
    #[instrument(level = "debug", skip_all, fields(shape = %self.shape(), max_violations))]
    pub fn decode_with_config(
        &self,
        received: &CodeMatrix,
        max_violations: usize,
        config: &DecoderConfig,
    ) -> Result<DecodeResult, TensorCodeError> {
        self.check_word(received)?;

        let mut current = received.as_row_major().clone();
        let initial = self.violations_unchecked(&current).count();
        if initial == 0 {
            return Ok(Ok(Decoded {
                matrix: received.clone(),
                passes: 0,
                residual_violations: 0,
                status: DecodeStatus::Converged,
            }));
        }

        let mut best = (current.clone(), initial);
        let mut failed_columns = Vec::new();
        let mut passes = 0;

        let status = loop {
            if passes == config.max_passes {
                break DecodeStatus::IterationCap;
            }
            passes += 1;

            let (rows_changed, failed_rows) = self.row_pass(&mut current, &failed_columns)?;
            let (columns_changed, failed) = self.column_pass(&mut current, &failed_rows)?;
            let erasures_changed = failed != failed_columns;
            failed_columns = failed;

            let violations = self.violations_unchecked(&current).count();
            trace!(
                passes,
                violations,
                failed_rows = failed_rows.len(),
                failed_columns = failed_columns.len()
            );
            if violations < best.1 {
                best = (current.clone(), violations);
            }
            if violations == 0 {
                break DecodeStatus::Converged;
            }
            if !rows_changed && !columns_changed && !erasures_changed {
                break DecodeStatus::Stalled;
            }
        };

        let (matrix, residual_violations) = best;
        debug!(%status, passes, residual_violations);
        if residual_violations > max_violations {
            return Ok(Err(DecodeFailure {
                status,
                violations: residual_violations,
                max_violations,
                passes,
            }));
        }
        Ok(Ok(Decoded {
            matrix: matrix.into(),
            passes,
            residual_violations,
            status,
        }))
    }

    /// Decodes every violated row against the row code. Returns whether any row changed and the
    /// rows that could not be repaired.
    fn row_pass(
        &self,
        m: &mut RowMajorMatrix<Fq>,
        erased_columns: &[usize],
    ) -> Result<(bool, Vec<usize>), CodeError> {
        let repairs = (0..m.height())
            .into_par_iter()
            .map(|i| repair(self.row_code(), m.row_slice(i), erased_columns))
            .collect::<Result<Vec<_>, _>>()?;

        let mut changed = false;
        let mut failed = Vec::new();
        for (i, r) in repairs.into_iter().enumerate() {
            match r {
                Repair::Clean => {}
                Repair::Fixed(row) => {
                    m.row_mut(i).copy_from_slice(&row);
                    changed = true;
                }
                Repair::Failed => failed.push(i),
            }
        }
        Ok((changed, failed))
    }

    /// Decodes every violated column against the column code.
    fn column_pass(
        &self,
        m: &mut RowMajorMatrix<Fq>,
        erased_rows: &[usize],
    ) -> Result<(bool, Vec<usize>), CodeError> {
        let repairs = (0..m.width())
            .into_par_iter()
            .map(|j| repair(self.column_code(), &m.column(j), erased_rows))
            .collect::<Result<Vec<_>, _>>()?;

        let mut changed = false;
        let mut failed = Vec::new();
        for (j, r) in repairs.into_iter().enumerate() {
            match r {
                Repair::Clean => {}
                Repair::Fixed(column) => {
                    for (row, x) in m.rows_mut().zip_eq(column) {
                        row[j] = x;
                    }
                    changed = true;
                }
                Repair::Failed => failed.push(j),
            }
        }
        Ok((changed, failed))
    }
}

/// Runs `code`'s decoder on a violated `word`, first with the hinted erasures and then, if that
/// fails, without them.
fn repair(code: &LinearCode, word: &[Fq], erasures: &[usize]) -> Result<Repair, CodeError> {
    if satisfies(code, word) {
        return Ok(Repair::Clean);
    }
    let mut decoded = None;
    if !erasures.is_empty() {
        decoded = code.decode_with_erasures(word, erasures)?;
    }
    if decoded.is_none() {
        decoded = code.decode(word)?;
    }
    Ok(match decoded {
        Some(c) if c.as_slice() != word => Repair::Fixed(c),
        Some(_) | None => Repair::Failed,
    })
}
