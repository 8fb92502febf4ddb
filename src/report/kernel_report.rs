use crate::core::StreamSummary;
use crate::error::EstimateError;
use crate::report::number_format::format_general;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use strum_macros::{Display, EnumString};

/// Significant digits of every floating-point value in the text report.
const DIGITS: usize = 15;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumString,
    Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ReportFormat {
    /// Commented header followed by `k, A_corrected, A_raw` rows.
    #[default]
    Tsv,
    Json,
}

/// Kernel estimate for one degree class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KernelRow {
    pub class: usize,
    /// `A[k] / (A1 * w[k])` with `A1 = A[1] / w[1]`.
    pub corrected: f64,
    /// `A[k] / A[1]`.
    pub raw: f64,
}

/// Final table produced at the end of the stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelReport {
    pub summary: StreamSummary,
    pub rows: Vec<KernelRow>,
}

impl KernelReport {
    /// Normalizes the raw accumulator `kernel` by the exposure `weights`.
    ///
    /// Classes without exposure are left out. Fails with
    /// [`EstimateError::InsufficientData`] when class 1, the reference class,
    /// has no exposure or no selections, as every row would be undefined.
    pub fn from_accumulators(
        summary: StreamSummary,
        kernel: &[f64],
        weights: &[f64],
    ) -> Result<Self, EstimateError> {
        let (Some(&a1), Some(&w1)) = (kernel.get(1), weights.get(1)) else {
            return Err(EstimateError::InsufficientData);
        };
        if w1 <= 0.0 || a1 <= 0.0 {
            return Err(EstimateError::InsufficientData);
        }
        let reference = a1 / w1;

        let rows = kernel
            .iter()
            .zip(weights)
            .enumerate()
            .skip(1)
            .filter(|&(_, (_, &w))| w > 0.0)
            .map(|(class, (&a, &w))| KernelRow {
                class,
                corrected: a / (reference * w),
                raw: a / a1,
            })
            .collect();

        Ok(Self { summary, rows })
    }

    pub fn write<W: Write>(&self, w: &mut W, fmt: ReportFormat) -> Result<(), EstimateError> {
        match fmt {
            ReportFormat::Tsv => self.write_tsv(w)?,
            ReportFormat::Json => self.write_json(w)?,
        }
        Ok(())
    }

    pub fn export<P: AsRef<Path>>(
        &self,
        path: P,
        fmt: ReportFormat,
    ) -> Result<(), EstimateError> {
        let mut w = BufWriter::new(File::create(path)?);
        self.write(&mut w, fmt)?;
        w.flush()?;
        Ok(())
    }

    pub fn write_tsv<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        write_summary_header(w, &self.summary)?;
        for row in &self.rows {
            writeln!(
                w,
                "{}\t{}\t{}",
                row.class,
                format_general(row.corrected, DIGITS),
                format_general(row.raw, DIGITS)
            )?;
        }
        Ok(())
    }

    pub fn write_json<W: Write>(&self, w: &mut W) -> Result<(), serde_json::Error> {
        serde_json::to_writer_pretty(&mut *w, self)?;
        writeln!(w).map_err(serde_json::Error::io)
    }
}

/// Writes the `#`-prefixed counter and column legend block.
///
/// Kept separate from [`KernelReport`] so the counters can still be reported
/// when the stream was too short to produce a table.
pub fn write_summary_header<W: Write>(
    w: &mut W,
    summary: &StreamSummary,
) -> std::io::Result<()> {
    writeln!(w, "# T : {}", summary.steps)?;
    writeln!(w, "# N : {}", summary.nodes)?;
    writeln!(w, "# E : {}", summary.edges)?;
    writeln!(w)?;
    writeln!(w, "# column1: k")?;
    writeln!(w, "# column2: A_k (with Thong Pham's correction)")?;
    writeln!(w, "# column3: A_k (without correction)")?;
    writeln!(w)
}
