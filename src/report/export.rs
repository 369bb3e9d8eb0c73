// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/tankwatch-rs

//! Report file export

use anyhow::{anyhow, Result};
use chrono::Utc;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use super::{ExportFormat, ReportSnapshot};

/// Writes report snapshots into a directory
pub struct ReportExporter {
    path: PathBuf,
    format: ExportFormat,
}

impl ReportExporter {
    pub fn new(path: impl Into<PathBuf>, format: ExportFormat) -> Result<Self> {
        let path = path.into();

        // Create directory if it doesn't exist
        std::fs::create_dir_all(&path)?;

        Ok(Self { path, format })
    }

    /// Write one report file and return its path
    pub fn export(&self, report: &ReportSnapshot) -> Result<PathBuf> {
        let filename = self.report_filename();
        let file = File::create(&filename)
            .map_err(|e| anyhow!("Failed to create report file {:?}: {}", filename, e))?;
        let mut writer = BufWriter::new(file);

        match self.format {
            ExportFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, report)?;
                writeln!(writer)?;
            }
            ExportFormat::Csv => write_csv(&mut writer, report)?,
        }

        writer.flush()?;
        info!(
            "Exported report with {} readings to {:?}",
            report.readings.len(),
            filename
        );
        Ok(filename)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn report_filename(&self) -> PathBuf {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S_%3f");
        self.path
            .join(format!("report_{}.{}", timestamp, self.format.extension()))
    }
}

fn write_csv<W: Write>(writer: &mut W, report: &ReportSnapshot) -> Result<()> {
    writeln!(writer, "timestamp,level,flow,ph,quality,potable")?;

    for r in &report.readings {
        let ph = r.ph.map(|v| format!("{:.1}", v)).unwrap_or_default();
        let quality = r.quality.map(|q| q.to_string()).unwrap_or_default();
        let potable = r.potable.map(|p| p.to_string()).unwrap_or_default();
        writeln!(
            writer,
            "{},{},{:.2},{},{},{}",
            r.timestamp.to_rfc3339(),
            r.level,
            r.flow,
            ph,
            quality,
            potable
        )?;
    }

    Ok(())
}
