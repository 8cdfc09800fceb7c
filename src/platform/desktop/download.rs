use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rfd::FileDialog;
use tracing::info;

use crate::usecase::services::export_service::ExportDocument;

pub fn save_export(document: &ExportDocument) -> Result<Option<PathBuf>> {
    let format = document.format;
    let Some(path) = FileDialog::new()
        .set_file_name(format.file_name())
        .add_filter(format.label(), &[format.extension()])
        .save_file()
    else {
        return Ok(None);
    };

    write_export(&path, document)?;
    Ok(Some(path))
}

pub fn write_export(path: &Path, document: &ExportDocument) -> Result<()> {
    std::fs::write(path, document.contents.as_bytes())
        .with_context(|| format!("failed to write export: {}", path.display()))?;
    info!(
        path = %path.display(),
        mime = document.format.mime_type(),
        rows = document.rows,
        "export saved"
    );
    Ok(())
}

pub fn pick_import_file() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("CSV", &["csv"])
        .add_filter("All files", &["*"])
        .pick_file()
}
