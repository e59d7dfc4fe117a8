//! Deposit package assembly
//!
//! Builds the transient on-disk artifact submitted to each deposit point:
//! a working directory holding the descriptive metadata document and a zip
//! archive bundling that document with the submission's content files. One
//! package is built per dispatch run and shared across all deposit points.

use crate::core::error::PackagingError;
use crate::core::submission::Submission;
use crate::packaging::metadata::DepositMetadata;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;

/// Filename of the metadata document inside the package
pub const METADATA_FILENAME: &str = "mets.xml";

/// Filename of the deposit archive inside the package directory
pub const ARCHIVE_FILENAME: &str = "deposit.zip";

/// The transient package artifact for one dispatch run
///
/// Removed by [`DepositPackage::cleanup`] after the run, whatever the
/// per-point outcomes were.
#[derive(Debug, Clone)]
pub struct DepositPackage {
    /// Last path segment of the working directory, reported to the admin
    pub directory_name: String,
    pub dir: PathBuf,
    pub archive_path: PathBuf,
    pub metadata_path: PathBuf,
}

impl DepositPackage {
    /// Remove the package's working directory and everything in it
    pub async fn cleanup(&self) -> std::io::Result<()> {
        tokio::fs::remove_dir_all(&self.dir).await
    }
}

/// Assembles deposit packages under a scoped working directory
pub struct PackageBuilder {
    working_root: PathBuf,
    context_name: String,
}

impl PackageBuilder {
    pub fn new<P: Into<PathBuf>>(working_root: P, context_name: &str) -> Self {
        Self {
            working_root: working_root.into(),
            context_name: context_name.to_string(),
        }
    }

    /// Deterministic package directory name for a submission
    pub fn directory_name(submission: &Submission) -> String {
        format!("sword-{}-{}", submission.context_id, submission.id)
    }

    /// Build the deposit package for a submission
    ///
    /// Any failure here aborts the entire dispatch run: the package is built
    /// once and shared by every deposit point. A leftover directory from an
    /// earlier aborted run for the same submission is replaced, and a failed
    /// build removes its own partial directory before returning.
    pub async fn build(&self, submission: &Submission) -> Result<DepositPackage, PackagingError> {
        if submission.files.is_empty() {
            return Err(PackagingError::NoFiles {
                submission_id: submission.id,
            });
        }

        let directory_name = Self::directory_name(submission);
        let dir = self.working_root.join(&directory_name);
        if dir.exists() {
            tokio::fs::remove_dir_all(&dir)
                .await
                .map_err(|source| PackagingError::WorkingDirectory {
                    path: dir.clone(),
                    source,
                })?;
        }
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| PackagingError::WorkingDirectory {
                path: dir.clone(),
                source,
            })?;

        match self.populate(&dir, submission).await {
            Ok((metadata_path, archive_path)) => Ok(DepositPackage {
                directory_name,
                dir,
                archive_path,
                metadata_path,
            }),
            Err(error) => {
                // Never leave a partial package behind.
                if let Err(cleanup_error) = tokio::fs::remove_dir_all(&dir).await {
                    tracing::warn!(
                        dir = %dir.display(),
                        "failed to remove partial package directory: {cleanup_error}"
                    );
                }
                Err(error)
            }
        }
    }

    /// Write metadata and archive into a freshly created package directory
    async fn populate(
        &self,
        dir: &Path,
        submission: &Submission,
    ) -> Result<(PathBuf, PathBuf), PackagingError> {
        for file in &submission.files {
            if !file.path.exists() {
                return Err(PackagingError::MissingFile {
                    submission_id: submission.id,
                    path: file.path.clone(),
                });
            }
        }

        let metadata = DepositMetadata::from_submission(submission, &self.context_name);
        let metadata_path = dir.join(METADATA_FILENAME);
        tokio::fs::write(&metadata_path, metadata.to_xml())
            .await
            .map_err(|source| PackagingError::Metadata {
                submission_id: submission.id,
                source,
            })?;

        let archive_path = dir.join(ARCHIVE_FILENAME);
        write_archive(&archive_path, &metadata, submission)?;

        Ok((metadata_path, archive_path))
    }
}

/// Write the deposit archive: metadata document plus all content files
fn write_archive(
    archive_path: &Path,
    metadata: &DepositMetadata,
    submission: &Submission,
) -> Result<(), PackagingError> {
    let file = std::fs::File::create(archive_path).map_err(|source| {
        PackagingError::WorkingDirectory {
            path: archive_path.to_path_buf(),
            source,
        }
    })?;
    let mut zip = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(METADATA_FILENAME, options)
        .map_err(|source| PackagingError::Archive { source })?;
    zip.write_all(metadata.to_xml().as_bytes())
        .map_err(|source| PackagingError::Bundle {
            path: archive_path.to_path_buf(),
            source,
        })?;

    for content in &submission.files {
        if content.path.is_dir() {
            // A directory entry bundles every regular file beneath it,
            // keeping paths relative to the entry name.
            for entry in WalkDir::new(&content.path) {
                let entry = entry.map_err(|error| PackagingError::Bundle {
                    path: content.path.clone(),
                    source: error.into(),
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let relative = entry
                    .path()
                    .strip_prefix(&content.path)
                    .unwrap_or(entry.path());
                let entry_name = format!("{}/{}", content.name, relative.to_string_lossy());
                add_file(&mut zip, entry.path(), &entry_name, options)?;
            }
        } else {
            add_file(&mut zip, &content.path, &content.name, options)?;
        }
    }

    zip.finish()
        .map_err(|source| PackagingError::Archive { source })?;
    Ok(())
}

fn add_file(
    zip: &mut zip::ZipWriter<std::fs::File>,
    path: &Path,
    entry_name: &str,
    options: SimpleFileOptions,
) -> Result<(), PackagingError> {
    let bytes = std::fs::read(path).map_err(|source| PackagingError::Bundle {
        path: path.to_path_buf(),
        source,
    })?;
    zip.start_file(entry_name, options)
        .map_err(|source| PackagingError::Archive { source })?;
    zip.write_all(&bytes).map_err(|source| PackagingError::Bundle {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
