use crate::output_utils;
use anyhow::Context;
use gqlfrag_core::FragmentRegistry;
use gqlfrag_core::dashboard;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Where a command loads its fragment definitions from. Shared by every
/// subcommand via `#[command(flatten)]`.
#[derive(Debug, clap::Args)]
pub(crate) struct FragmentSources {
    #[arg(
        help="Also register the built-in dashboard fragments.",
        long,
    )]
    pub(crate) builtin_fragments: bool,

    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "gql".to_string(),
        ],
        help="Extensions of the fragment documents to pick up when walking a \
             directory.",
        long,
        value_delimiter = ',',
    )]
    pub(crate) graphql_file_exts: Vec<String>,

    #[arg(
        help="Fragment documents, or directories to search for them.",
        name="FILE_OR_DIR_PATHS",
        required_unless_present="builtin_fragments",
    )]
    pub(crate) file_or_dir_paths: Vec<PathBuf>,
}

#[derive(Debug)]
pub(crate) struct LoadedFragments {
    pub(crate) file_paths: Vec<PathBuf>,
    pub(crate) num_skipped_files: usize,
    pub(crate) registry: FragmentRegistry,
}

impl FragmentSources {
    /// Normalize the set of file extensions to filter with: `graphql` and
    /// `.graphql` both mean `graphql`.
    pub(crate) fn normalized_exts(&self) -> HashSet<String> {
        self.graphql_file_exts.iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect()
    }

    /// Find all GraphQL files recursively located at or under each path.
    ///
    /// Returns the matching files (canonicalized, sorted, deduplicated) and
    /// the number of files skipped for having some other extension.
    pub(crate) fn discover_files(&self) -> anyhow::Result<(Vec<PathBuf>, usize)> {
        let graphql_file_exts = self.normalized_exts();

        log::debug!(
            "Searching {} path(s) for fragment documents.",
            self.file_or_dir_paths.len(),
        );
        let mut num_skipped_files = 0;
        let mut file_paths = vec![];
        for path in &self.file_or_dir_paths {
            for entry in WalkDir::new(path.as_path()).follow_links(true) {
                let entry = entry.with_context(|| format!(
                    "Failed to scan {}",
                    path.display(),
                ))?;
                let entry_path = entry.path();
                if !entry.file_type().is_file() {
                    log::trace!("Skipping non-file: {entry_path:#?}.");
                    continue;
                }

                let has_graphql_ext = entry_path.extension()
                    .map(|ext| ext.to_string_lossy())
                    .is_some_and(|ext| graphql_file_exts.contains(&*ext));
                if has_graphql_ext {
                    log::trace!("Found GraphQL file at {entry_path:#?}.");
                    file_paths.push(canonicalize(entry_path)?);
                } else {
                    log::trace!("Skipping non-graphql file: {entry_path:#?}.");
                    num_skipped_files += 1;
                }
            }
        }

        // A single file passed explicitly is loaded even if its extension is
        // not one of `--graphql-file-exts`.
        if file_paths.is_empty()
            && self.file_or_dir_paths.len() == 1
            && let Some(first_arg_path) = self.file_or_dir_paths.first()
            && first_arg_path.is_file() {
            let canonicalized_first_arg_path = canonicalize(first_arg_path)?;
            log::warn!(
                "Proceeding to load {canonicalized_first_arg_path:#?} even \
                though it doesn't match any of the --graphql-file-exts \
                ({}).",
                sorted_exts(&graphql_file_exts),
            );
            file_paths.push(canonicalized_first_arg_path);
            num_skipped_files = 0;
        }

        file_paths.sort();
        file_paths.dedup();
        Ok((file_paths, num_skipped_files))
    }

    /// Build a registry from every discovered file (plus the built-in
    /// fragments when requested).
    ///
    /// Every document is loaded even after one fails so that all load errors
    /// are reported together.
    pub(crate) fn load(&self) -> anyhow::Result<LoadedFragments> {
        let (file_paths, num_skipped_files) = self.discover_files()?;
        log::debug!(
            "Found {} GraphQL files to load fragments from.",
            file_paths.len(),
        );

        let mut registry = FragmentRegistry::new();
        let mut errors = vec![];
        if self.builtin_fragments
            && let Err(mut builtin_errors) = dashboard::register_dashboard_fragments(&mut registry) {
            errors.append(&mut builtin_errors);
        }
        for file_path in &file_paths {
            if let Err(mut file_errors) = registry.add_from_document_file(file_path) {
                errors.append(&mut file_errors);
            }
        }

        if !errors.is_empty() {
            anyhow::bail!(
                "Failed to load fragments ({} errors):\n{}",
                errors.len(),
                output_utils::format_error_list(&errors),
            );
        }

        log::debug!("Registered {} fragments.", registry.len());
        Ok(LoadedFragments {
            file_paths,
            num_skipped_files,
            registry,
        })
    }
}

fn canonicalize(path: &Path) -> anyhow::Result<PathBuf> {
    std::fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve {}", path.display()))
}

fn sorted_exts(exts: &HashSet<String>) -> String {
    let mut exts: Vec<_> = exts.iter()
        .map(|ext| format!("`.{ext}`"))
        .collect();
    exts.sort();
    exts.join(", ")
}
