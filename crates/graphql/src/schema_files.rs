use std::collections::HashSet;
use std::path::PathBuf;
use walkdir::WalkDir;

/// The GraphQL files found at or under a set of input paths.
#[derive(Debug, Default)]
pub(crate) struct SchemaFiles {
    pub errors: Vec<walkdir::Error>,
    pub file_paths: Vec<PathBuf>,
    pub num_skipped_files: usize,
}

/// Recursively collects files whose extension is one of `graphql_file_exts`.
///
/// If exactly one path is given, it is a file, and nothing else matched, the
/// file is used regardless of its extension: the user named it explicitly.
pub(crate) fn collect_schema_files(
    file_or_dir_paths: &[PathBuf],
    graphql_file_exts: &[String],
) -> SchemaFiles {
    // Normalize to bare extensions (no leading `.`) to compare against
    // `Path::extension()`.
    let graphql_file_exts: HashSet<&str> =
        graphql_file_exts.iter()
            .map(|ext| ext.trim_start_matches('.'))
            .collect();

    log::debug!("Scanning {} input paths...", file_or_dir_paths.len());
    let mut result = SchemaFiles::default();
    for path in file_or_dir_paths {
        for entry in WalkDir::new(path.as_path()).follow_links(true).sort_by_file_name() {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if !entry.file_type().is_file() {
                        log::trace!("Skipping non-file: {path:#?}.");
                        continue;
                    }

                    let has_graphql_ext = path.extension()
                        .map(|ext| ext.to_string_lossy())
                        .is_some_and(|ext| graphql_file_exts.contains(&*ext));
                    if has_graphql_ext {
                        log::trace!("Found GraphQL file at {path:#?}.");
                        result.file_paths.push(path.to_path_buf());
                    } else {
                        log::trace!("Skipping non-graphql file at {path:#?}.");
                        result.num_skipped_files += 1;
                    }
                },

                Err(e) => {
                    log::trace!(
                        "Encountered an error while iterating recursive \
                        filesystem entities at/under {path:#?}."
                    );
                    result.errors.push(e);
                },
            }
        }
    }

    if result.file_paths.is_empty()
        && let [only_path] = file_or_dir_paths
        && only_path.is_file() {
        log::warn!(
            "Proceeding with {only_path:#?} even though it doesn't match any \
            of the --graphql-file-exts ({}).",
            graphql_file_exts.iter()
                .map(|ext| format!("`.{ext}`"))
                .collect::<Vec<_>>()
                .join(", "),
        );
        result.num_skipped_files = result.num_skipped_files.saturating_sub(1);
        result.file_paths.push(only_path.to_path_buf());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts() -> Vec<String> {
        vec!["graphql".to_string(), ".graphqls".to_string()]
    }

    #[test]
    fn collects_files_recursively_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("a.graphql"), "type Query").unwrap();
        std::fs::write(dir.path().join("nested/b.graphqls"), "type User").unwrap();
        std::fs::write(dir.path().join("notes.md"), "# notes").unwrap();

        let found = collect_schema_files(&[dir.path().to_path_buf()], &exts());

        assert!(found.errors.is_empty());
        assert_eq!(found.file_paths, vec![
            dir.path().join("a.graphql"),
            dir.path().join("nested/b.graphqls"),
        ]);
        assert_eq!(found.num_skipped_files, 1);
    }

    #[test]
    fn single_explicit_file_is_used_regardless_of_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.txt");
        std::fs::write(&path, "type Query").unwrap();

        let found = collect_schema_files(&[path.clone()], &exts());

        assert_eq!(found.file_paths, vec![path]);
        assert_eq!(found.num_skipped_files, 0);
    }

    #[test]
    fn missing_path_is_reported() {
        let dir = tempfile::tempdir().unwrap();

        let found = collect_schema_files(&[dir.path().join("missing")], &exts());

        assert!(found.file_paths.is_empty());
        assert_eq!(found.errors.len(), 1);
    }
}
