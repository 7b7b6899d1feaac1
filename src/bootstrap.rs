//! First-run materialization of the bundled seed data.
//!
//! The database and the upload directory live in a writable work directory.
//! Seed data is only ever copied into place when the target is missing, so
//! running the bootstrap on every start never clobbers user data.

use std::path::{Path, PathBuf};
use anyhow::Context;
use include_dir::{include_dir, Dir};
use tracing::{info, warn};

pub const DATABASE_FILENAME: &str = "database.db";
pub const UPLOADS_DIRNAME: &str = "uploads";

static SEED_DATABASE: &[u8] = include_bytes!("../seed/database.db");
static SEED_UPLOADS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/seed/uploads");

#[derive(Debug, Clone, Copy)]
pub struct Seed<'a> {
    pub database: &'a [u8],
    pub uploads: &'a Dir<'a>,
}

impl Seed<'static> {
    /// Seed data compiled into the binary.
    pub fn bundled() -> Self {
        Self {
            database: SEED_DATABASE,
            uploads: &SEED_UPLOADS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub workdir: PathBuf,
    pub db_path: PathBuf,
    pub upload_dir: PathBuf,
}

pub fn bootstrap(workdir: &Path, seed: &Seed<'_>) -> anyhow::Result<StoragePaths> {
    info!("workdir: {}", workdir.display());
    let db_path = ensure_database(workdir, seed)?;
    let upload_dir = ensure_uploads(workdir, seed)?;
    Ok(StoragePaths {
        workdir: workdir.to_path_buf(),
        db_path,
        upload_dir,
    })
}

pub fn ensure_database(workdir: &Path, seed: &Seed<'_>) -> anyhow::Result<PathBuf> {
    if !workdir.exists() {
        std::fs::create_dir_all(workdir)
            .with_context(|| format!("failed to create workdir {}", workdir.display()))?;
    }
    if !workdir.is_dir() {
        anyhow::bail!("workdir {} is not a directory", workdir.display());
    }

    let db_path = workdir.join(DATABASE_FILENAME);
    if db_path.exists() && !db_path.is_file() {
        anyhow::bail!("db_path {} is not a file", db_path.display());
    }
    if !db_path.exists() {
        std::fs::write(&db_path, seed.database)
            .with_context(|| format!("failed to extract seed database to {}", db_path.display()))?;
        info!("seed database extracted to {}", db_path.display());
    }
    Ok(db_path)
}

pub fn ensure_uploads(workdir: &Path, seed: &Seed<'_>) -> anyhow::Result<PathBuf> {
    let upload_dir = workdir.join(UPLOADS_DIRNAME);
    if !upload_dir.exists() {
        std::fs::create_dir_all(&upload_dir)
            .with_context(|| format!("failed to create upload dir {}", upload_dir.display()))?;
    }
    if !upload_dir.is_dir() {
        anyhow::bail!("upload dir {} is not a directory", upload_dir.display());
    }

    for file in seed.uploads.files() {
        let Some(file_name) = file.path().file_name() else {
            continue;
        };
        let destination = upload_dir.join(file_name);
        if destination.exists() {
            continue;
        }
        match std::fs::write(&destination, file.contents()) {
            Ok(()) => info!("seed file extracted to {}", destination.display()),
            Err(e) => warn!("failed to extract seed file {}: {}", destination.display(), e),
        }
    }
    Ok(upload_dir)
}

#[cfg(test)]
mod tests {
    use include_dir::{DirEntry, File};
    use super::*;

    static TEST_UPLOADS: Dir<'static> = Dir::new("", &[
        DirEntry::File(File::new("1_sunset.svg", b"<svg/>")),
        DirEntry::File(File::new("1_beach.jpg", b"seed beach")),
    ]);

    fn test_seed() -> Seed<'static> {
        Seed {
            database: b"seed database",
            uploads: &TEST_UPLOADS,
        }
    }

    #[test]
    fn test_first_run_extracts_seed() {
        let tmp = tempfile::tempdir().unwrap();
        let workdir = tmp.path().join("nested").join("album-server");

        let paths = bootstrap(&workdir, &test_seed()).unwrap();

        assert_eq!(paths.db_path, workdir.join("database.db"));
        assert_eq!(paths.upload_dir, workdir.join("uploads"));
        assert_eq!(std::fs::read(&paths.db_path).unwrap(), b"seed database");
        assert_eq!(std::fs::read(paths.upload_dir.join("1_sunset.svg")).unwrap(), b"<svg/>");
        assert_eq!(std::fs::read(paths.upload_dir.join("1_beach.jpg")).unwrap(), b"seed beach");
    }

    #[test]
    fn test_existing_files_are_not_overwritten() {
        let tmp = tempfile::tempdir().unwrap();
        let workdir = tmp.path();
        std::fs::write(workdir.join("database.db"), b"user database").unwrap();
        std::fs::create_dir_all(workdir.join("uploads")).unwrap();
        std::fs::write(workdir.join("uploads").join("1_beach.jpg"), b"user beach").unwrap();

        let paths = bootstrap(workdir, &test_seed()).unwrap();

        assert_eq!(std::fs::read(&paths.db_path).unwrap(), b"user database");
        assert_eq!(std::fs::read(paths.upload_dir.join("1_beach.jpg")).unwrap(), b"user beach");
        assert_eq!(std::fs::read(paths.upload_dir.join("1_sunset.svg")).unwrap(), b"<svg/>");
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let first = bootstrap(tmp.path(), &test_seed()).unwrap();
        std::fs::write(&first.db_path, b"changed").unwrap();

        let second = bootstrap(tmp.path(), &test_seed()).unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::read(&second.db_path).unwrap(), b"changed");
        assert_eq!(std::fs::read_dir(&second.upload_dir).unwrap().count(), 2);
    }

    #[test]
    fn test_db_path_must_be_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("database.db")).unwrap();
        assert!(ensure_database(tmp.path(), &test_seed()).is_err());
    }

    #[test]
    fn test_upload_dir_must_be_a_directory() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("uploads"), b"not a dir").unwrap();
        assert!(ensure_uploads(tmp.path(), &test_seed()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_seed_file_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let upload_dir = tmp.path().join("uploads");
        std::fs::create_dir_all(&upload_dir).unwrap();
        std::os::unix::fs::symlink(
            tmp.path().join("missing").join("1_sunset.svg"),
            upload_dir.join("1_sunset.svg"),
        ).unwrap();

        let result = ensure_uploads(tmp.path(), &test_seed());

        assert_eq!(result.unwrap(), upload_dir);
        assert_eq!(std::fs::read(upload_dir.join("1_beach.jpg")).unwrap(), b"seed beach");
        assert!(!tmp.path().join("missing").exists());
    }

    #[test]
    fn test_bundled_seed_database_is_present() {
        assert!(!Seed::bundled().database.is_empty());
    }
}
