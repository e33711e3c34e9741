use crate::cli::SourceArgs;
use crate::error::{CliError, CliResult};
use rdb2rdf_relational::{MemorySource, RelationalSource, Snapshot};

/// Open the relational source selected on the command line.
pub fn open_source(args: &SourceArgs) -> CliResult<Box<dyn RelationalSource>> {
    if let Some(path) = &args.snapshot {
        let snapshot = Snapshot::from_path(path).map_err(|e| {
            CliError::Input(format!("cannot load snapshot {}: {e}", path.display()))
        })?;
        return Ok(Box::new(MemorySource::new(snapshot)?));
    }
    if let Some(path) = &args.sqlite {
        return open_sqlite(path);
    }
    Err(CliError::Usage(
        "one of --snapshot or --sqlite is required".into(),
    ))
}

#[cfg(feature = "sqlite")]
fn open_sqlite(path: &std::path::Path) -> CliResult<Box<dyn RelationalSource>> {
    let source = rdb2rdf_relational::SqliteSource::open(path)?;
    Ok(Box::new(source))
}

#[cfg(not(feature = "sqlite"))]
fn open_sqlite(_path: &std::path::Path) -> CliResult<Box<dyn RelationalSource>> {
    Err(CliError::Usage(
        "this build has no SQLite support; rebuild with the `sqlite` feature".into(),
    ))
}
