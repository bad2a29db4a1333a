//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! The snapshot file is the storage layer here: commands load it in full,
//! hand the records to `ordex-core`, and print the returned mapping. Only
//! with `--write` do they apply the mapping and persist the result. The
//! core itself never sees the file.

use ordex_core::{
    OrdexError, Position, PositionMap, Record, RecordId, Reindexer,
    primitives::MAX_SNAPSHOT_LENGTH,
};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum snapshot file size (10 MB).
///
/// This prevents memory exhaustion from malicious or accidental large files.
const MAX_SNAPSHOT_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), OrdexError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| OrdexError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(OrdexError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate an input file path.
///
/// This function:
/// 1. Canonicalizes the path to resolve symlinks and ".."
/// 2. Ensures the path exists
/// 3. Ensures the path is a file (not a directory)
fn validate_file_path(path: &Path) -> Result<PathBuf, OrdexError> {
    // Canonicalize resolves "..", symlinks, and validates existence
    let canonical = path
        .canonicalize()
        .map_err(|e| OrdexError::IoError(format!("Invalid file path '{}': {}", path.display(), e)))?;

    // Ensure it's a file, not a directory
    if !canonical.is_file() {
        return Err(OrdexError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate an output file path.
///
/// For output files, the parent directory must exist; the file itself may
/// not exist yet.
fn validate_output_path(path: &Path) -> Result<PathBuf, OrdexError> {
    // Get parent directory
    let parent = path.parent().unwrap_or(Path::new("."));
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };

    // Canonicalize parent to resolve ".." and symlinks
    let canonical_parent = parent.canonicalize().map_err(|e| {
        OrdexError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    // Ensure parent is a directory
    if !canonical_parent.is_dir() {
        return Err(OrdexError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    // Return the path with canonical parent + original filename
    let filename = path
        .file_name()
        .ok_or_else(|| OrdexError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// SNAPSHOT I/O
// =============================================================================

/// Load a snapshot file in the given format.
pub fn load_snapshot(path: &Path, format: &str) -> Result<Vec<Record>, OrdexError> {
    let validated_path = validate_file_path(path)?;

    // Validate file size before reading to prevent DoS
    validate_file_size(&validated_path, MAX_SNAPSHOT_FILE_SIZE)?;

    let contents = std::fs::read(&validated_path)
        .map_err(|e| OrdexError::IoError(format!("Read snapshot: {}", e)))?;

    let records = match format {
        "json" => serde_json::from_slice::<Vec<Record>>(&contents)
            .map_err(|e| OrdexError::SerializationError(format!("Parse snapshot: {}", e)))?,
        "text" => parse_text_snapshot(&contents)?,
        _ => {
            return Err(OrdexError::SerializationError(format!(
                "Unknown format: {}. Use: json, text",
                format
            )));
        }
    };

    // Validate record count to prevent DoS
    if records.len() > MAX_SNAPSHOT_LENGTH {
        return Err(OrdexError::SnapshotTooLarge {
            len: records.len(),
            max: MAX_SNAPSHOT_LENGTH,
        });
    }

    Ok(records)
}

/// Save a snapshot file in the given format.
pub fn save_snapshot(path: &Path, format: &str, records: &[Record]) -> Result<(), OrdexError> {
    let validated_output = validate_output_path(path)?;

    let data = match format {
        "json" => serde_json::to_vec_pretty(records)
            .map_err(|e| OrdexError::SerializationError(e.to_string()))?,
        "text" => {
            let mut out = String::new();
            for record in records {
                match record.position {
                    Some(pos) => out.push_str(&format!("{}:{}\n", record.id, pos)),
                    None => out.push_str(&format!("{}\n", record.id)),
                }
            }
            out.into_bytes()
        }
        _ => {
            return Err(OrdexError::SerializationError(format!(
                "Unknown format: {}. Use: json, text",
                format
            )));
        }
    };

    std::fs::write(&validated_output, &data)
        .map_err(|e| OrdexError::IoError(format!("Write snapshot: {}", e)))?;

    Ok(())
}

/// Parse the line-oriented text format: `id` or `id:position` per line.
fn parse_text_snapshot(contents: &[u8]) -> Result<Vec<Record>, OrdexError> {
    let text = String::from_utf8_lossy(contents);
    let mut records = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.split_once(':') {
            Some((id, pos)) => {
                let id: u64 = id.trim().parse().map_err(|_| {
                    OrdexError::SerializationError(format!("Invalid record id: {}", line))
                })?;
                let pos: u64 = pos.trim().parse().map_err(|_| {
                    OrdexError::SerializationError(format!("Invalid position: {}", line))
                })?;
                records.push(Record::new(RecordId(id), Position::new(pos)));
            }
            None => {
                let id: u64 = line.parse().map_err(|_| {
                    OrdexError::SerializationError(format!("Invalid record id: {}", line))
                })?;
                records.push(Record::unpositioned(RecordId(id)));
            }
        }
    }

    Ok(records)
}

// =============================================================================
// SHOW COMMAND
// =============================================================================

/// Derive and print the current order of the snapshot.
pub fn cmd_show(file: &Path, format: &str, json_mode: bool) -> Result<(), OrdexError> {
    let records = load_snapshot(file, format)?;
    let ordered = Reindexer::order(&records)?;

    if json_mode {
        let output = serde_json::json!({
            "file": file.to_string_lossy(),
            "record_count": records.len(),
            "order": ordered.iter().map(|r| r.id.0).collect::<Vec<_>>(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Ordex Snapshot Order");
    println!("====================");
    println!("File:    {:?}", file);
    println!("Records: {}", records.len());
    println!();
    for (index, record) in ordered.iter().enumerate() {
        match record.position {
            Some(pos) => println!("  {:>4}  id {} (stored {})", index, record.id, pos),
            None => println!("  {:>4}  id {} (unpositioned)", index, record.id),
        }
    }

    Ok(())
}

// =============================================================================
// MOVE COMMAND
// =============================================================================

/// Compute the mapping that moves a record, optionally applying it.
pub fn cmd_move(
    file: &Path,
    format: &str,
    json_mode: bool,
    id: u64,
    to: usize,
    write: bool,
) -> Result<(), OrdexError> {
    tracing::info!("Computing move of record {} to index {}", id, to);

    let mut records = load_snapshot(file, format)?;
    let map = Reindexer::compute_move(&records, &RecordId(id), to)?;

    print_mapping(&map, json_mode);

    if write {
        map.apply(&mut records);
        save_snapshot(file, format, &records)?;
        tracing::info!("Applied mapping to {:?}", file);
        if !json_mode {
            println!();
            println!("Applied {} position updates to {:?}", map.len(), file);
        }
    }

    Ok(())
}

// =============================================================================
// REMOVE COMMAND
// =============================================================================

/// Compute the mapping that removes a record, optionally applying it.
pub fn cmd_remove(
    file: &Path,
    format: &str,
    json_mode: bool,
    id: u64,
    write: bool,
) -> Result<(), OrdexError> {
    tracing::info!("Computing removal of record {}", id);

    let mut records = load_snapshot(file, format)?;
    let map = Reindexer::compute_remove(&records, &RecordId(id))?;

    print_mapping(&map, json_mode);

    if write {
        // The mapping covers the survivors; dropping the record is the
        // storage layer's half of the operation
        map.apply(&mut records);
        records.retain(|r| r.id != RecordId(id));
        save_snapshot(file, format, &records)?;
        tracing::info!("Removed record {} and applied mapping to {:?}", id, file);
        if !json_mode {
            println!();
            println!(
                "Removed record {}, applied {} position updates to {:?}",
                id,
                map.len(),
                file
            );
        }
    }

    Ok(())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Diagnose the stored positions of a snapshot.
pub fn cmd_check(file: &Path, format: &str, json_mode: bool) -> Result<(), OrdexError> {
    let records = load_snapshot(file, format)?;

    // Duplicate identities are a contract violation, not a diagnostic
    Reindexer::validate(&records)?;

    let missing = records.iter().filter(|r| r.position.is_none()).count();
    let stored: PositionMap<RecordId> = records
        .iter()
        .filter_map(|r| r.position.map(|pos| (r.id, pos)))
        .collect();
    let dense = missing == 0 && stored.is_dense();

    if json_mode {
        let output = serde_json::json!({
            "file": file.to_string_lossy(),
            "record_count": records.len(),
            "unpositioned": missing,
            "dense": dense,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Ordex Snapshot Check");
    println!("====================");
    println!("File:          {:?}", file);
    println!("Records:       {}", records.len());
    println!("Unpositioned:  {}", missing);
    println!(
        "Stored order:  {}",
        if dense {
            "dense (0..N-1)"
        } else {
            "NOT dense - a move or remove will relabel"
        }
    );

    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Initialize a new snapshot file.
pub fn cmd_init(file: &Path, format: &str, force: bool, count: usize) -> Result<(), OrdexError> {
    if file.exists() && !force {
        return Err(OrdexError::IoError(
            "Snapshot already exists. Use --force to overwrite.".to_string(),
        ));
    }

    let records: Vec<Record> = (0..count)
        .map(|i| Record::new(RecordId(i as u64), Position::new(i as u64)))
        .collect();

    save_snapshot(file, format, &records)?;
    println!("Initialized snapshot with {} records at {:?}", count, file);

    Ok(())
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Print a computed mapping, position-ordered in text mode.
fn print_mapping(map: &PositionMap<RecordId>, json_mode: bool) {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(map).unwrap_or_default()
        );
        return;
    }

    let mut entries: Vec<(Position, RecordId)> =
        map.iter().map(|(id, pos)| (pos, *id)).collect();
    entries.sort_unstable();

    println!("Computed mapping ({} records):", map.len());
    for (pos, id) in entries {
        println!("  {:>4}  id {}", pos.value(), id);
    }
}
