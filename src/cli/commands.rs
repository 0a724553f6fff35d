// CLI command implementations
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tagsniff::{AudioFile, FieldMap, Metadata, ParseOptions, TagFormat};

use crate::cli::config::Reader;
use crate::cli::{CliError, CliResult, OutputFormatter};

/// Expand glob patterns; plain paths are passed through untouched
pub fn expand_files(patterns: &[String]) -> CliResult<Vec<PathBuf>> {
    if patterns.is_empty() {
        return Err(CliError::NoFiles);
    }

    let mut files = Vec::new();
    for pattern in patterns {
        if !pattern.contains(['*', '?', '[']) {
            files.push(PathBuf::from(pattern));
            continue;
        }

        let before = files.len();
        for entry in glob::glob(pattern)? {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(e) => log::warn!("Error reading path: {}", e),
            }
        }
        if files.len() == before {
            log::warn!("No files found matching {}", pattern);
        }
    }

    Ok(files)
}

/// Decode one file with the chosen reader
pub fn read_file(path: &Path, reader: Reader, options: &ParseOptions) -> CliResult<Metadata> {
    let audio = AudioFile::open(path)?;
    log::debug!("{}: detected {}", path.display(), audio.file_type);

    let (file_type, fields): (TagFormat, FieldMap) = match reader {
        Reader::Auto => return Ok(audio.read_metadata(options)?),
        Reader::Ogg => (
            TagFormat::Ogg,
            tagsniff::parse_ogg_with(audio.buffer(), options)?,
        ),
        Reader::Id3 => (
            audio.file_type,
            tagsniff::parse_id3_with(audio.buffer(), options)?,
        ),
        Reader::Id3v1 => (TagFormat::Id3v1, tagsniff::parse_id3v1(audio.buffer())?),
        Reader::Id3v2 => (
            TagFormat::Id3v2,
            tagsniff::parse_id3v2_with(audio.buffer(), options)?,
        ),
    };

    Ok(Metadata {
        file_type: file_type.to_string(),
        version: audio.version().unwrap_or_default(),
        fields,
    })
}

/// Read metadata from files
///
/// Returns the number of files that failed.
pub fn command_read(
    files: &[String],
    reader: Reader,
    output: Option<&str>,
    options: &ParseOptions,
    formatter: &OutputFormatter,
) -> CliResult<usize> {
    let paths = expand_files(files)?;

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout()),
    };

    let mut failures = 0;
    for path in &paths {
        match read_file(path, reader, options) {
            Ok(metadata) => {
                let mut value = json!({ "path": path.display().to_string() });
                if let (Some(obj), Value::Object(rest)) =
                    (value.as_object_mut(), serde_json::to_value(&metadata)?)
                {
                    obj.extend(rest);
                }
                formatter.output_metadata(&value, &mut writer)?;
            }
            Err(e) => {
                formatter.print_error(&format!("{}: {}", path.display(), e));
                failures += 1;
            }
        }
    }
    writer.flush()?;

    if paths.len() > 1 {
        formatter.print_info(&format!(
            "Completed: {} successful, {} errors",
            paths.len() - failures,
            failures
        ));
    }

    Ok(failures)
}

/// Detect tag format
pub fn command_detect(files: &[String], formatter: &OutputFormatter) -> CliResult<usize> {
    let mut failures = 0;
    for path in expand_files(files)? {
        match AudioFile::open(&path) {
            Ok(audio) => {
                formatter.print_info(&format!(
                    "{}: {} (version: {})",
                    path.display(),
                    audio.file_type,
                    audio.version().unwrap_or_else(|| "N/A".to_string())
                ));
            }
            Err(e) => {
                formatter.print_error(&format!("{}: {}", path.display(), e));
                failures += 1;
            }
        }
    }

    Ok(failures)
}
