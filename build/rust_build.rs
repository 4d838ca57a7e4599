/**
 * Generates protobuf types for numbering plan metadata and checks the
 * auxiliary prefix data files (carrier names, geocoding descriptions).
 */

use std::{collections::BTreeMap, fs::{self, File}, io::{BufRead, BufReader}, num::ParseIntError, path::Path};

use thiserror::Error;

#[derive(Debug, Error)]
enum BuildError {
    #[error("IO error occurred: {0}")]
    IO(#[from] std::io::Error),

    #[error("{path}: line {line_num} is too long (max is {max_len} bytes)")]
    LineTooLong { path: String, line_num: usize, max_len: usize },

    #[error("{path}: failed to parse prefix '{prefix}': {source}")]
    PrefixParseError {
        path: String,
        prefix: String,
        #[source]
        source: ParseIntError,
    },

    #[error("{path}: line {line_num} has no '|' separator")]
    MissingSeparator { path: String, line_num: usize },

    #[error("{path}: prefix {prefix} does not start with calling code {calling_code}")]
    ForeignPrefix { path: String, prefix: i64, calling_code: String },
}

fn parse_prefixes(path: &Path, prefixes: &mut BTreeMap<i64, String>) -> Result<(), BuildError> {
    prefixes.clear();

    let display_path = path.display().to_string();
    let input = File::open(path)?;
    const MAX_LINE_LENGTH: usize = 2 * 1024;

    let mut reader = BufReader::new(input);
    let mut line_buffer = String::with_capacity(MAX_LINE_LENGTH);
    let mut line_number = 0;

    loop {
        line_number += 1;
        line_buffer.clear();

        let bytes_read = reader.read_line(&mut line_buffer)?;
        if bytes_read == 0 {
            break;
        }

        if bytes_read > MAX_LINE_LENGTH {
            return Err(BuildError::LineTooLong {
                path: display_path,
                line_num: line_number,
                max_len: MAX_LINE_LENGTH,
            });
        }

        let line = line_buffer.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((prefix_str, desc)) = line.split_once('|') else {
            return Err(BuildError::MissingSeparator { path: display_path, line_num: line_number });
        };
        let prefix_code = prefix_str.parse().map_err(|e| BuildError::PrefixParseError {
            path: display_path.clone(),
            prefix: prefix_str.to_string(),
            source: e,
        })?;
        prefixes.insert(prefix_code, desc.to_string());
    }

    Ok(())
}

/// Every `<lang>/<calling code>.txt` file below `root` must hold only
/// prefixes of its own calling code.
fn check_prefix_files(root: &Path) -> Result<(), BuildError> {
    let mut prefixes = BTreeMap::new();
    for language_dir in fs::read_dir(root)? {
        let language_dir = language_dir?.path();
        if !language_dir.is_dir() {
            continue;
        }
        for file in fs::read_dir(&language_dir)? {
            let file = file?.path();
            let Some(calling_code) = file.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            parse_prefixes(&file, &mut prefixes)?;
            for prefix in prefixes.keys() {
                if !prefix.to_string().starts_with(calling_code) {
                    return Err(BuildError::ForeignPrefix {
                        path: file.display().to_string(),
                        prefix: *prefix,
                        calling_code: calling_code.to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

fn main() -> Result<(), BuildError> {
    println!("cargo:rerun-if-changed=resources");

    check_prefix_files(Path::new("resources/carrier"))?;
    check_prefix_files(Path::new("resources/geocoding"))?;

    protobuf_codegen::Codegen::new()
        .pure()
        .includes(["resources"])
        .input("resources/phonemetadata.proto")
        .input("resources/phonenumber.proto")
        .cargo_out_dir("proto_gen")
        .run_from_script();
    Ok(())
}
