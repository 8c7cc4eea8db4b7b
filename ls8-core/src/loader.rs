use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("cannot read program '{0}'")]
    Unreadable(String, #[source] io::Error),
    #[error("no instructions found in '{0}'")]
    Empty(String),
}

pub type Result<T> = std::result::Result<T, LoaderError>;

/// Reads a text-encoded program image: one base-2 instruction byte per line,
/// with `#` starting a comment. Lines that do not parse as base-2 (blank
/// lines, comment-only lines) are skipped.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .map_err(|err| LoaderError::Unreadable(path.display().to_string(), err))?;
    let image = parse(&source);
    if image.is_empty() {
        return Err(LoaderError::Empty(path.display().to_string()));
    }
    tracing::info!("loaded {} instruction bytes from '{}'", image.len(), path.display());
    Ok(image)
}

pub fn parse(source: &str) -> Vec<u8> {
    source
        .lines()
        .filter_map(|line| {
            let text = line.split('#').next().unwrap_or("").trim();
            u8::from_str_radix(text, 2).ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let source = "\
# print8.ls8

10000010 # LDI R0,8
00000000
00001000
01000111 # PRN R0
00000000
00000001 # HLT
";
        assert_eq!(
            parse(source),
            vec![0b10000010, 0, 0b00001000, 0b01000111, 0, 0b00000001]
        );
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let source = "10000010\nnot a byte\n102\n111111111\n00000001\n";
        assert_eq!(parse(source), vec![0b10000010, 0b00000001]);
    }

    #[test]
    fn test_parse_empty_source() {
        assert!(parse("# only a comment\n\n").is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let result = load("no/such/program.ls8");
        assert!(matches!(result, Err(LoaderError::Unreadable(_, _))));
    }

    #[test]
    fn test_load_sample_program() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/print8.ls8");
        let image = load(path).unwrap();
        assert_eq!(
            image,
            vec![0b10000010, 0, 0b00001000, 0b01000111, 0, 0b00000001]
        );
    }
}
