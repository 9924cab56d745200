use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;

use reusable_huffman::{CodeTable, ReusableHuffman};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Table { corpus, output } => {
            let corpus = read_text(&corpus)?;
            let json = CodeTable::build(&corpus).to_json()?;
            match output {
                Some(output) => write_bytes(&output, json.as_bytes())?,
                None => println!("{json}"),
            }
        }
        Command::Compress { source, files } => {
            let huffman = source.load()?;
            let message = read_text(&files.input)?;
            let compressed = huffman.compress(&message)?;
            info!(
                "compressed {} bytes into {} bytes ({:.1}%)",
                message.len(),
                compressed.len(),
                ratio(compressed.len(), message.len())
            );
            write_bytes(&files.output, &compressed)?;
        }
        Command::Decompress { source, files } => {
            let huffman = source.load()?;
            let data = fs::read(&files.input)
                .with_context(|| format!("failed to read {}", files.input.display()))?;
            let message = huffman.decompress(&data)?;
            info!(
                "decompressed {} bytes into {} bytes",
                data.len(),
                message.len()
            );
            write_bytes(&files.output, message.as_bytes())?;
        }
    }

    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the code table built from a corpus as JSON
    Table {
        #[arg(long)]
        corpus: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    Compress {
        #[command(flatten)]
        source: TableSource,
        #[command(flatten)]
        files: Files,
    },
    Decompress {
        #[command(flatten)]
        source: TableSource,
        #[command(flatten)]
        files: Files,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct TableSource {
    /// Text to build the code table from
    #[arg(long)]
    corpus: Option<PathBuf>,
    /// JSON code table written by the `table` command
    #[arg(long)]
    table: Option<PathBuf>,
}

impl TableSource {
    fn load(&self) -> anyhow::Result<ReusableHuffman> {
        match (&self.corpus, &self.table) {
            (Some(corpus), _) => Ok(ReusableHuffman::new(&read_text(corpus)?)),
            (None, Some(table)) => {
                let table = CodeTable::from_json(&read_text(table)?)
                    .with_context(|| format!("failed to load {}", table.display()))?;
                Ok(ReusableHuffman::from_code_table(table))
            }
            (None, None) => anyhow::bail!("either --corpus or --table is required"),
        }
    }
}

#[derive(Args, Debug)]
struct Files {
    #[arg(short, long)]
    input: PathBuf,
    #[arg(short, long)]
    output: PathBuf,
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_bytes(path: &Path, content: &[u8]) -> anyhow::Result<()> {
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

fn ratio(compressed: usize, original: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    compressed as f64 * 100.0 / original as f64
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use reusable_huffman::CodeTable;

    use super::TableSource;

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("reusable-huffman-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_load_from_table_file() {
        let path = scratch_file("table.json");
        let json = CodeTable::build("ABBBCC").to_json().unwrap();
        fs::write(&path, json).unwrap();

        let source = TableSource {
            corpus: None,
            table: Some(path.clone()),
        };
        let huffman = source.load().unwrap();
        fs::remove_file(&path).unwrap();

        let compressed = huffman.compress("ABBBCC").unwrap();
        assert_eq!(compressed, vec![0b1010_0011, 0b1110_0000]);
        assert_eq!(huffman.decompress(&compressed).unwrap(), "ABBBCC");
    }

    #[test]
    fn test_load_from_corpus_file() {
        let path = scratch_file("corpus.txt");
        fs::write(&path, "AAAA").unwrap();

        let source = TableSource {
            corpus: Some(path.clone()),
            table: None,
        };
        let huffman = source.load().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(huffman.code_table().code('A'), Some("1"));
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let path = scratch_file("missing.json");
        let source = TableSource {
            corpus: None,
            table: Some(path.clone()),
        };
        let err = source.load().unwrap_err();
        assert_eq!(err.to_string(), format!("failed to read {}", path.display()));
    }

    #[test]
    fn test_invalid_table_file() {
        let path = scratch_file("invalid.json");
        fs::write(&path, r#"{"A":"0","B":"1"}"#).unwrap();

        let source = TableSource {
            corpus: None,
            table: Some(path.clone()),
        };
        let err = source.load().unwrap_err();
        fs::remove_file(&path).unwrap();

        assert_eq!(err.to_string(), format!("failed to load {}", path.display()));
        assert!(format!("{err:#}").contains("missing the end of transmission code"));
    }
}
