//! gen-chapters - Split plain text books into chapters, merge notes, and patch markup translations

mod render;

use anyhow::{Context, Result};
use chapter_text::{
    ChapterTextConfig, Document, Segmenter, TranslationPatch, merge_notes, notes_filename,
};
use clap::{Parser, Subcommand};
use log::{debug, info};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "gen-chapters")]
#[command(about = "Split plain text books into chapters, merge notes, and patch markup translations", long_about = None)]
#[command(version)]
struct Args {
    /// Enable debug output
    #[arg(short, long, default_value_t = false, global = true)]
    debug: bool,

    /// Empty lines a gap must exceed to count as a break (overrides config)
    #[arg(long, global = true)]
    break_threshold: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the paragraph/chapter structure of a text file
    Structure {
        /// Path to the text file
        file: PathBuf,

        /// Notes file (default: <file-stem><notes_suffix>.<ext> if present)
        #[arg(long)]
        notes: Option<PathBuf>,

        /// Don't merge notes even if a notes file exists
        #[arg(long, conflicts_with = "notes")]
        no_notes: bool,

        /// Print the structure as JSON
        #[arg(long)]
        json: bool,
    },
    /// List chapter titles, one per line
    Chapters {
        /// Path to the text file
        file: PathBuf,
    },
    /// Export chapter titles as an FFMETADATA1 file
    Metadata {
        /// Path to the text file
        file: PathBuf,

        /// Book title
        #[arg(long)]
        title: String,

        /// Book author
        #[arg(long, default_value = "Unknown")]
        artist: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract the translatable text of markup lines as a JSON array
    Extract {
        /// Path to the markup file
        file: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Splice translated text (JSON array, same order as extract) back into markup
    Apply {
        /// Path to the markup file
        file: PathBuf,

        /// JSON array of translated strings
        #[arg(short, long)]
        translations: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the default break threshold
    SetBreakThreshold {
        /// Empty lines a gap must exceed
        value: usize,
    },
    /// Set the notes filename suffix
    SetNotesSuffix {
        /// Suffix inserted before the extension (e.g. "_notes")
        suffix: String,
    },
    /// Restore default configuration
    Reset,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let threshold = args.break_threshold;

    match args.command {
        Commands::Config { action } => return handle_config_command(&action),
        Commands::Structure {
            file,
            notes,
            no_notes,
            json,
        } => {
            let config = load_config(threshold)?;
            let notes_path = if no_notes {
                None
            } else {
                notes.or_else(|| {
                    let candidate = notes_filename(&file, &config.notes_suffix);
                    candidate.exists().then_some(candidate)
                })
            };
            let doc = load_document(&file, notes_path.as_deref(), &config)?;
            if json {
                render::print_json(&doc)?;
            } else {
                render::print_outline(&doc)?;
            }
        }
        Commands::Chapters { file } => {
            let config = load_config(threshold)?;
            let doc = load_document(&file, None, &config)?;
            for title in doc.chapter_titles() {
                println!("{}", title);
            }
        }
        Commands::Metadata {
            file,
            title,
            artist,
            output,
        } => {
            let config = load_config(threshold)?;
            let doc = load_document(&file, None, &config)?;
            let chapters = doc.chapter_titles();
            if chapters.is_empty() {
                eprintln!("No chapter titles found in {}", file.display());
            }
            match output {
                Some(path) => {
                    chapter_text::write_ffmetadata(&title, &artist, &chapters, &path)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    eprintln!("Wrote {} chapter(s) to {}", chapters.len(), path.display());
                }
                None => print!("{}", chapter_text::ffmetadata(&title, &artist, &chapters)),
            }
        }
        Commands::Extract { file, output } => {
            let mut patch = load_patch(&file)?;
            patch.decorate();
            let content = patch.source_content();
            info!("Extracted {} translatable line(s)", content.len());
            render::write_json(&content, output.as_deref())?;
        }
        Commands::Apply {
            file,
            translations,
            output,
        } => {
            let mut patch = load_patch(&file)?;
            patch.decorate();

            patch
                .add_translated_json(open(&translations)?)
                .with_context(|| format!("Failed to parse {}", translations.display()))?;

            render::write_patch(patch, output.as_deref())?;
        }
    }

    Ok(())
}

/// Load saved configuration, applying the command-line threshold override.
fn load_config(break_threshold: Option<usize>) -> Result<ChapterTextConfig> {
    let mut config = ChapterTextConfig::load().context("Failed to load configuration")?;
    if let Some(threshold) = break_threshold {
        config.break_threshold = threshold;
    }
    debug!("Using {:?}", config);
    Ok(config)
}

/// Segment `path`, merging `notes` into it when given.
fn load_document(
    path: &Path,
    notes: Option<&Path>,
    config: &ChapterTextConfig,
) -> Result<Document> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let segmenter = Segmenter::from_config(config);
    let doc = segmenter
        .segment_reader(open(path)?)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    eprintln!(
        "{}: {} element(s), {} chapter(s)",
        path.display(),
        doc.len(),
        doc.chapter_titles().len()
    );

    let Some(notes_path) = notes else {
        return Ok(doc);
    };

    let notes = segmenter
        .segment_reader(open(notes_path)?)
        .with_context(|| format!("Failed to read {}", notes_path.display()))?;
    eprintln!("Merging notes from {}", notes_path.display());

    Ok(merge_notes(doc, notes))
}

fn load_patch(path: &Path) -> Result<TranslationPatch> {
    TranslationPatch::from_reader(open(path)?)
        .with_context(|| format!("Failed to read {}", path.display()))
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = ChapterTextConfig::load()?;
            println!("Configuration file: {:?}", ChapterTextConfig::config_path()?);
            println!();
            println!("break_threshold = {}", config.break_threshold);
            println!("notes_suffix = \"{}\"", config.notes_suffix);
        }
        ConfigAction::SetBreakThreshold { value } => {
            let mut config = ChapterTextConfig::load()?;
            config.break_threshold = *value;
            config.save()?;
            println!("Default break threshold set to: {}", config.break_threshold);
        }
        ConfigAction::SetNotesSuffix { suffix } => {
            let mut config = ChapterTextConfig::load()?;
            config.notes_suffix = suffix.clone();
            config.save().context("Invalid notes suffix")?;
            println!("Notes suffix set to: {}", config.notes_suffix);
        }
        ConfigAction::Reset => {
            ChapterTextConfig::default().save()?;
            println!("Configuration reset to defaults");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chapter_text::Element;
    use tempfile::TempDir;

    const BOOK: &str = "Arrival\n\n\n\n\nThe train was late [1].\nNobody waited.\n";
    const NOTES: &str = "1\n\n\n\n\nIt was always late.\n";

    #[test]
    fn test_load_document_with_notes() {
        let temp_dir = TempDir::new().unwrap();
        let book = temp_dir.path().join("book.txt");
        let notes = temp_dir.path().join("book_notes.txt");
        std::fs::write(&book, BOOK).unwrap();
        std::fs::write(&notes, NOTES).unwrap();

        let doc = load_document(&book, Some(&notes), &ChapterTextConfig::default()).unwrap();

        assert_eq!(doc.chapter_titles(), vec!["Arrival"]);
        match &doc.elements()[2] {
            Element::Paragraph(lines) => {
                assert_eq!(lines[0].as_str(), "The train was late  (It was always late.).")
            }
            other => panic!("expected paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_load_document_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.txt");
        assert!(load_document(&missing, None, &ChapterTextConfig::default()).is_err());
    }

    #[test]
    fn test_parse_chapter_commands() {
        let args = Args::try_parse_from([
            "gen-chapters",
            "--break-threshold",
            "5",
            "metadata",
            "book.txt",
            "--title",
            "A Book",
        ])
        .unwrap();
        assert_eq!(args.break_threshold, Some(5));
        match args.command {
            Commands::Metadata { title, artist, .. } => {
                assert_eq!(title, "A Book");
                assert_eq!(artist, "Unknown");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_notes_flags_conflict() {
        let result = Args::try_parse_from([
            "gen-chapters",
            "structure",
            "book.txt",
            "--notes",
            "n.txt",
            "--no-notes",
        ]);
        assert!(result.is_err());
    }
}
