//! Annotate command implementation

use crate::analyzer::{CommandAnalyzer, Protocol};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{FileReader, MAX_INPUT_CHARS};
use crate::logging;
use crate::output::{self, EmitFormat};
use crate::progress::ProgressReporter;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use yomigana_core::OutputFormat;
use yomigana_engine::{Annotated, ChunkOutcome, Paced, Pipeline, ReadingScript, RunReport};

/// Arguments for the annotate command
#[derive(Debug, Args)]
pub struct AnnotateArgs {
    /// Input file (`-` for stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Ruby output format
    #[arg(short, long, value_enum)]
    pub format: Option<RubyFormat>,

    /// Skip words annotated within this many output characters (0 = never skip)
    #[arg(long, value_name = "CHARS")]
    pub skip_range: Option<usize>,

    /// Leave words made only of common-use kanji unannotated
    #[arg(long)]
    pub common_kanji_filter: bool,

    /// Custom list of common kanji, replacing the built-in table
    #[arg(long, value_name = "FILE")]
    pub common_kanji_file: Option<PathBuf>,

    /// Maximum characters per analyzer call
    #[arg(long, value_name = "CHARS")]
    pub max_chunk_chars: Option<usize>,

    /// Analyzer command, run through `sh -c` once per chunk
    #[arg(long, value_name = "CMD", env = "YOMIGANA_ANALYZER_CMD")]
    pub analyzer_cmd: Option<String>,

    /// Protocol spoken by the analyzer command
    #[arg(long, value_enum)]
    pub protocol: Option<Protocol>,

    /// Minimum pause between analyzer calls in milliseconds
    #[arg(long, value_name = "MS")]
    pub pace_ms: Option<u64>,

    /// Convert katakana readings to hiragana
    #[arg(long)]
    pub hiragana_readings: bool,

    /// What to write: the annotated text, or text plus run report as JSON
    #[arg(long, value_enum, default_value = "text")]
    pub emit: EmitFormat,

    /// Suppress progress and status output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Ruby formats selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RubyFormat {
    /// <ruby>base<rt>reading</rt></ruby>
    Xhtml,
    /// base｟reading｠
    Bracket,
}

impl From<RubyFormat> for OutputFormat {
    fn from(format: RubyFormat) -> Self {
        match format {
            RubyFormat::Xhtml => OutputFormat::XhtmlRuby,
            RubyFormat::Bracket => OutputFormat::BracketedGloss,
        }
    }
}

impl AnnotateArgs {
    /// Execute the annotate command
    pub fn execute(&self) -> Result<()> {
        logging::init(self.verbose, self.quiet);

        log::info!("Starting annotation");
        log::debug!("Arguments: {:?}", self);

        let mut config = CliConfig::load_or_default(self.config.as_deref())?;
        self.apply_overrides(&mut config);

        let command = config
            .analyzer
            .command
            .clone()
            .ok_or(CliError::MissingAnalyzer)?;
        let pipeline = Pipeline::with_config(config.to_pipeline_config()?)
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        let text = FileReader::read_limited(&self.input, MAX_INPUT_CHARS)?;

        let analyzer = CommandAnalyzer::new(command, config.analyzer.protocol);
        let mut analyzer = Paced::new(analyzer, Duration::from_millis(config.analyzer.pace_ms));

        let annotated = self.run(&pipeline, &text, &mut analyzer)?;

        let destination = output::open_destination(self.output.as_deref())?;
        let mut writer = output::create_writer(self.emit, destination);
        writer.write_annotated(&annotated)?;
        writer.finish()?;

        if !self.quiet {
            eprintln!("{}", status_line(&annotated.report));
        }

        Ok(())
    }

    /// Drive the pipeline chunk by chunk so progress can be shown
    fn run(
        &self,
        pipeline: &Pipeline,
        text: &str,
        analyzer: &mut Paced<CommandAnalyzer>,
    ) -> Result<Annotated> {
        let chunks = pipeline.chunk(text);
        log::info!(
            "annotating {} characters in {} chunks",
            text.chars().count(),
            chunks.len()
        );

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_chunks(chunks.len() as u64);

        let mut annotator = pipeline.annotator()?;
        for (position, chunk) in chunks.iter().enumerate() {
            match annotator.process_chunk(chunk, analyzer) {
                ChunkOutcome::Annotated(count) => progress.chunk_completed(count),
                ChunkOutcome::PassedThrough => progress.chunk_completed(0),
                ChunkOutcome::Aborted => {
                    progress.abandon("aborted, passing remaining text through");
                    annotator.pass_remaining(&chunks[position + 1..]);
                    break;
                }
            }
        }
        progress.finish();

        Ok(annotator.finish())
    }

    /// Command-line flags take precedence over the configuration file
    fn apply_overrides(&self, config: &mut CliConfig) {
        if let Some(format) = self.format {
            config.annotation.format = format.into();
        }
        if let Some(skip_range) = self.skip_range {
            config.annotation.skip_range = skip_range;
        }
        if self.common_kanji_filter {
            config.annotation.common_kanji_filter = true;
        }
        if let Some(path) = &self.common_kanji_file {
            config.annotation.common_kanji_file = Some(path.clone());
        }
        if let Some(max) = self.max_chunk_chars {
            config.chunking.max_chunk_chars = max;
        }
        if let Some(command) = &self.analyzer_cmd {
            config.analyzer.command = Some(command.clone());
        }
        if let Some(protocol) = self.protocol {
            config.analyzer.protocol = protocol;
        }
        if let Some(pace_ms) = self.pace_ms {
            config.analyzer.pace_ms = pace_ms;
        }
        if self.hiragana_readings {
            config.annotation.reading_script = ReadingScript::Hiragana;
        }
    }
}

/// One-line summary of a run for stderr
fn status_line(report: &RunReport) -> String {
    let mut line = format!(
        "Annotated {} chunk(s): {} ruby, {} suppressed",
        report.chunks_total,
        report.annotations,
        report.suppressed.total()
    );
    if !report.incidents.is_empty() {
        line.push_str(&format!(", {} incident(s)", report.incidents.len()));
    }
    if report.chunks_passed_through > 0 {
        line.push_str(&format!(
            ", {} chunk(s) passed through",
            report.chunks_passed_through
        ));
    }
    if report.aborted {
        line.push_str(", aborted");
    }
    line.push_str(&format!(" in {:.1} ms", report.processing_time_ms));
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        args: AnnotateArgs,
    }

    fn parse(args: &[&str]) -> AnnotateArgs {
        let mut argv = vec!["test"];
        argv.extend_from_slice(args);
        TestCli::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn test_flags_override_config() {
        let args = parse(&[
            "-i",
            "in.txt",
            "--format",
            "bracket",
            "--skip-range",
            "0",
            "--common-kanji-filter",
            "--max-chunk-chars",
            "200",
            "--analyzer-cmd",
            "mecab",
            "--protocol",
            "jlp",
            "--pace-ms",
            "0",
            "--hiragana-readings",
        ]);

        let mut config = CliConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.annotation.format, OutputFormat::BracketedGloss);
        assert_eq!(config.annotation.skip_range, 0);
        assert!(config.annotation.common_kanji_filter);
        assert_eq!(config.annotation.reading_script, ReadingScript::Hiragana);
        assert_eq!(config.chunking.max_chunk_chars, 200);
        assert_eq!(config.analyzer.command.as_deref(), Some("mecab"));
        assert_eq!(config.analyzer.protocol, Protocol::Jlp);
        assert_eq!(config.analyzer.pace_ms, 0);
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let args = parse(&["-i", "in.txt"]);

        let mut config = CliConfig::parse("[annotation]\nskip_range = 5\nformat = \"bracket\"\n")
            .unwrap();
        args.apply_overrides(&mut config);

        assert_eq!(config.annotation.skip_range, 5);
        assert_eq!(config.annotation.format, OutputFormat::BracketedGloss);
        assert_eq!(config.annotation.reading_script, ReadingScript::AsIs);
    }

    #[test]
    fn test_status_line() {
        let mut report = RunReport {
            chunks_total: 3,
            annotations: 4,
            chunks_passed_through: 1,
            ..RunReport::default()
        };
        report.aborted = true;

        let line = status_line(&report);
        assert!(line.starts_with("Annotated 3 chunk(s): 4 ruby, 0 suppressed"));
        assert!(line.contains("1 chunk(s) passed through"));
        assert!(line.contains("aborted"));
    }
}
