//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the speech asset cache.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "voxcache")]
#[command(about = "Content-addressed cache for synthesized speech")]
#[command(version)]
pub struct Cli {
    /// Override the audio root for this invocation
    #[arg(long = "audio-dir", global = true)]
    pub audio_dir: Option<String>,

    /// Speech service endpoint
    #[arg(long, global = true, env = "VOXCACHE_TTS_ENDPOINT")]
    pub endpoint: Option<String>,

    /// URL fetched by the connectivity check (defaults to the endpoint's origin)
    #[arg(long = "probe-url", global = true, env = "VOXCACHE_TTS_PROBE_URL")]
    pub probe_url: Option<String>,

    /// Bearer token for the speech service
    #[arg(long = "api-key", global = true, env = "VOXCACHE_TTS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::PathBuf;
    use voxcache_core::{Language, VoiceGender};

    #[test]
    fn test_cli_parser_builds() {
        // Verify the CLI parser can be constructed
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from(["voxcache", "--verbose", "--audio-dir", "/tmp/voices", "config"]);
        assert!(cli.verbose);
        assert_eq!(cli.audio_dir, Some("/tmp/voices".to_string()));
        assert!(matches!(cli.command, Some(Commands::Config)));
    }

    #[test]
    fn test_connectivity_url_flag() {
        let cli = Cli::parse_from(["voxcache", "config", "--probe-url", "http://tts:5050/health"]);
        assert_eq!(cli.probe_url.as_deref(), Some("http://tts:5050/health"));
    }

    #[test]
    fn test_ensure_args() {
        let cli = Cli::parse_from([
            "voxcache", "ensure", "Привет", "--language", "ru", "--gender", "male", "--voice",
            "ru-RU-DmitryNeural",
        ]);
        let Some(Commands::Ensure { phrase, json }) = cli.command else {
            panic!("expected ensure");
        };
        assert!(!json);
        assert_eq!(phrase.text.as_deref(), Some("Привет"));
        assert_eq!(phrase.language, Language::Ru);
        assert_eq!(phrase.gender, Some(VoiceGender::Male));
        assert_eq!(phrase.voice.as_deref(), Some("ru-RU-DmitryNeural"));
    }

    #[test]
    fn test_language_defaults_to_english() {
        let cli = Cli::parse_from(["voxcache", "lookup", "hello"]);
        let Some(Commands::Lookup { phrase }) = cli.command else {
            panic!("expected lookup");
        };
        assert_eq!(phrase.language, Language::En);
        assert_eq!(phrase.gender, None);
    }

    #[test]
    fn test_request_conflicts_with_text() {
        let result = Cli::try_parse_from([
            "voxcache",
            "ensure",
            "hello",
            "--request",
            r#"{"text": "hello"}"#,
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unsupported_language_is_rejected() {
        assert!(Cli::try_parse_from(["voxcache", "lookup", "hallo", "--language", "de"]).is_err());
        assert!(Cli::try_parse_from(["voxcache", "lookup", "hello", "--gender", "other"]).is_err());
    }

    #[test]
    fn test_generate_args() {
        let cli = Cli::parse_from([
            "voxcache",
            "generate",
            "phrases.json",
            "--concurrency",
            "5",
            "--gender",
            "female",
            "--dry-run",
        ]);
        let Some(Commands::Generate {
            corpus,
            concurrency,
            gender,
            voice,
            dry_run,
        }) = cli.command
        else {
            panic!("expected generate");
        };
        assert_eq!(corpus, PathBuf::from("phrases.json"));
        assert_eq!(concurrency, Some(5));
        assert_eq!(gender, Some(VoiceGender::Female));
        assert_eq!(voice, None);
        assert!(dry_run);
    }

    #[test]
    fn test_verify_report_path() {
        let cli = Cli::parse_from([
            "voxcache",
            "verify",
            "phrases.json",
            "--report",
            "verification_report.json",
        ]);
        let Some(Commands::Verify { report, .. }) = cli.command else {
            panic!("expected verify");
        };
        assert_eq!(report, Some(PathBuf::from("verification_report.json")));
    }
}
