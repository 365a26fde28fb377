use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use std::io::Read;
use tracing::debug;

use crate::app::render::{render_check, render_config, render_ranking};
use crate::cli::commands::{Cli, Commands, ConfigCommands};
use postcraft::config::Config;
use postcraft::core::decision::{ContentDraft, ContentFormat, DecisionEngine, TweetSegment};
use postcraft::core::pacing::TopicMatcher;
use postcraft::core::quality::{QualityGate, ValueSignals};
use postcraft::core::signals::SignalSnapshot;
use postcraft::core::trends::TopicRanker;

/// Raw snapshot text from a file, or from stdin when `source` is `-`.
fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read snapshot from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read snapshot file {source}"))
    }
}

fn read_snapshot(source: &str) -> Result<SignalSnapshot> {
    let raw = read_source(source)?;
    serde_json::from_str(&raw).context("Snapshot is not valid JSON")
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

fn decision_rng(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::rng()),
    }
}

pub fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Decide {
            snapshot,
            seed,
            pretty,
            attribution,
        } => {
            // Unreadable input is fatal; unparseable input becomes a hold record.
            let raw = read_source(&snapshot)?;
            let engine =
                DecisionEngine::new(&config).context("Failed to build decision engine")?;
            let mut rng = decision_rng(seed);
            let record = engine.decide_json(&raw, rng.as_mut());
            debug!(post_now = record.post_now, generator = engine.generator(), "decided");
            if attribution {
                print_json(&record.attribution(), pretty)
            } else {
                print_json(&record, pretty)
            }
        }

        Commands::Rank { snapshot } => {
            let snapshot = read_snapshot(&snapshot)?;
            snapshot.validate()?;
            let topics = TopicMatcher::new(&config.tables)?;
            let ranker = TopicRanker::new(
                &topics,
                &config.tables.default_topic,
                config.pacing.news_discount,
            );
            let candidates = ranker.scored_candidates(&snapshot);
            let selection = ranker.select(&snapshot);
            println!("{}", render_ranking(&candidates, &selection));
            Ok(())
        }

        Commands::Check {
            text,
            snapshot,
            revise,
        } => {
            let snapshot = match snapshot {
                Some(source) => read_snapshot(&source)?,
                None => SignalSnapshot::default(),
            };
            snapshot.validate()?;
            let signals = ValueSignals::new(&config.tables.value_signal_patterns)?;
            let gate = QualityGate::new(
                &config.quality,
                &config.tables,
                &signals,
                &config.content.ellipsis,
            );
            let draft = ContentDraft {
                tweets: vec![TweetSegment::new(1, text)],
                ..ContentDraft::default()
            };
            if revise {
                let outcome = gate.gate(draft, ContentFormat::Single, &snapshot);
                println!(
                    "{}",
                    render_check(&outcome.check, outcome.revised, outcome.draft.lead_text())
                );
            } else {
                let check = gate.evaluate(&draft, ContentFormat::Single, &snapshot);
                println!("{}", render_check(&check, false, draft.lead_text()));
            }
            Ok(())
        }

        Commands::Config { config_command } => {
            match config_command {
                ConfigCommands::Show => print!("{}", render_config(&config)?),
                ConfigCommands::Path => println!("{}", config.config_path.display()),
            }
            Ok(())
        }
    }
}
