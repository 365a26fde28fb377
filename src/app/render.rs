use postcraft::Config;
use postcraft::config::ENV_KEYS;
use postcraft::core::decision::QualityCheck;
use postcraft::core::trends::{ScoredTrend, TopicSelection};

fn mark(ok: bool) -> &'static str {
    if ok { "ok" } else { "FAIL" }
}

pub fn render_check(check: &QualityCheck, revised: bool, text: &str) -> String {
    let mut lines = vec![
        format!("text        {text}"),
        String::new(),
        format!("length      {}", mark(check.length_ok)),
        format!("emoji       {}", mark(check.emoji_ok)),
        format!("hashtags    {}", mark(check.no_hashtags)),
        format!("redundancy  {}", mark(check.non_redundant)),
        format!("front-load  {}", mark(check.front_loaded)),
        format!("vibe        {:.1}", check.human_vibe_score),
        format!("hard checks {}", mark(check.hard_checks_pass())),
    ];
    if revised {
        lines.push("(revised once)".into());
    }
    lines.join("\n")
}

pub fn render_ranking(candidates: &[ScoredTrend], selection: &TopicSelection) -> String {
    let mut lines = Vec::with_capacity(candidates.len() + 3);
    if candidates.is_empty() {
        lines.push("no trend passed the policy filter".to_string());
    }
    for (i, candidate) in candidates.iter().enumerate() {
        lines.push(format!(
            "{:>2}. {:<8} score {:.3}  fit {:.2}  momentum {:.2}  {}",
            i + 1,
            candidate.source,
            candidate.score,
            candidate.fit,
            candidate.momentum,
            candidate.phrase
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "selected: {} ({}, pillar {})",
        selection.phrase, selection.source, selection.pillar
    ));
    lines.join("\n")
}

/// Config as TOML followed by any environment overrides in effect.
pub fn render_config(config: &Config) -> anyhow::Result<String> {
    let mut out = toml::to_string_pretty(config)?;
    let active: Vec<String> = ENV_KEYS
        .iter()
        .filter_map(|key| std::env::var(key).ok().map(|v| format!("# {key}={v}")))
        .collect();
    if !active.is_empty() {
        out.push_str("\n# environment overrides\n");
        out.push_str(&active.join("\n"));
        out.push('\n');
    }
    Ok(out)
}
