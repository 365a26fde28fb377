use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::decision::{HookArchetype, Persona, Pillar};

/// Immutable text tables consumed by the pacing model, the assembler and the
/// quality gate. The built-in set is returned by `Default`; any field may be
/// overridden from the `[tables]` section of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentTables {
    // ── Topic fit ────────────────────────────────────────────────────────
    pub health_keywords: Vec<String>,
    pub category_fit: BTreeMap<String, f64>,
    /// Fit for a trend whose category is present but not in `category_fit`.
    pub unlisted_category_fit: f64,
    /// Fit for a trend with no category and no keyword match.
    pub baseline_fit: f64,
    pub pillar_keywords: BTreeMap<Pillar, Vec<String>>,
    pub default_topic: String,

    // ── Templates ────────────────────────────────────────────────────────
    pub hook_templates: BTreeMap<HookArchetype, Vec<String>>,
    /// Voice-specific hooks; a persona without an entry for a hook uses
    /// `hook_templates`.
    pub persona_hooks: BTreeMap<Persona, BTreeMap<HookArchetype, Vec<String>>>,
    pub takeaway_templates: Vec<String>,
    pub thread_bodies: BTreeMap<Pillar, Vec<String>>,
    pub persona_thread_bodies: BTreeMap<Persona, Vec<String>>,
    pub default_thread_bodies: Vec<String>,
    pub cta_pool: Vec<String>,
    pub longform_sections: Vec<LongformSection>,
    pub reply_openers: Vec<String>,
    pub quote_openers: Vec<String>,

    // ── Slot values ──────────────────────────────────────────────────────
    pub facts: BTreeMap<Pillar, BTreeMap<String, String>>,
    pub default_facts: BTreeMap<String, String>,
    pub slot_fallbacks: BTreeMap<String, String>,
    pub generic_fallback: String,

    // ── Style ────────────────────────────────────────────────────────────
    pub opening_substitutions: BTreeMap<String, String>,
    pub hedge_substitutions: BTreeMap<String, String>,
    pub question_lead: String,
    pub citation_sources: Vec<String>,

    // ── Quality ──────────────────────────────────────────────────────────
    pub value_signal_patterns: Vec<String>,
    pub link_bait_phrases: Vec<String>,
    pub clinical_substitutions: BTreeMap<String, String>,
    pub second_person_lead: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongformSection {
    pub header: String,
    pub template: String,
}

impl ContentTables {
    pub fn is_builtin(&self) -> bool {
        *self == Self::default()
    }

    /// Facts for a pillar, falling back to the default table.
    pub fn facts_for(&self, pillar: Pillar) -> &BTreeMap<String, String> {
        self.facts.get(&pillar).unwrap_or(&self.default_facts)
    }

    /// Thread body pool: pillar entries, then the persona's, then the shared pool.
    pub fn thread_pool(&self, pillar: Pillar, persona: Persona) -> Vec<&str> {
        self.thread_bodies
            .get(&pillar)
            .into_iter()
            .chain(self.persona_thread_bodies.get(&persona))
            .flatten()
            .chain(self.default_thread_bodies.iter())
            .map(String::as_str)
            .collect()
    }

    pub fn hook_pool(&self, persona: Persona, hook: HookArchetype) -> &[String] {
        self.persona_hooks
            .get(&persona)
            .and_then(|hooks| hooks.get(&hook))
            .filter(|pool| !pool.is_empty())
            .or_else(|| self.hook_templates.get(&hook))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn table(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

impl Default for ContentTables {
    fn default() -> Self {
        let pillar_keywords = BTreeMap::from([
            (
                Pillar::Sleep,
                strings(&[
                    "sleep", "insomnia", "nap", "melatonin", "circadian", "bedtime", "dream",
                ]),
            ),
            (
                Pillar::Stress,
                strings(&[
                    "stress",
                    "anxiety",
                    "burnout",
                    "cortisol",
                    "breath",
                    "calm",
                    "mental health",
                ]),
            ),
            (
                Pillar::Nutrition,
                strings(&[
                    "diet", "protein", "food", "nutrition", "sugar", "fasting", "meal",
                    "vitamin", "gut",
                ]),
            ),
            (
                Pillar::Movement,
                strings(&[
                    "exercise", "workout", "walk", "run", "fitness", "steps", "strength",
                    "yoga", "mobility",
                ]),
            ),
            (
                Pillar::Behavior,
                strings(&[
                    "habit",
                    "focus",
                    "productivity",
                    "routine",
                    "dopamine",
                    "screen time",
                    "motivation",
                ]),
            ),
        ]);

        let mut health_keywords: Vec<String> =
            pillar_keywords.values().flatten().cloned().collect();
        health_keywords.extend(strings(&[
            "health",
            "wellness",
            "longevity",
            "heart",
            "brain",
        ]));

        let category_fit = BTreeMap::from([
            ("health".to_string(), 0.9),
            ("wellness".to_string(), 0.9),
            ("fitness".to_string(), 0.8),
            ("science".to_string(), 0.7),
            ("food".to_string(), 0.7),
            ("lifestyle".to_string(), 0.6),
            ("sports".to_string(), 0.5),
            ("technology".to_string(), 0.4),
            ("business".to_string(), 0.3),
            ("entertainment".to_string(), 0.25),
            ("politics".to_string(), 0.1),
        ]);

        let hook_templates = BTreeMap::from([
            (
                HookArchetype::MythBust,
                strings(&[
                    "Myth: {{ myth }}. Truth: {{ truth }}.",
                    "Stop believing {{ myth }}. {{ truth }}.",
                ]),
            ),
            (
                HookArchetype::Tip,
                strings(&[
                    "{{ action }} for {{ timeframe }}. {{ benefit }}.",
                    "One {{ topic }} habit that works: {{ action }}. {{ benefit }}.",
                ]),
            ),
            (
                HookArchetype::Story,
                strings(&[
                    "I used to ignore {{ topic }}. Then I tried this for {{ timeframe }}: {{ action }}. {{ benefit }}.",
                ]),
            ),
            (
                HookArchetype::Question,
                strings(&[
                    "Why does {{ topic }} matter so much? {{ truth }}.",
                    "Struggling with {{ topic }}? {{ action }}. {{ benefit }}.",
                ]),
            ),
            (
                HookArchetype::Stat,
                strings(&[
                    "{{ percentage }} of people {{ stat }}. Here's the fix: {{ action }}.",
                ]),
            ),
            (
                HookArchetype::Contrarian,
                strings(&[
                    "Unpopular opinion: the idea that {{ myth }} is wrong. {{ truth }}.",
                ]),
            ),
        ]);

        let persona_hooks = BTreeMap::from([
            (
                Persona::Scientist,
                BTreeMap::from([
                    (
                        HookArchetype::MythBust,
                        strings(&["The research on {{ topic }} is clear: {{ myth }} is a myth. {{ truth }}."]),
                    ),
                    (
                        HookArchetype::Tip,
                        strings(&["What the evidence says about {{ topic }}: {{ action }}. {{ benefit }}."]),
                    ),
                ]),
            ),
            (
                Persona::Coach,
                BTreeMap::from([
                    (
                        HookArchetype::Tip,
                        strings(&["Your {{ topic }} challenge for {{ timeframe }}: {{ action }}. {{ benefit }}."]),
                    ),
                    (
                        HookArchetype::Question,
                        strings(&["Ready to fix your {{ topic }}? {{ action }} for {{ timeframe }}."]),
                    ),
                ]),
            ),
            (
                Persona::Storyteller,
                BTreeMap::from([(
                    HookArchetype::Story,
                    strings(&["A friend asked me about {{ topic }} last year. What changed everything: {{ action }}. {{ benefit }}."]),
                )]),
            ),
            (
                Persona::Skeptic,
                BTreeMap::from([(
                    HookArchetype::Contrarian,
                    strings(&["Everyone says {{ myth }}. The data disagrees: {{ truth }}."]),
                )]),
            ),
            (
                Persona::DataNerd,
                BTreeMap::from([(
                    HookArchetype::Stat,
                    strings(&["By the numbers: {{ percentage }} of people {{ stat }}. {{ truth }}."]),
                )]),
            ),
        ]);

        let persona_thread_bodies = BTreeMap::from([
            (Persona::Scientist, strings(&["The mechanism in one line: {{ mechanism }}."])),
            (Persona::Coach, strings(&["Your move this week: {{ action }}."])),
            (Persona::Storyteller, strings(&["What surprised me most: {{ benefit }}."])),
            (
                Persona::Skeptic,
                strings(&["Be wary of anyone selling a shortcut. {{ truth }}."]),
            ),
            (
                Persona::DataNerd,
                strings(&["The number to watch: {{ percentage }} of people {{ stat }}."]),
            ),
        ]);

        let thread_bodies = BTreeMap::from([
            (
                Pillar::Sleep,
                strings(&[
                    "Keep the same wake time for {{ timeframe }}, even on weekends.",
                    "Dim the lights an hour before bed. Bright light delays melatonin.",
                ]),
            ),
            (
                Pillar::Stress,
                strings(&[
                    "Name the stressor out loud. Labeling a feeling lowers its intensity.",
                    "Take a 10 minute walk outside when tension peaks.",
                ]),
            ),
            (
                Pillar::Nutrition,
                strings(&[
                    "Build each plate around protein and fiber first.",
                    "Drink a glass of water before every meal for {{ timeframe }}.",
                ]),
            ),
        ]);

        let longform_sections = vec![
            LongformSection {
                header: "The problem".into(),
                template: "Most people {{ stat }}, and it quietly costs them energy.".into(),
            },
            LongformSection {
                header: "The evidence".into(),
                template: "Around {{ percentage }} of people notice a change within {{ timeframe }}. {{ truth }}.".into(),
            },
            LongformSection {
                header: "The approach".into(),
                template: "{{ action }}. Keep it small enough to repeat daily.".into(),
            },
            LongformSection {
                header: "The mechanism".into(),
                template: "It works because {{ mechanism }}.".into(),
            },
            LongformSection {
                header: "Your first step".into(),
                template: "Start today: {{ action }}. {{ benefit }}.".into(),
            },
        ];

        let facts = BTreeMap::from([
            (
                Pillar::Sleep,
                table(&[
                    ("truth", "A consistent wake time sets your body clock more than bedtime does"),
                    ("action", "Get 10 minutes of morning light"),
                    ("benefit", "You fall asleep faster at night"),
                    ("percentage", "35%"),
                    ("mechanism", "morning light resets your circadian clock"),
                    ("timeframe", "7 days"),
                    ("myth", "you can catch up on sleep at the weekend"),
                    ("stat", "sleep less than 7 hours a night"),
                ]),
            ),
            (
                Pillar::Stress,
                table(&[
                    ("truth", "Slow exhales calm your nervous system within minutes"),
                    ("action", "Take 5 slow breaths with long exhales"),
                    ("benefit", "Your heart rate drops and focus returns"),
                    ("percentage", "60%"),
                    ("mechanism", "long exhales activate the vagus nerve"),
                    ("timeframe", "2 minutes"),
                    ("myth", "all stress is bad for you"),
                    ("stat", "feel stressed most days"),
                ]),
            ),
            (
                Pillar::Nutrition,
                table(&[
                    ("truth", "Protein at breakfast keeps you full for longer"),
                    ("action", "Add 25g of protein to your first meal"),
                    ("benefit", "Afternoon cravings drop"),
                    ("percentage", "40%"),
                    ("mechanism", "protein slows digestion and steadies blood sugar"),
                    ("timeframe", "2 weeks"),
                    ("myth", "eating late always causes weight gain"),
                    ("stat", "skip protein at breakfast"),
                ]),
            ),
        ]);

        Self {
            health_keywords,
            category_fit,
            unlisted_category_fit: 0.3,
            baseline_fit: 0.2,
            pillar_keywords,
            default_topic: "daily health habits".into(),

            hook_templates,
            persona_hooks,
            takeaway_templates: strings(&[
                "{{ action }} for {{ timeframe }} to see results.",
                "Try this for {{ timeframe }}: {{ action }}.",
            ]),
            thread_bodies,
            persona_thread_bodies,
            default_thread_bodies: strings(&[
                "Why it works: {{ mechanism }}.",
                "The key insight: {{ truth }}.",
                "How to start: {{ action }}. Give it {{ timeframe }}.",
                "What to expect: {{ benefit }}.",
                "Common mistake: believing {{ myth }}.",
                "About {{ percentage }} of people {{ stat }}. You don't have to be one of them.",
            ]),
            cta_pool: strings(&[
                "Save this and try it tonight.",
                "Follow for more science-backed {{ topic }} tips.",
                "Which one will you try first? Reply below.",
            ]),
            longform_sections,
            reply_openers: strings(&["Great point.", "Adding to this:", "This matches the research:"]),
            quote_openers: strings(&["Worth reading.", "Important nuance here:"]),

            facts,
            default_facts: table(&[
                ("truth", "Small habits compound faster than big resolutions"),
                ("action", "Pick one 2 minute habit and repeat it daily"),
                ("benefit", "Consistency gets easier every week"),
                ("percentage", "80%"),
                ("mechanism", "repetition turns effort into automatic cues"),
                ("timeframe", "30 days"),
                ("myth", "willpower is all you need"),
                ("stat", "quit new habits within a month"),
            ]),
            slot_fallbacks: table(&[
                ("truth", "small changes add up"),
                ("action", "start small"),
                ("benefit", "you feel the difference"),
                ("percentage", "most"),
                ("mechanism", "your body adapts"),
                ("timeframe", "a few weeks"),
                ("myth", "there is a quick fix"),
                ("stat", "struggle with this"),
            ]),
            generic_fallback: "this".into(),

            opening_substitutions: table(&[
                ("Myth:", "Common myth:"),
                ("Stop", "Quit"),
                ("One", "A single"),
                ("Unpopular", "Controversial"),
                ("Why", "So why"),
                ("Struggling", "Still struggling"),
                ("Get", "Try to get"),
            ]),
            hedge_substitutions: table(&[
                ("always", "often"),
                ("never", "rarely"),
                ("proves", "suggests"),
                ("shows", "suggests"),
                ("will", "may"),
            ]),
            question_lead: "Ever noticed that".into(),
            citation_sources: strings(&[
                "Harvard Health Publishing",
                "Mayo Clinic",
                "NIH research summary",
                "Sleep Medicine Reviews (meta-analysis)",
                "British Journal of Sports Medicine",
            ]),

            value_signal_patterns: strings(&[
                r"(?i)\b\d+\s*(?:sec(?:ond)?s?|min(?:ute)?s?|h(?:ou)?rs?|days?|weeks?|months?)\b",
                r"\d+(?:\.\d+)?\s*%",
                r"(?i)\b(?:boost|improve|reduce|cut|lower|increase|double|calm|faster|better)\w*",
                r"(?i)\b(?:tip|step|habit|rule|trick|protocol|routine|fix)s?\b",
                r"(?i)\b(?:study|studies|research|data|trial|evidence|science)\b",
            ]),
            link_bait_phrases: strings(&[
                "link in bio",
                "click here",
                "you won't believe",
                "check the link",
                "read more at",
                "dm me",
            ]),
            clinical_substitutions: table(&[
                ("administer", "take"),
                ("commence", "start"),
                ("consume", "eat"),
                ("facilitate", "help"),
                ("implement", "try"),
                ("optimize", "improve"),
                ("utilize", "use"),
            ]),
            second_person_lead: "Here's one for you:".into(),
        }
    }
}
