//! Tone calibration — maps the requested tone to the style-guide block of the rewrite prompt.

use crate::resume::models::Tone;

/// Words the humanized tone must steer away from.
pub const ROBOTIC_WORDS: &[&str] = &["Orchestrated", "Pivotal", "Spearheaded"];

/// Example power verbs suggested by the standard tone.
pub const POWER_VERBS: &[&str] = &["Engineered", "Deployed", "Architected"];

/// Style directives for one tone.
#[derive(Debug, Clone)]
pub struct StyleGuide {
    pub mode: &'static str,
    pub directives: Vec<String>,
}

impl StyleGuide {
    /// Renders the block inserted into the rewrite system prompt.
    pub fn render(&self) -> String {
        let mut block = format!("MODE: {}.\n", self.mode);
        for (i, directive) in self.directives.iter().enumerate() {
            block.push_str(&format!("{}. {}\n", i + 1, directive));
        }
        block
    }
}

/// Returns the style guide for the requested tone.
pub fn style_guide(tone: Tone) -> StyleGuide {
    match tone {
        Tone::Standard => StyleGuide {
            mode: "HIGH-IMPACT ATS OPTIMIZER",
            directives: vec![
                format!(
                    "START every bullet with a power verb ({}).",
                    POWER_VERBS.join(", ")
                ),
                "MAXIMIZE keyword density from the JD.".to_string(),
                "BE AGGRESSIVE with metrics and results.".to_string(),
            ],
        },
        Tone::Humanized => StyleGuide {
            mode: "HUMANIZER / FLUENCY PARAPHRASER",
            directives: vec![
                "SENTENCE VARIANCE: Do NOT start every sentence with a verb. Mix clauses \
                 (e.g. \"By leveraging Python, I built...\" instead of \"Built...\")."
                    .to_string(),
                format!(
                    "VOCABULARY: Use simple, direct, high-fluency English. Avoid robotic words like {}.",
                    ROBOTIC_WORDS
                        .iter()
                        .map(|w| format!("'{w}'"))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
                "TONE: Write as if you are explaining your work to a friend, but professionally."
                    .to_string(),
                "STRUCTURE: Keep the metrics, but weave them naturally into the narrative."
                    .to_string(),
            ],
        },
    }
}
