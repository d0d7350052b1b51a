//! Suggestion Generator: template-driven improvement guidance.

pub const DEFAULT_TOP_N: usize = 5;

pub const NO_GAPS_MESSAGE: &str = "No gaps found: every keyword identified in the job description \
is already reflected in your resume. Keep the wording aligned with the posting when you apply.";

/// Tone bracket selected from the match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// score >= 75
    Reinforcing,
    /// 50 <= score < 75
    ModerateGap,
    /// score < 50
    SignificantGap,
}

impl Tone {
    pub fn for_score(score: u8) -> Self {
        match score {
            75..=u8::MAX => Tone::Reinforcing,
            50..=74 => Tone::ModerateGap,
            _ => Tone::SignificantGap,
        }
    }

    fn headline(self, score: u8) -> String {
        match self {
            Tone::Reinforcing => format!(
                "Strong match ({score}/100). Your resume already covers most of what this role asks for; \
                 closing the remaining gaps will make it stand out further."
            ),
            Tone::ModerateGap => format!(
                "Moderate match ({score}/100). Your resume covers the core of the role, \
                 but several requirements are not evidenced yet."
            ),
            Tone::SignificantGap => format!(
                "Low match ({score}/100). Significant gaps: many of the role's key requirements \
                 do not appear in your resume yet."
            ),
        }
    }
}

/// Builds the suggestions text. `missing` must already be in report order;
/// the first `top_n` terms get an itemized call-out.
pub fn generate_suggestions(missing: &[String], score: u8, top_n: usize) -> String {
    if missing.is_empty() {
        return NO_GAPS_MESSAGE.to_string();
    }

    let mut text = Tone::for_score(score).headline(score);

    if top_n > 0 {
        text.push_str("\n\nTo close the gap:");
        for term in missing.iter().take(top_n) {
            text.push_str(&format!(
                "\n- Add concrete evidence of \"{term}\": a project, role or certification where you used it, \
                 ideally with a measurable result."
            ));
        }
        let remaining = missing.len().saturating_sub(top_n);
        if remaining > 0 {
            let noun = if remaining == 1 { "keyword" } else { "keywords" };
            text.push_str(&format!(
                "\n- {remaining} more missing {noun} not listed here; see the missing keywords list."
            ));
        }
    }

    text
}
