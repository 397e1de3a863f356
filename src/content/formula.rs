//! Rhetorical thread formulas and the greedy word-boundary chunker.
//!
//! Formula selection is a simple deterministic index (char-code sum modulo
//! catalog size), not a quality hash: the same seed must always pick the
//! same template so generation and its tests are reproducible.

/// A rhetorical template for short-form threads.
#[derive(Debug)]
pub struct ThreadFormula {
    pub name: &'static str,
    /// Ordered narrative beats.
    pub flow: &'static [&'static str],
    /// Strategic intent of the template.
    pub focus: &'static str,
}

pub const THREAD_FORMULAS: [ThreadFormula; 3] = [
    ThreadFormula {
        name: "Problem-Turn-Action (PTA)",
        flow: &[
            "Open with a hook that names a sharp problem",
            "Stress what staying put costs the reader right now",
            "Present one or two mechanisms that solve it",
            "Give an actionable tip or checklist",
            "Close with a question that invites action",
        ],
        focus: "mistake avoidance, immediate action, reply prompts",
    },
    ThreadFormula {
        name: "Myth-Rebuttal-Case (MRC)",
        flow: &[
            "State a belief the industry repeats",
            "Rebut it in one short, firm line",
            "Back the rebuttal with a concrete case or number",
            "Offer the alternative",
            "End with a line worth saving or sharing",
        ],
        focus: "opinion pieces, contrarian hooks, building trust",
    },
    ThreadFormula {
        name: "Before/After-Insight",
        flow: &[
            "Paint the before scene (the problem in place)",
            "Paint the after scene (the improved result)",
            "Name the two or three differences that made it",
            "Say exactly who should apply this",
            "Suggest one thing to do right now",
        ],
        focus: "felt change, visual recall, purchase and inquiry conversion",
    },
];

/// House rules injected into every thread prompt alongside the formula.
pub const THREAD_GLOBAL_RULES: [&str; 5] = [
    "The first sentence of the first post must stop the scroll.",
    "Each post carries exactly one idea, in short sentences.",
    "At least one middle post uses a number, comparison, or checklist.",
    "Keep promotion out of the opening; the call to action lives in the last post only.",
    "The last post ends with a reply-inviting question or a save-worthy line.",
];

/// Deterministic, stateless formula pick. A blank seed selects as the
/// literal string "default" so the empty case is still covered.
pub fn select_formula(seed: &str) -> &'static ThreadFormula {
    let trimmed = seed.trim();
    let effective = if trimmed.is_empty() { "default" } else { trimmed };
    let sum: u64 = effective.chars().map(|c| c as u64).sum();
    &THREAD_FORMULAS[(sum % THREAD_FORMULAS.len() as u64) as usize]
}

/// Render the selected formula and global rules as a prompt block.
pub fn strategy_guide(seed: &str) -> String {
    let formula = select_formula(seed);
    let flow = formula
        .flow
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {step}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");
    let rules = THREAD_GLOBAL_RULES
        .iter()
        .enumerate()
        .map(|(i, rule)| format!("{}. {rule}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Thread formula to apply:\n\
         - Name: {}\n\
         - Focus: {}\n\
         - Flow:\n{flow}\n\n\
         Writing rules:\n{rules}",
        formula.name, formula.focus
    )
}

/// Greedy word-boundary splitter. Internal whitespace is normalized to
/// single spaces first; each chunk is at most `max_length` characters. A
/// break point is moved back to the nearest space only when that keeps the
/// chunk above half of `max_length`, so no degenerate tiny chunks appear.
pub fn chunk_by_length(text: &str, max_length: usize) -> Vec<String> {
    // A zero budget would never advance; treat it as one character.
    let max_length = max_length.max(1);
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = normalized.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let mut end = (start + max_length).min(chars.len());
        if end < chars.len() {
            if let Some(offset) = chars[start..=end].iter().rposition(|&c| c == ' ') {
                let break_point = start + offset;
                if break_point > start + max_length / 2 {
                    end = break_point;
                }
            }
        }

        let chunk: String = chars[start..end].iter().collect();
        chunks.push(chunk.trim().to_string());

        start = end;
        while start < chars.len() && chars[start] == ' ' {
            start += 1;
        }
    }

    chunks
}
