//! Intent rules for the latest user message.
//!
//! Rules are evaluated top to bottom and the first match wins, so a message
//! that mentions several topics ("follow-up email about certifications")
//! resolves to the earliest rule in [`RULES`]. Precedence:
//! FollowUp, Pitch, Pricing, Compliance, Logistics, Greeting. Anything else
//! is `General`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// What the exporter is asking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    FollowUp,
    Pitch,
    Pricing,
    Compliance,
    Logistics,
    Greeting,
    /// No rule matched.
    General,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Intent::FollowUp => "follow_up",
            Intent::Pitch => "pitch",
            Intent::Pricing => "pricing",
            Intent::Compliance => "compliance",
            Intent::Logistics => "logistics",
            Intent::Greeting => "greeting",
            Intent::General => "general",
        };
        f.write_str(name)
    }
}

/// One entry of the ordered rule list: an intent and the patterns that select it.
pub struct IntentRule {
    pub intent: Intent,
    patterns: Vec<Regex>,
}

impl IntentRule {
    fn new(intent: Intent, pats: &[&str]) -> Self {
        Self {
            intent,
            patterns: pats
                .iter()
                .map(|p| Regex::new(p).expect("Invalid intent regex"))
                .collect(),
        }
    }

    /// Whether any of this rule's patterns occurs in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(text))
    }
}

/// Trade terms recognised in messages.
static INCOTERM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(EXW|FCA|FAS|FOB|CFR|CNF|CIF|CPT|CIP|DAP|DPU|DDP)\b")
        .expect("Invalid incoterm regex")
});

/// The ordered rule list. Order is precedence.
pub static RULES: LazyLock<Vec<IntentRule>> = LazyLock::new(|| {
    vec![
        IntentRule::new(
            Intent::FollowUp,
            &[
                r"(?i)\bfollow[\s-]?ups?\b",
                r"(?i)\bremind(?:er|ers)?\b",
                r"(?i)\bchase\b",
                r"(?i)\bnudge\b",
                r"(?i)\bno\s+(?:reply|response)\b",
                r"(?i)\b(?:hasn'?t|has\s+not|didn'?t|did\s+not)\s+(?:replied|responded|reply|respond)\b",
                r"(?i)\bgone\s+(?:quiet|silent)\b",
            ],
        ),
        IntentRule::new(
            Intent::Pitch,
            &[
                r"(?i)\bpitch(?:es|ing)?\b",
                r"(?i)\blinked\s?in\b",
                r"(?i)\bintroduc(?:e|ing|tion)\b",
                r"(?i)\bintro\b",
                r"(?i)\boutreach\b",
                r"(?i)\bcold\s+(?:email|message|call)\b",
                r"(?i)\bsales\s+(?:email|message|deck)\b",
            ],
        ),
        IntentRule::new(
            Intent::Pricing,
            &[
                r"(?i)\bpric(?:e|es|ed|ing)\b",
                r"(?i)\bquot(?:e|es|ed|ing|ation|ations)\b",
                r"(?i)\bcosts?\b",
                r"(?i)\bcosting\b",
                r"(?i)\bmargins?\b",
                r"(?i)\brates?\b",
                r"(?i)\bdiscounts?\b",
                r"(?i)\bpayment\s+terms?\b",
                r"(?i)\b(?:daam|keemat|kimat)\b",
                r"(?i)\b(?:EXW|FCA|FAS|FOB|CFR|CNF|CIF|CPT|CIP|DAP|DPU|DDP)\b",
            ],
        ),
        IntentRule::new(
            Intent::Compliance,
            &[
                r"(?i)\bcertif(?:y|ied|icate|icates|ication|ications)\b",
                r"(?i)\bcomplian(?:ce|t)\b",
                r"(?i)\bregulat(?:ion|ions|ory)\b",
                r"(?i)\bdocument(?:s|ation)?\b",
                r"(?i)\blabel(?:s|ing|ling)?\b",
                r"(?i)\b(?:fssai|apeda|haccp|brcgs|iso|halal|kosher)\b",
                r"(?i)\bphytosanitary\b",
            ],
        ),
        IntentRule::new(
            Intent::Logistics,
            &[
                r"(?i)\bship(?:ping|ment|ments)?\b",
                r"(?i)\bfreight\b",
                r"(?i)\bcontainers?\b",
                r"(?i)\blead\s+times?\b",
                r"(?i)\bdeliver(?:y|ies)?\b",
                r"(?i)\bsamples?\b",
                r"(?i)\bmoq\b",
                r"(?i)\bminimum\s+order\b",
                r"(?i)\btransit\b",
            ],
        ),
        IntentRule::new(
            Intent::Greeting,
            &[r"(?i)^\s*(?:hi|hii+|hello|hey|namaste|namaskar|good\s+(?:morning|afternoon|evening))\b"],
        ),
    ]
});

/// Classify a message: the intent of the first rule that matches, else `General`.
pub fn classify(text: &str) -> Intent {
    RULES
        .iter()
        .find(|rule| rule.matches(text))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::General)
}

/// Every intent whose rule matches, in precedence order.
pub fn matching_intents(text: &str) -> Vec<Intent> {
    RULES
        .iter()
        .filter(|rule| rule.matches(text))
        .map(|rule| rule.intent)
        .collect()
}

/// The first trade term named in `text`, upper-cased.
pub fn requested_incoterm(text: &str) -> Option<String> {
    INCOTERM_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_uppercase())
}
