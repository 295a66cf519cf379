//! Reply templates keyed on the latest user message.
//!
//! Composes the agent's answer from the seller profile without calling out
//! to any model. Empty profile fields render as neutral placeholders so a
//! half-filled profile still produces a usable draft.

use exportdesk_core::types::{Message, Profile, Role};
use regex::Regex;

use crate::error::AgentError;
use crate::intent::{classify, requested_incoterm, Intent};

// =============================================================================
// ReplyEngine
// =============================================================================

/// Anything that can turn a conversation into the agent's next reply.
pub trait ReplyEngine: Send + Sync {
    fn reply(&self, history: &[Message], profile: &Profile) -> Result<String, AgentError>;
}

// =============================================================================
// ReplyGenerator
// =============================================================================

/// Deterministic template-based reply generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplyGenerator;

impl ReplyEngine for ReplyGenerator {
    fn reply(&self, history: &[Message], profile: &Profile) -> Result<String, AgentError> {
        Ok(self.generate(history, profile))
    }
}

impl ReplyGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Produce the reply for `history` under `profile`.
    ///
    /// Without any user message in the history the initial pitch is returned.
    pub fn generate(&self, history: &[Message], profile: &Profile) -> String {
        let Some(latest) = latest_user_message(history) else {
            return initial_pitch(&Fields::new(profile, None));
        };

        let intent = classify(latest);
        let fields = Fields::new(profile, Some(latest));
        tracing::debug!(%intent, focus_market = %fields.market, "Composing reply");

        match intent {
            Intent::FollowUp => follow_up(&fields),
            Intent::Pitch => pitch(&fields),
            Intent::Pricing => pricing(&fields, requested_incoterm(latest)),
            Intent::Compliance => compliance(&fields),
            Intent::Logistics => logistics(&fields),
            Intent::Greeting => greeting(&fields),
            Intent::General => general(&fields),
        }
    }
}

/// Content of the most recent `user` turn, if any.
pub fn latest_user_message(history: &[Message]) -> Option<&str> {
    history
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.as_str())
}

// =============================================================================
// Profile fields with placeholders
// =============================================================================

struct Fields<'a> {
    profile: &'a Profile,
    seller: &'a str,
    product: &'a str,
    /// Market named in the message, else the first profile market.
    market: String,
    markets: String,
    price: &'a str,
    /// `None` when the profile names no trade term.
    incoterm: Option<&'a str>,
    usp: &'a str,
}

impl<'a> Fields<'a> {
    fn new(profile: &'a Profile, message: Option<&str>) -> Self {
        let seller = profile
            .business_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("our team");

        let markets: Vec<&str> = profile
            .target_markets
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .collect();

        let mentioned =
            message.and_then(|text| markets.iter().find(|m| names_market(text, m)).copied());

        let market = mentioned
            .or_else(|| markets.first().copied())
            .unwrap_or("your target market")
            .to_string();

        let markets = if markets.is_empty() {
            "global markets".to_string()
        } else {
            markets.join(", ")
        };

        Self {
            profile,
            seller,
            product: or_placeholder(&profile.product, "your product"),
            market,
            markets,
            price: or_placeholder(&profile.price_point, "to be discussed"),
            incoterm: Some(profile.incoterm.trim()).filter(|t| !t.is_empty()),
            usp: or_placeholder(
                &profile.unique_selling_point,
                "consistent quality and reliable supply",
            ),
        }
    }

    /// Price with its trade term, e.g. `$980/MT (FOB)`.
    fn offer(&self) -> String {
        match self.incoterm {
            Some(term) => format!("{} ({})", self.price, term),
            None => self.price.to_string(),
        }
    }

    /// `FOB terms`, or neutral wording without a trade term.
    fn terms(&self) -> String {
        match self.incoterm {
            Some(term) => format!("{} terms", term),
            None => "your agreed terms".to_string(),
        }
    }

    fn certifications(&self) -> Option<String> {
        join_non_empty(self.profile.certifications())
    }

    fn channels(&self) -> Option<String> {
        join_non_empty(self.profile.preferred_channels())
    }
}

/// True when `market` appears in `text` as a whole word, case-insensitively.
fn names_market(text: &str, market: &str) -> bool {
    let pattern = format!(
        r"(?i)(?:^|[^\p{{L}}\p{{N}}]){}(?:$|[^\p{{L}}\p{{N}}])",
        regex::escape(market)
    );
    Regex::new(&pattern).is_ok_and(|re| re.is_match(text))
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder
    } else {
        trimmed
    }
}

fn join_non_empty(items: &[String]) -> Option<String> {
    let kept: Vec<&str> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if kept.is_empty() {
        None
    } else {
        Some(kept.join(", "))
    }
}

// =============================================================================
// Templates
// =============================================================================

fn initial_pitch(f: &Fields<'_>) -> String {
    format!(
        "Namaste! I'm the export sales agent for {seller}. Here's a starting pitch you can adapt:\n\n\
         \"We supply {product} to buyers in {markets}, backed by {usp}. Current offer: {offer}.\"\n\n\
         Tell me which buyer you're targeting and I'll prepare the pitch, pricing, and follow-up plan.",
        seller = f.seller,
        product = f.product,
        markets = f.markets,
        usp = f.usp,
        offer = f.offer(),
    )
}

fn greeting(f: &Fields<'_>) -> String {
    format!(
        "Namaste! Ready to help you sell {} in {}. Ask me for a buyer pitch, a pricing quote, \
         a compliance checklist, or a follow-up plan.",
        f.product, f.markets
    )
}

fn pitch(f: &Fields<'_>) -> String {
    let mut lines = vec![
        format!("Here's a pitch for a buyer in {}:", f.market),
        String::new(),
        format!("Subject: {} supply for {}", f.product, f.market),
        String::new(),
        "Hello,".to_string(),
        String::new(),
        format!(
            "I'm reaching out from {}. We export {} with {}.",
            f.seller, f.product, f.usp
        ),
    ];
    if let Some(certs) = f.certifications() {
        lines.push(format!("Our facility holds {} certification.", certs));
    }
    lines.push(format!("Our current offer is {} on {}.", f.price, f.terms()));
    if let Some(channels) = f.channels() {
        lines.push(format!("We already work with {}.", channels));
    }
    lines.push(String::new());
    lines.push(
        "Would you be open to a short call this week to share your volume and packaging needs?"
            .to_string(),
    );
    lines.push(String::new());
    lines.push(
        "Tip: keep the LinkedIn version under 120 words; attach a spec sheet on email."
            .to_string(),
    );
    lines.join("\n")
}

fn pricing(f: &Fields<'_>, requested: Option<String>) -> String {
    let mut lines = vec![
        format!("Pricing playbook for {} ({}):", f.product, f.market),
        format!("- Base offer: {}.", f.offer()),
    ];
    let differs = |t: &String| !matches!(f.incoterm, Some(own) if t.eq_ignore_ascii_case(own));
    if let Some(term) = requested.filter(differs) {
        lines.push(format!(
            "- Buyer asked for {term}: start from your {} price and add the costs {term} covers \
             (freight, insurance, duties as applicable) up to the named place before quoting.",
            f.incoterm.unwrap_or("quoted")
        ));
    }
    lines.push("- Quote validity: 7 days, subject to freight and currency movement.".to_string());
    lines.push(
        "- Keep a 3-5% negotiation buffer and trade it only for volume or advance payment."
            .to_string(),
    );
    lines.push(
        "- Payment: 30% advance with balance against documents, or LC at sight for new buyers."
            .to_string(),
    );
    lines.push(
        "Share the buyer's volume and destination port and I'll structure the full quotation."
            .to_string(),
    );
    lines.join("\n")
}

fn compliance(f: &Fields<'_>) -> String {
    let certs = f.certifications().unwrap_or_else(|| {
        "none listed yet; add them to your profile (e.g. ISO 22000, HACCP)".to_string()
    });
    format!(
        "Compliance checklist for shipping {product} to {market}:\n\
         - Certifications to highlight: {certs}.\n\
         - Core documents: commercial invoice, packing list, bill of lading, certificate of origin.\n\
         - Check {market} import rules for labelling, residue limits, and any phytosanitary or health certificate.\n\
         - Share document drafts with the buyer before shipment to avoid clearance delays.\n\
         Lead with {usp} so the buyer sees compliance as a strength.",
        product = f.product,
        market = f.market,
        certs = certs,
        usp = f.usp,
    )
}

fn follow_up(f: &Fields<'_>) -> String {
    let proof = f
        .certifications()
        .map(|c| format!("your {} certificates", c))
        .unwrap_or_else(|| "a product spec sheet".to_string());
    format!(
        "Follow-up plan for a buyer in {market}:\n\
         1. Day 2: short email recapping {product} at {price} and {usp}.\n\
         2. Day 5: share {proof} and ask for their target volume.\n\
         3. Day 10: WhatsApp or LinkedIn nudge with a time-bound offer on {terms}.\n\
         4. Day 20: final check-in offering a sample or a video call.\n\
         Keep each message under 100 words and end with one clear question.",
        market = f.market,
        product = f.product,
        price = f.price,
        usp = f.usp,
        proof = proof,
        terms = f.terms(),
    )
}

fn logistics(f: &Fields<'_>) -> String {
    format!(
        "Logistics notes for {product} to {market}:\n\
         - Quote on {terms} and state clearly where risk passes to the buyer.\n\
         - Confirm MOQ, packaging, and container load (20ft vs 40ft) before production.\n\
         - Offer a pre-shipment sample with photos or video to build trust.\n\
         - Give a realistic lead time: production, inland haulage, and port handling before sailing.\n\
         Mention {usp} when the buyer asks about reliability.",
        product = f.product,
        market = f.market,
        terms = f.terms(),
        usp = f.usp,
    )
}

fn general(f: &Fields<'_>) -> String {
    let channels = f
        .channels()
        .unwrap_or_else(|| "importers and distributors".to_string());
    format!(
        "Here's how I'd position {product} for {market}:\n\
         - Value: {usp}.\n\
         - Offer: {offer}.\n\
         - Channels: {channels}.\n\
         Ask me for a pitch, pricing, a compliance checklist, or a follow-up plan and I'll draft it.",
        product = f.product,
        market = f.market,
        usp = f.usp,
        offer = f.offer(),
        channels = channels,
    )
}

// =============================================================================
// Tests
// =============================================================================
