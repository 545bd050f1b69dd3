// 🏷️ Eligibility Rules - Keyword heuristic for R&D expenses
// A description is eligible when it contains any keyword, ignoring case

use crate::config::TaxPolicy;

// ============================================================================
// RULE DEFINITION
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordRule {
    /// Keyword as configured (used for reporting)
    pub keyword: String,

    /// Lowercased once at construction
    needle: String,
}

impl KeywordRule {
    pub fn new(keyword: &str) -> Self {
        KeywordRule {
            keyword: keyword.to_string(),
            needle: keyword.to_lowercase(),
        }
    }

    /// Substring match, not whole-word: "CloudySky" matches "Cloud".
    /// Expects `text_lower` already lowercased.
    fn matches_lower(&self, text_lower: &str) -> bool {
        !self.needle.is_empty() && text_lower.contains(&self.needle)
    }

    pub fn matches(&self, text: &str) -> bool {
        self.matches_lower(&text.to_lowercase())
    }
}

// ============================================================================
// CLASSIFICATION RESULT
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EligibilityResult {
    pub is_rnd_eligible: bool,

    /// First keyword (in configured order) found in the description
    pub matched_keyword: Option<String>,
}

// ============================================================================
// KEYWORD CLASSIFIER
// ============================================================================

#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    rules: Vec<KeywordRule>,
}

impl KeywordClassifier {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        KeywordClassifier {
            rules: keywords.iter().map(|k| KeywordRule::new(k.as_ref())).collect(),
        }
    }

    pub fn from_policy(policy: &TaxPolicy) -> Self {
        Self::new(policy.rnd_keywords.as_slice())
    }

    pub fn classify(&self, description: &str) -> EligibilityResult {
        let text_lower = description.to_lowercase();

        match self.rules.iter().find(|rule| rule.matches_lower(&text_lower)) {
            Some(rule) => EligibilityResult {
                is_rnd_eligible: true,
                matched_keyword: Some(rule.keyword.clone()),
            },
            None => EligibilityResult::default(),
        }
    }

    pub fn is_eligible(&self, description: &str) -> bool {
        self.classify(description).is_rnd_eligible
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::from_policy(&TaxPolicy::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================
