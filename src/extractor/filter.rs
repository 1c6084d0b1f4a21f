// file: src/extractor/filter.rs
// description: ordered first-match-wins exclusion rules for candidate skill phrases
// reference: declarative predicate table evaluated in order

/// Outcome of a single rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Exclude,
    Keep,
    Next,
}

/// Lowercased phrase with its whitespace-split words.
#[derive(Debug)]
pub struct Phrase<'a> {
    pub text: &'a str,
    pub words: Vec<&'a str>,
}

impl<'a> Phrase<'a> {
    pub fn new(lowered: &'a str) -> Self {
        let text = lowered.trim();
        Self {
            text,
            words: text.split_whitespace().collect(),
        }
    }

    fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.text.contains(n))
    }

    fn skill_term_count(&self) -> usize {
        self.words
            .iter()
            .filter(|w| SKILL_TERMS.iter().any(|t| w.contains(t)))
            .count()
    }

    fn has_connector(&self) -> bool {
        self.words.iter().any(|w| CONNECTORS.contains(w))
    }
}

pub struct ExclusionRule {
    pub name: &'static str,
    pub check: fn(&Phrase) -> Verdict,
}

/// Evaluated top to bottom; the first rule that does not return
/// `Verdict::Next` decides. Later rules rely on earlier exclusions.
pub static EXCLUSION_RULES: &[ExclusionRule] = &[
    ExclusionRule { name: "pronoun", check: pronoun },
    ExclusionRule { name: "abstract-concept", check: abstract_concept },
    ExclusionRule { name: "vague-skills-suffix", check: vague_skills_suffix },
    ExclusionRule { name: "skill-indicator", check: skill_indicator },
    ExclusionRule { name: "meta-text", check: meta_text },
    ExclusionRule { name: "vague-qualifier", check: vague_qualifier },
    ExclusionRule { name: "generic-phrase", check: generic_phrase },
    ExclusionRule { name: "concatenation", check: concatenation },
    ExclusionRule { name: "benefit-perk", check: benefit_perk },
    ExclusionRule { name: "length-cap", check: length_cap },
];

/// Name and verdict of the rule that decides `phrase`, if any.
pub fn deciding_rule(phrase: &str) -> Option<(&'static str, Verdict)> {
    let lowered = phrase.to_lowercase();
    let phrase = Phrase::new(&lowered);
    EXCLUSION_RULES.iter().find_map(|rule| match (rule.check)(&phrase) {
        Verdict::Next => None,
        verdict => Some((rule.name, verdict)),
    })
}

/// True when `phrase` should not be treated as a skill.
pub fn is_non_skill_phrase(phrase: &str) -> bool {
    matches!(deciding_rule(phrase), Some((_, Verdict::Exclude)))
}

const PRONOUNS: &[&str] = &["their", "our", "your", "its", "his", "her", "my", "we", "they", "you"];

const ABSTRACT_CONCEPTS: &[&str] = &[
    "work spirit", "team spirit", "spirit", "attitude", "mindset", "individual capabilities",
    "capabilities", "personal qualities", "work ethic", "professional demeanor",
    "character traits", "core values", "cultural fit", "passion", "enthusiasm", "dedication",
    "commitment", "motivation", "drive",
];

const TECHNICAL_PREFIXES: &[&str] = &[
    "python", "java", "sql", "excel", "coding", "programming", "technical", "analytical",
    "communication", "leadership", "accounting", "financial", "data", "project management",
];

const VAGUE_SKILL_PREFIXES: &[&str] = &[
    "staff", "work", "individual", "personal", "professional", "general", "basic", "core", "key",
    "essential", "important",
];

const SKILL_INDICATORS: &[&str] = &[
    "administer", "administering", "administration", "manage", "managing", "management",
    "design", "designing", "implement", "implementing", "implementation", "analyze",
    "analyzing", "analysis", "coordinate", "coordinating", "coordination", "develop",
    "developing", "development", "oversee", "overseeing", "oversight", "specialist", "analyst",
    "manager", "director", "coordinator", "representative", "consultant", "advisor",
    "administrator", "lead", "senior", "junior", "plan", "planning", "strategy", "strategic",
    "program", "compliance", "regulatory", "policy", "policies", "expertise", "experience in",
    "reconciliation", "payable", "receivable",
];

const META_TEXT: &[&str] = &[
    "job description", "job posting", "position description", "role description",
    "responsibilities", "requirements", "qualifications", "preferred qualifications",
    "the company", "the firm", "the organization", "our company", "our firm", "law firm",
    "our client", "the client", "our team", "minimum", "maximum", "required", "preferred",
    "years experience", "years of experience", "related field", "must have", "should have",
];

const VAGUE_QUALIFIERS: &[&str] = &[
    "strong knowledge", "good knowledge", "excellent knowledge", "solid knowledge",
    "strong understanding", "good understanding", "thorough understanding",
    "complete understanding", "interpersonal skills", "communication skills",
    "organizational skills", "strong skills", "excellent skills", "proven ability",
    "ability to work", "team player", "self-starter", "detail oriented", "fast paced",
    "multiple deadlines", "daily operations", "daily accounting operations", "strong attention",
    "great attention", "excellent attention", "other duties", "other responsibilities",
    "other tasks", "various duties", "various responsibilities", "various tasks",
    "social declarations", "social security declarations", "verbal written presentation",
    "written presentation", "verbal presentation", "ongoing administration", "ongoing support",
    "ongoing maintenance", "teammates", "team members", "colleagues", "peers", "coworkers",
    "materials", "documents", "files", "reports", "paperwork",
];

const VAGUE_SINGLE_WORDS: &[&str] = &[
    "book", "books", "experience", "knowledge", "understanding", "documents", "document",
    "wages", "wage", "records", "record", "management", "processes", "duties", "tasks",
    "functions", "skills", "abilities", "field", "area", "department", "teammates", "materials",
    "files", "reports", "paperwork", "colleagues", "peers", "coworkers", "administration",
    "support", "maintenance", "presentation", "presentations",
];

const VAGUE_TWO_WORDS: &[&str] = &[
    "bank documents", "tax documents", "financial documents", "annual wages",
    "senior management", "middle management", "related field", "various tasks", "daily tasks",
];

const ENVIRONMENT_EXCEPTIONS: &[&str] = &[
    "production environment", "development environment", "test environment",
    "cloud environment", "virtual environment", "linux environment",
];

const VAGUE_ENDINGS: &[&str] = &[" systems", " information", " data", " experience", " documents"];

const SPECIFIC_SYSTEMS: &[&str] = &[
    "erp systems", "financial systems management", "accounting systems implementation",
];

const MASHED_TERMS: &[&str] = &[
    "accounting", "finance", "payroll", "reconciliation", "invoice", "payment", "followup",
    "follow", "design", "construction", "coordination", "repair", "restoration", "structural",
    "engineer", "architectural", "mechanical", "electrical", "plumbing", "building", "project",
    "management",
];

const MASHED_PATTERNS: &[&str] = &[
    "followup", "followuppayments", "designconstruction", "repairrestoration",
    "coordinationmeetings", "structuralengineer", "projectmanagement",
];

const SKILL_TERMS: &[&str] = &[
    "reconciliation", "invoice", "payroll", "accounting", "finance", "checks", "balance",
    "statements", "entries", "payments", "dispute", "differences", "process", "sheets",
    "changes", "efficiency", "accuracy", "ledger", "receivable", "payable", "reporting",
    "budgeting", "social", "declarations", "environment", "services", "systems", "information",
    "professional", "financial", "book", "paychex",
];

const CONNECTORS: &[&str] = &["and", "or", "of", "to", "for", "with", "in", "on", "by"];

const LOOSE_CONNECTORS: &[&str] = &["and", "or", "of", "to", "for", "with", "in", "on", "at", "by", "from"];

const TWO_WORD_COMPOUNDS: &[&str] = &[
    "accounts payable", "accounts receivable", "journal entries", "bank reconciliation",
    "account reconciliation", "financial reporting", "financial statements", "balance sheet",
    "income statement", "cash flow", "general ledger", "payroll processing",
    "general ledger accounting",
];

const THREE_WORD_COMPOUNDS: &[&str] = &[
    "general ledger accounting", "general ledger reconciliation", "accounts payable clerk",
    "accounts receivable clerk", "month end close", "year end close", "cost accounting system",
    "financial statements analysis",
];

const PERK_INDICATORS: &[&str] = &[
    "we offer", "offering", "includes", "including", "such as", "competitive", "comprehensive",
    "generous", "great", "excellent", "package", "full benefits", "and more", "perks include",
    "enjoy", "receive", "eligible for", "access to",
];

const PERK_PATTERNS: &[&str] = &[
    "medical dental", "dental and vision", "vision 401k", "health insurance", "401k match",
    "paid time off", "pto", "sick leave", "vacation days", "competitive benefits",
    "benefits package", "retirement plan", "stock options", "gym membership",
    "flexible schedule", "remote work", "annual bonus", "performance bonus", "signing bonus",
    "quarterly bonus", "paid holidays", "paid vacation", "holiday pay", "parental leave",
    "tuition reimbursement", "professional development", "career advancement",
    "advancement opportunities", "growth opportunities",
];

const BENEFIT_WORDS: &[&str] = &[
    "medical", "dental", "vision", "401k", "insurance", "retirement", "pension", "bonus",
    "bonuses", "holidays", "vacation", "pto", "benefits", "perks", "compensation", "salary",
    "pay", "wages", "stipend", "allowance", "reimbursement",
];

const PROFESSIONAL_BENEFIT_CONTEXTS: &[&str] = &[
    "administration", "management", "analyst", "specialist", "coordinator", "analysis",
    "planning", "strategy",
];

const PROFESSIONAL_EXCEPTIONS: &[&str] = &[
    "certified public accountant", "generally accepted accounting principles",
    "international financial reporting standards", "accounts payable clerk",
    "accounts receivable specialist", "financial planning and analysis",
];

fn exclude_if(condition: bool) -> Verdict {
    if condition { Verdict::Exclude } else { Verdict::Next }
}

fn pronoun(p: &Phrase) -> Verdict {
    exclude_if(p.words.iter().any(|w| PRONOUNS.contains(w)))
}

fn abstract_concept(p: &Phrase) -> Verdict {
    exclude_if(p.contains_any(ABSTRACT_CONCEPTS))
}

fn vague_skills_suffix(p: &Phrase) -> Verdict {
    if !(p.text.ends_with(" skills") || p.text.ends_with(" skill")) {
        return Verdict::Next;
    }
    exclude_if(p.contains_any(VAGUE_SKILL_PREFIXES) && !p.contains_any(TECHNICAL_PREFIXES))
}

fn skill_indicator(p: &Phrase) -> Verdict {
    if p.contains_any(SKILL_INDICATORS) { Verdict::Keep } else { Verdict::Next }
}

fn meta_text(p: &Phrase) -> Verdict {
    exclude_if(p.contains_any(META_TEXT))
}

fn vague_qualifier(p: &Phrase) -> Verdict {
    if VAGUE_SINGLE_WORDS.contains(&p.text) {
        return Verdict::Exclude;
    }
    if p.words.len() == 2 && VAGUE_TWO_WORDS.contains(&p.text) {
        return Verdict::Exclude;
    }
    exclude_if(VAGUE_QUALIFIERS.iter().any(|q| {
        p.text == *q || (p.text.starts_with(q) && p.text[q.len()..].starts_with(' '))
    }))
}

fn generic_phrase(p: &Phrase) -> Verdict {
    const GENERIC_STARTS: &[&str] = &["other ", "the ", "a ", "an ", "all "];
    if GENERIC_STARTS.iter().any(|s| p.text.starts_with(s)) {
        return Verdict::Exclude;
    }

    let vague_setting =
        p.text.contains(" environment") || p.text.contains(" setting") || p.text.ends_with(" settings");
    if vague_setting && !p.contains_any(ENVIRONMENT_EXCEPTIONS) {
        return Verdict::Exclude;
    }

    if p.words.len() >= 2
        && VAGUE_ENDINGS.iter().any(|e| p.text.ends_with(e))
        && !SPECIFIC_SYSTEMS.contains(&p.text)
    {
        return Verdict::Exclude;
    }

    exclude_if(p.text.contains(" experience ") && p.words.len() >= 3)
}

fn concatenation(p: &Phrase) -> Verdict {
    match p.words.len() {
        1 => {
            let term_count = MASHED_TERMS.iter().filter(|t| p.text.contains(*t)).count();
            exclude_if(
                (p.text.len() > 15 && term_count >= 2) || p.contains_any(MASHED_PATTERNS),
            )
        }
        2 => {
            if ["followup", "follow-up"].iter().any(|t| p.words[0].contains(t)) {
                return Verdict::Exclude;
            }
            let skill_count = p.skill_term_count();
            if skill_count >= 2 && p.words.iter().all(|w| w.ends_with('s')) {
                return Verdict::Exclude;
            }
            exclude_if(skill_count >= 2 && !TWO_WORD_COMPOUNDS.contains(&p.text))
        }
        3 => {
            let skill_count = p.skill_term_count();
            let connected = p.has_connector();
            if skill_count >= 2 && !connected && !THREE_WORD_COMPOUNDS.contains(&p.text) {
                return Verdict::Exclude;
            }
            let plural_terms = p
                .words
                .iter()
                .filter(|w| w.ends_with('s') && SKILL_TERMS.iter().any(|t| w.contains(t)))
                .count();
            exclude_if(plural_terms >= 2 && !connected)
        }
        0 => Verdict::Next,
        n => {
            let skill_count = p.skill_term_count();
            exclude_if(
                skill_count >= 3
                    || (skill_count >= 2 && !p.has_connector())
                    || skill_count as f64 / n as f64 >= 0.6,
            )
        }
    }
}

fn benefit_perk(p: &Phrase) -> Verdict {
    if p.contains_any(PERK_INDICATORS) || p.contains_any(PERK_PATTERNS) {
        return Verdict::Exclude;
    }
    exclude_if(
        p.words.len() <= 3
            && p.words.iter().any(|w| BENEFIT_WORDS.contains(w))
            && !p.contains_any(PROFESSIONAL_BENEFIT_CONTEXTS),
    )
}

fn length_cap(p: &Phrase) -> Verdict {
    if p.words.len() > 5 {
        return Verdict::Exclude;
    }
    if p.words.len() >= 4 {
        let connectors = p.words.iter().filter(|w| LOOSE_CONNECTORS.contains(w)).count();
        let content = p.words.len() - connectors;
        return exclude_if(content >= 4 && connectors <= 1 && !PROFESSIONAL_EXCEPTIONS.contains(&p.text));
    }
    Verdict::Next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_fire_in_order() {
        assert_eq!(deciding_rule("your skills"), Some(("pronoun", Verdict::Exclude)));
        assert_eq!(deciding_rule("team spirit"), Some(("abstract-concept", Verdict::Exclude)));
        assert_eq!(deciding_rule("staff skills"), Some(("vague-skills-suffix", Verdict::Exclude)));
        assert_eq!(deciding_rule("project management"), Some(("skill-indicator", Verdict::Keep)));
        assert_eq!(deciding_rule("job description"), Some(("meta-text", Verdict::Exclude)));
        assert_eq!(deciding_rule("paperwork"), Some(("vague-qualifier", Verdict::Exclude)));
        assert_eq!(deciding_rule("the ledger"), Some(("generic-phrase", Verdict::Exclude)));
        assert_eq!(deciding_rule("dental coverage"), Some(("benefit-perk", Verdict::Exclude)));
        assert_eq!(deciding_rule("python"), None);
    }

    #[test]
    fn test_pronoun_beats_skill_indicator() {
        assert!(is_non_skill_phrase("our compliance program"));
        assert!(!is_non_skill_phrase("compliance program"));
    }

    #[test]
    fn test_technical_skills_suffix_survives() {
        assert!(!is_non_skill_phrase("python skills"));
        assert!(is_non_skill_phrase("core work skills"));
    }

    #[test]
    fn test_concatenation_heuristics() {
        assert!(is_non_skill_phrase("accountingfinance"));
        assert!(is_non_skill_phrase("checks dispute invoices"));
        assert!(!is_non_skill_phrase("journal entries"));
        assert!(!is_non_skill_phrase("balance sheet"));
        assert!(!is_non_skill_phrase("month end close"));
    }

    #[test]
    fn test_length_cap() {
        assert!(is_non_skill_phrase("quickbooks sage netsuite excel macros tableau"));
        assert!(is_non_skill_phrase("site visits quickbooks excel"));
        assert!(!is_non_skill_phrase("certified public accountant"));
    }

    #[test]
    fn test_deterministic() {
        for phrase in ["accounts payable", "great culture", "sql", "their data"] {
            let first = is_non_skill_phrase(phrase);
            for _ in 0..5 {
                assert_eq!(is_non_skill_phrase(phrase), first);
            }
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(is_non_skill_phrase("Team Spirit"), is_non_skill_phrase("team spirit"));
        assert!(!is_non_skill_phrase("Accounts Payable"));
    }
}
