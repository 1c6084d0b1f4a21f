// file: src/nlp/lexicon.rs
// description: closed-class word lists, verb vocabulary and suffix lemmatizer
// reference: rule-based english tagging

use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

fn set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

lazy_static! {
    pub static ref DETERMINERS: HashSet<&'static str> = set(&[
        "a", "an", "the", "this", "that", "these", "those", "each", "every", "any", "some",
        "all", "both", "either", "neither", "no", "another", "such",
    ]);

    pub static ref PRONOUNS: HashSet<&'static str> = set(&[
        "i", "me", "we", "us", "you", "he", "him", "she", "her", "it", "they", "them", "my",
        "our", "your", "his", "its", "their", "mine", "ours", "yours", "theirs", "myself",
        "ourselves", "yourself", "themselves", "who", "whom", "whose", "which", "what",
    ]);

    pub static ref POSSESSIVES: HashSet<&'static str> =
        set(&["my", "our", "your", "his", "her", "its", "their", "whose"]);

    pub static ref SUBJECT_PRONOUNS: HashSet<&'static str> =
        set(&["i", "we", "you", "he", "she", "it", "they", "who"]);

    pub static ref ADPOSITIONS: HashSet<&'static str> = set(&[
        "of", "in", "on", "at", "by", "for", "with", "from", "to", "into", "onto", "over",
        "under", "across", "through", "throughout", "within", "without", "about", "between",
        "among", "during", "after", "before", "via", "per", "against", "toward", "towards",
        "upon", "including", "like", "than", "as",
    ]);

    pub static ref CONJUNCTIONS: HashSet<&'static str> = set(&[
        "and", "or", "but", "nor", "yet", "so", "while", "whereas", "because", "although",
        "if", "when", "where", "&",
    ]);

    pub static ref AUXILIARIES: HashSet<&'static str> = set(&[
        "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had",
        "having", "do", "does", "did", "will", "would", "shall", "should", "can", "could",
        "may", "might", "must",
    ]);

    pub static ref ADVERBS: HashSet<&'static str> = set(&[
        "not", "also", "very", "well", "often", "always", "never", "already", "still", "just",
        "then", "there", "here", "now", "annually", "successfully", "directly",
        "independently",
    ]);

    pub static ref ADJECTIVES: HashSet<&'static str> = set(&[
        "new", "strong", "good", "great", "excellent", "senior", "junior", "key", "large",
        "small", "complex", "multiple", "various", "several", "other", "high", "low", "full",
        "major", "detailed", "accurate", "timely", "annual", "daily", "weekly", "monthly",
        "quarterly", "cross-functional", "end-to-end", "fast-paced", "internal", "external",
        "global", "local", "first", "last", "next", "best", "top", "ad-hoc", "able",
    ]);

    /// Verb lemmas the tagger recognizes.
    pub static ref VERBS: HashSet<&'static str> = set(&[
        "help", "assist", "support", "aid", "contribute", "participate", "work", "handle", "do",
        "perform", "manage", "implement", "execute", "conduct", "process", "prepare", "create",
        "develop", "maintain", "coordinate", "organize", "review", "analyze", "resolve",
        "complete", "lead", "own", "direct", "establish", "spearhead", "architect", "pioneer",
        "transform", "drive", "launch", "build", "design", "optimize", "streamline", "deliver",
        "orchestrate", "champion", "overhaul", "restructure", "reconcile", "oversee",
        "administer", "supervise", "ensure", "generate", "increase", "decrease", "reduce",
        "improve", "enhance", "achieve", "save", "mentor", "coach", "train", "hire", "recruit",
        "negotiate", "plan", "forecast", "budget", "audit", "report", "track", "monitor",
        "approve", "authorize", "decide", "determine", "select", "choose", "present",
        "communicate", "collaborate", "partner", "serve", "use", "utilize", "write", "run",
        "make", "grow", "take", "give", "apply", "automate", "migrate", "deploy", "test",
        "document", "identify", "evaluate", "assess", "research", "investigate", "facilitate",
        "guide", "advise", "consult", "sell", "market", "promote", "expand", "scale", "cut",
        "lower", "raise", "win", "secure", "close", "file", "post", "record", "enter", "pay",
        "invoice", "bill", "collect", "verify", "compile", "calculate", "compute", "model",
        "schedule", "allocate", "purchase", "procure", "source", "ship", "install", "configure",
        "troubleshoot", "repair", "upgrade", "integrate", "engineer", "program", "code",
        "debug", "refactor", "teach", "instruct", "onboard", "interview", "represent",
        "answer", "respond", "update", "modify", "revise", "edit", "publish", "produce",
        "author", "draft", "define", "set", "accelerate", "consolidate", "centralize",
        "standardize", "simplify", "eliminate", "prevent", "mitigate", "comply", "enforce",
        "head", "found", "join", "move", "transition", "earn", "receive", "obtain", "attend",
        "graduate", "study", "learn", "need", "require", "seek", "offer", "provide", "include",
        "prioritize", "exceed", "meet", "bring", "buy", "think", "keep", "send", "spend",
        "hold", "find", "speak", "understand", "undertake", "rebuild", "rewrite", "begin",
        "see", "go", "get", "become", "show", "demonstrate",
    ]);

    /// Gerund forms that usually name a discipline rather than an action.
    pub static ref NOMINAL_GERUNDS: HashSet<&'static str> = set(&[
        "accounting", "planning", "budgeting", "forecasting", "marketing", "engineering",
        "training", "reporting", "bookkeeping", "consulting", "banking", "auditing",
        "recruiting", "onboarding", "programming", "modeling", "modelling", "manufacturing",
        "purchasing", "invoicing", "pricing", "staffing", "scheduling", "testing", "learning",
        "processing", "building", "funding", "spending", "hiring", "coaching", "mentoring",
        "writing", "networking", "billing", "costing", "sourcing", "shipping", "sales",
        "trading", "lending", "underwriting", "nursing", "teaching", "advertising", "branding",
        "coding", "meeting", "meetings", "housing", "offering", "setting", "settings",
        "understanding", "problem-solving", "troubleshooting", "tracking", "filing",
    ]);

    static ref IRREGULAR: HashMap<&'static str, &'static str> = [
        ("led", "lead"), ("built", "build"), ("drove", "drive"), ("driven", "drive"),
        ("ran", "run"), ("made", "make"), ("wrote", "write"), ("written", "write"),
        ("did", "do"), ("done", "do"), ("was", "be"), ("were", "be"), ("been", "be"),
        ("is", "be"), ("am", "be"), ("are", "be"), ("being", "be"), ("had", "have"),
        ("has", "have"), ("grew", "grow"), ("grown", "grow"), ("took", "take"),
        ("taken", "take"), ("gave", "give"), ("given", "give"), ("began", "begin"),
        ("begun", "begin"), ("brought", "bring"), ("bought", "buy"), ("sold", "sell"),
        ("taught", "teach"), ("thought", "think"), ("won", "win"), ("kept", "keep"),
        ("met", "meet"), ("oversaw", "oversee"), ("overseen", "oversee"), ("spoke", "speak"),
        ("spoken", "speak"), ("chose", "choose"), ("chosen", "choose"), ("saw", "see"),
        ("seen", "see"), ("went", "go"), ("gone", "go"), ("found", "find"), ("held", "hold"),
        ("spent", "spend"), ("sent", "send"), ("understood", "understand"),
        ("undertook", "undertake"), ("rebuilt", "rebuild"), ("rewrote", "rewrite"),
        ("paid", "pay"), ("became", "become"), ("got", "get"), ("shown", "show"),
    ]
    .into_iter()
    .collect();

    static ref PARTICIPLES: HashSet<&'static str> = set(&[
        "led", "built", "driven", "made", "written", "done", "grown", "taken", "given",
        "begun", "brought", "bought", "sold", "taught", "kept", "met", "overseen", "spoken",
        "chosen", "seen", "found", "held", "spent", "sent", "understood", "rebuilt", "paid",
        "shown", "run", "set", "cut",
    ]);
}

/// Base-form candidates for a stem left after stripping a suffix.
fn strip_candidates(stem: &str) -> Vec<String> {
    let mut candidates = vec![stem.to_string(), format!("{}e", stem)];
    let chars: Vec<char> = stem.chars().collect();
    if chars.len() >= 2 && chars[chars.len() - 1] == chars[chars.len() - 2] {
        candidates.push(chars[..chars.len() - 1].iter().collect());
    }
    candidates
}

fn pick_lemma(stem: &str) -> String {
    strip_candidates(stem)
        .into_iter()
        .find(|c| VERBS.contains(c.as_str()))
        .unwrap_or_else(|| stem.to_string())
}

/// Lowercase base form of `word`. Known verbs are resolved exactly;
/// unknown words get a best-effort suffix strip.
pub fn lemmatize(word: &str) -> String {
    let lower = word.to_lowercase();
    if let Some(base) = IRREGULAR.get(lower.as_str()) {
        return (*base).to_string();
    }
    if VERBS.contains(lower.as_str()) || lower.chars().count() < 4 {
        return lower;
    }

    if let Some(stem) = lower.strip_suffix("ied") {
        return format!("{}y", stem);
    }
    if let Some(stem) = lower.strip_suffix("ed")
        && stem.chars().count() >= 2
    {
        return pick_lemma(stem);
    }
    if let Some(stem) = lower.strip_suffix("ing")
        && stem.chars().count() >= 2
    {
        return pick_lemma(stem);
    }
    if let Some(stem) = lower.strip_suffix("ies") {
        return format!("{}y", stem);
    }
    if let Some(stem) = lower.strip_suffix("es")
        && VERBS.contains(stem)
    {
        return stem.to_string();
    }
    if !lower.ends_with("ss")
        && let Some(stem) = lower.strip_suffix('s')
    {
        return stem.to_string();
    }

    lower
}

/// True for `-ed` forms and irregular participles.
pub fn is_participle(word: &str) -> bool {
    let lower = word.to_lowercase();
    PARTICIPLES.contains(lower.as_str()) || (lower.ends_with("ed") && lower.chars().count() > 3)
}

pub fn is_verb_lemma(lemma: &str) -> bool {
    VERBS.contains(lemma)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lemmatize_regular_forms() {
        assert_eq!(lemmatize("managed"), "manage");
        assert_eq!(lemmatize("Managing"), "manage");
        assert_eq!(lemmatize("reconciled"), "reconcile");
        assert_eq!(lemmatize("planned"), "plan");
        assert_eq!(lemmatize("owned"), "own");
        assert_eq!(lemmatize("applied"), "apply");
        assert_eq!(lemmatize("processes"), "process");
        assert_eq!(lemmatize("reports"), "report");
        assert_eq!(lemmatize("spearheaded"), "spearhead");
    }

    #[test]
    fn test_lemmatize_irregular_forms() {
        assert_eq!(lemmatize("led"), "lead");
        assert_eq!(lemmatize("built"), "build");
        assert_eq!(lemmatize("drove"), "drive");
        assert_eq!(lemmatize("was"), "be");
    }

    #[test]
    fn test_lemmatize_leaves_short_and_base_words() {
        assert_eq!(lemmatize("sql"), "sql");
        assert_eq!(lemmatize("process"), "process");
        assert_eq!(lemmatize("business"), "business");
    }

    #[test]
    fn test_participles() {
        assert!(is_participle("reviewed"));
        assert!(is_participle("led"));
        assert!(!is_participle("manage"));
    }
}
