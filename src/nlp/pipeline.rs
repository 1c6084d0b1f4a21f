// file: src/nlp/pipeline.rs
// description: tokenization, part-of-speech tagging, noun chunks and entity spans
// reference: rule-based english tagging over the lexicon

use crate::nlp::lexicon::{self, lemmatize};
use crate::parser::split_sentences;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Verb,
    Aux,
    Adjective,
    Adverb,
    Determiner,
    Pronoun,
    Adposition,
    Conjunction,
    Number,
    Punctuation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub lower: String,
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub past_participle: bool,
}

impl Token {
    pub fn is_punct(&self) -> bool {
        self.pos == PartOfSpeech::Punctuation
    }

    pub fn is_alpha(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_alphabetic)
    }

    pub fn is_content(&self) -> bool {
        matches!(
            self.pos,
            PartOfSpeech::Noun | PartOfSpeech::ProperNoun | PartOfSpeech::Adjective
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedSentence {
    pub text: String,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedText {
    pub sentences: Vec<ParsedSentence>,
    pub entities: Vec<String>,
    pub noun_chunks: Vec<String>,
}

impl ParsedText {
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.sentences.iter().flat_map(|s| s.tokens.iter())
    }

    pub fn sentence_texts(&self) -> Vec<String> {
        self.sentences.iter().map(|s| s.text.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Sentence segmentation, tagging and phrase spans over plain text.
pub trait LanguagePipeline: Send + Sync {
    fn parse(&self, text: &str) -> ParsedText;
}

const LEADING_PUNCT: &[char] = &['"', '\'', '(', '[', '{', '<', '“', '‘', '`'];
const TRAILING_PUNCT: &[char] = &[
    ',', ';', ':', '!', '?', ')', ']', '}', '>', '"', '\'', '.', '”', '’', '`',
];

/// Lexicon and suffix driven tagger. Deterministic and allocation-light.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedPipeline;

impl RuleBasedPipeline {
    pub fn new() -> Self {
        Self
    }

    fn split_words(sentence: &str) -> Vec<String> {
        let mut words = Vec::new();

        for chunk in sentence.split_whitespace() {
            let mut core = chunk;
            let mut leading = Vec::new();
            while let Some(c) = core.chars().next() {
                if !LEADING_PUNCT.contains(&c) {
                    break;
                }
                leading.push(c.to_string());
                core = &core[c.len_utf8()..];
            }

            let mut trailing = Vec::new();
            while let Some(c) = core.chars().last() {
                if !TRAILING_PUNCT.contains(&c) {
                    break;
                }
                trailing.push(c.to_string());
                core = &core[..core.len() - c.len_utf8()];
            }
            trailing.reverse();

            words.extend(leading);
            if !core.is_empty() {
                words.push(core.to_string());
            }
            words.extend(trailing);
        }

        words
    }

    fn is_capitalized(word: &str) -> bool {
        word.chars().next().is_some_and(char::is_uppercase)
    }

    fn is_acronym(word: &str) -> bool {
        let letters = word.chars().filter(|c| c.is_alphabetic()).count();
        (2..=6).contains(&letters)
            && word.chars().all(|c| c.is_uppercase() || c == '&' || c == '/' || c.is_ascii_digit())
    }

    fn tag_sentence(&self, sentence: &str) -> Vec<Token> {
        let words = Self::split_words(sentence);
        let mut tokens: Vec<Token> = Vec::with_capacity(words.len());

        for (i, word) in words.iter().enumerate() {
            let lower = word.to_lowercase();
            let lemma = lemmatize(&lower);
            let previous = tokens.iter().rev().find(|t| !t.is_punct());
            let sentence_start = previous.is_none();
            let next_capitalized = words
                .get(i + 1)
                .is_some_and(|w| Self::is_capitalized(w));

            let pos = Self::classify(word, &lower, &lemma, previous, sentence_start, next_capitalized);
            let past_participle = pos == PartOfSpeech::Verb && lexicon::is_participle(&lower);

            tokens.push(Token {
                text: word.clone(),
                lower,
                lemma,
                pos,
                past_participle,
            });
        }

        tokens
    }

    fn classify(
        word: &str,
        lower: &str,
        lemma: &str,
        previous: Option<&Token>,
        sentence_start: bool,
        next_capitalized: bool,
    ) -> PartOfSpeech {
        if !word.chars().any(char::is_alphanumeric) {
            return PartOfSpeech::Punctuation;
        }
        let first_alnum = word.chars().find(|c| c.is_alphanumeric());
        if first_alnum.is_some_and(|c| c.is_ascii_digit()) {
            return PartOfSpeech::Number;
        }
        if lexicon::DETERMINERS.contains(lower) {
            return PartOfSpeech::Determiner;
        }
        if lexicon::PRONOUNS.contains(lower) {
            return PartOfSpeech::Pronoun;
        }
        if lexicon::ADPOSITIONS.contains(lower) {
            return PartOfSpeech::Adposition;
        }
        if lexicon::CONJUNCTIONS.contains(lower) {
            return PartOfSpeech::Conjunction;
        }
        if lexicon::AUXILIARIES.contains(lower) {
            return PartOfSpeech::Aux;
        }
        if Self::is_acronym(word) {
            return PartOfSpeech::ProperNoun;
        }

        if lexicon::is_verb_lemma(lemma) && Self::acts_as_verb(lower, lemma, previous, sentence_start) {
            return PartOfSpeech::Verb;
        }

        if Self::is_capitalized(word) && (!sentence_start || next_capitalized) {
            return PartOfSpeech::ProperNoun;
        }
        if lexicon::ADVERBS.contains(lower) {
            return PartOfSpeech::Adverb;
        }
        if lexicon::ADJECTIVES.contains(lower) || Self::has_adjective_suffix(lower) {
            return PartOfSpeech::Adjective;
        }
        if lower.ends_with("ly") && lower.chars().count() > 4 {
            return PartOfSpeech::Adverb;
        }
        if lower.ends_with("ed") && lower.chars().count() > 4 {
            return PartOfSpeech::Adjective;
        }

        PartOfSpeech::Noun
    }

    fn acts_as_verb(lower: &str, lemma: &str, previous: Option<&Token>, sentence_start: bool) -> bool {
        let after_subject_or_aux = previous.is_some_and(|p| {
            p.pos == PartOfSpeech::Aux
                || lexicon::SUBJECT_PRONOUNS.contains(p.lower.as_str())
                || p.lower == "to"
                || p.pos == PartOfSpeech::Adverb
        });

        if lexicon::is_participle(lower) && lower != lemma {
            return true;
        }
        if lower.ends_with("ing") && lower != lemma {
            return !lexicon::NOMINAL_GERUNDS.contains(lower);
        }
        if lower.ends_with('s') && lower != lemma {
            return previous.is_some_and(|p| matches!(p.lower.as_str(), "he" | "she" | "it" | "who"));
        }
        sentence_start || after_subject_or_aux
    }

    fn has_adjective_suffix(lower: &str) -> bool {
        lower.chars().count() > 5
            && ["al", "ive", "ous", "ful", "able", "ible", "ic"]
                .iter()
                .any(|suffix| lower.ends_with(suffix))
    }

    fn flush_chunk(current: &mut Vec<&Token>, chunks: &mut Vec<String>) {
        let is_nominal = |t: &&Token| matches!(t.pos, PartOfSpeech::Noun | PartOfSpeech::ProperNoun);
        while current.last().is_some_and(|t| !is_nominal(t)) {
            current.pop();
        }
        if current.iter().any(is_nominal) {
            let text: Vec<&str> = current.iter().map(|t| t.text.as_str()).collect();
            chunks.push(text.join(" "));
        }
        current.clear();
    }

    fn noun_chunks(tokens: &[Token]) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current: Vec<&Token> = Vec::new();

        for token in tokens {
            let opens_chunk = token.pos == PartOfSpeech::Determiner
                || lexicon::POSSESSIVES.contains(token.lower.as_str());
            let continues_chunk = token.is_content() || token.pos == PartOfSpeech::Number;

            if opens_chunk {
                Self::flush_chunk(&mut current, &mut chunks);
                current.push(token);
            } else if continues_chunk {
                current.push(token);
            } else {
                Self::flush_chunk(&mut current, &mut chunks);
            }
        }
        Self::flush_chunk(&mut current, &mut chunks);

        chunks
    }

    fn entities(tokens: &[Token]) -> Vec<String> {
        let mut entities = Vec::new();
        let mut run: Vec<&str> = Vec::new();

        for token in tokens {
            if token.pos == PartOfSpeech::ProperNoun {
                run.push(&token.text);
            } else if !run.is_empty() {
                entities.push(run.join(" "));
                run.clear();
            }
        }
        if !run.is_empty() {
            entities.push(run.join(" "));
        }

        entities
    }
}

impl LanguagePipeline for RuleBasedPipeline {
    fn parse(&self, text: &str) -> ParsedText {
        let mut parsed = ParsedText::default();

        for sentence in split_sentences(text) {
            let tokens = self.tag_sentence(&sentence);
            parsed.noun_chunks.extend(Self::noun_chunks(&tokens));
            parsed.entities.extend(Self::entities(&tokens));
            parsed.sentences.push(ParsedSentence {
                text: sentence,
                tokens,
            });
        }

        parsed
    }
}
