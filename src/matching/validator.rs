// file: src/matching/validator.rs
// description: optional external gap validation with a no-op default and fail-open wrapper
// reference: openai-compatible chat completions api

use crate::config::ValidatorConfig;
use crate::error::{AnalysisError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const PROMPT_TEXT_CHARS: usize = 3000;
const PROMPT_LIST_ITEMS: usize = 20;

/// Gaps that remain after validation plus gaps found present after all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub gaps: Vec<String>,
    pub recovered: Vec<String>,
}

impl ValidationOutcome {
    pub fn unchanged(gaps: &[String]) -> Self {
        Self {
            gaps: gaps.to_vec(),
            recovered: Vec::new(),
        }
    }
}

#[async_trait]
pub trait GapValidator: Send + Sync {
    async fn validate(
        &self,
        resume: &str,
        jd: &str,
        gaps: &[String],
        matches: &[String],
    ) -> Result<ValidationOutcome>;
}

/// Leaves gaps untouched.
#[derive(Debug, Clone, Default)]
pub struct NoopValidator;

#[async_trait]
impl GapValidator for NoopValidator {
    async fn validate(
        &self,
        _resume: &str,
        _jd: &str,
        gaps: &[String],
        _matches: &[String],
    ) -> Result<ValidationOutcome> {
        Ok(ValidationOutcome::unchanged(gaps))
    }
}

/// Runs `validator` under `timeout`. Errors and timeouts return the input
/// gaps unchanged.
pub async fn validate_or_passthrough(
    validator: &dyn GapValidator,
    timeout: Duration,
    resume: &str,
    jd: &str,
    gaps: &[String],
    matches: &[String],
) -> ValidationOutcome {
    if gaps.is_empty() {
        return ValidationOutcome::unchanged(gaps);
    }

    match tokio::time::timeout(timeout, validator.validate(resume, jd, gaps, matches)).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => {
            warn!("Gap validation failed, keeping gaps: {}", e);
            ValidationOutcome::unchanged(gaps)
        }
        Err(_) => {
            warn!("Gap validation timed out after {:?}, keeping gaps", timeout);
            ValidationOutcome::unchanged(gaps)
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct GapVerdict {
    truly_missing: Option<Vec<String>>,
    #[serde(default)]
    present_differently: Vec<String>,
}

/// Asks a chat-completions model which gaps the resume actually covers.
pub struct LlmGapValidator {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
}

impl LlmGapValidator {
    pub fn new(config: &ValidatorConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnalysisError::Validator(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl GapValidator for LlmGapValidator {
    async fn validate(
        &self,
        resume: &str,
        jd: &str,
        gaps: &[String],
        matches: &[String],
    ) -> Result<ValidationOutcome> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_prompt(resume, jd, gaps, matches),
            }],
            max_tokens: self.max_tokens,
            temperature: 0.0,
        };

        debug!("Validating {} gaps with {}", gaps.len(), self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisError::Validator(format!("Failed to send validation request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AnalysisError::Validator(format!(
                "Validation request failed with status {}: {}",
                status, error_text
            )));
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            AnalysisError::Validator(format!("Failed to parse validation response: {}", e))
        })?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        Ok(parse_verdict(&content, gaps))
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

fn join_first(items: &[String], limit: usize) -> String {
    items.iter().take(limit).map(String::as_str).collect::<Vec<_>>().join(", ")
}

pub fn build_prompt(resume: &str, jd: &str, gaps: &[String], matches: &[String]) -> String {
    format!(
        "You are an expert resume analyst. I have analyzed a resume against a job description \
and identified some potential skill gaps. However, my automated extraction may have missed skills \
that are present but phrased differently.

**Resume Text:**
{resume}

**Job Description Text:**
{jd}

**Skills Found as Matches:**
{matches}

**Potential Gaps Identified:**
{gaps}

**Task:**
For each potential gap listed above, determine if it is:
1. TRULY_MISSING: The skill/requirement is genuinely absent from the resume
2. PRESENT_DIFFERENTLY: The skill is present in the resume but described using different terminology or as part of a broader responsibility

Return your analysis as a JSON object with this structure:
{{
    \"truly_missing\": [\"skill1\", \"skill2\", ...],
    \"present_differently\": [\"skill3\", \"skill4\", ...]
}}

Be thorough but strict - only mark something as \"present_differently\" if you can clearly identify where it appears in the resume with similar meaning.",
        resume = truncate_chars(resume, PROMPT_TEXT_CHARS),
        jd = truncate_chars(jd, PROMPT_TEXT_CHARS),
        matches = join_first(matches, PROMPT_LIST_ITEMS),
        gaps = join_first(gaps, PROMPT_LIST_ITEMS),
    )
}

/// Reads the json object between the first `{` and the last `}`. Anything
/// unreadable leaves the gaps unchanged.
pub fn parse_verdict(content: &str, gaps: &[String]) -> ValidationOutcome {
    let (Some(start), Some(end)) = (content.find('{'), content.rfind('}')) else {
        return ValidationOutcome::unchanged(gaps);
    };
    if end <= start {
        return ValidationOutcome::unchanged(gaps);
    }

    match serde_json::from_str::<GapVerdict>(&content[start..=end]) {
        Ok(verdict) => ValidationOutcome {
            gaps: verdict.truly_missing.unwrap_or_else(|| gaps.to_vec()),
            recovered: verdict.present_differently,
        },
        Err(e) => {
            debug!("Unreadable validation verdict: {}", e);
            ValidationOutcome::unchanged(gaps)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn gaps() -> Vec<String> {
        vec!["budgeting".to_string(), "payroll".to_string()]
    }

    struct FailingValidator;

    #[async_trait]
    impl GapValidator for FailingValidator {
        async fn validate(&self, _: &str, _: &str, _: &[String], _: &[String]) -> Result<ValidationOutcome> {
            Err(AnalysisError::Validator("boom".to_string()))
        }
    }

    struct SlowValidator;

    #[async_trait]
    impl GapValidator for SlowValidator {
        async fn validate(&self, _: &str, _: &str, gaps: &[String], _: &[String]) -> Result<ValidationOutcome> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(ValidationOutcome {
                gaps: Vec::new(),
                recovered: gaps.to_vec(),
            })
        }
    }

    #[test]
    fn test_parse_verdict() {
        let content = "Here you go:\n{\"truly_missing\": [\"payroll\"], \"present_differently\": [\"budgeting\"]}\nThanks";
        let outcome = parse_verdict(content, &gaps());
        assert_eq!(outcome.gaps, vec!["payroll".to_string()]);
        assert_eq!(outcome.recovered, vec!["budgeting".to_string()]);
    }

    #[test]
    fn test_parse_verdict_unreadable() {
        assert_eq!(parse_verdict("no json here", &gaps()), ValidationOutcome::unchanged(&gaps()));
        assert_eq!(parse_verdict("{not json}", &gaps()), ValidationOutcome::unchanged(&gaps()));
        assert_eq!(parse_verdict("} {", &gaps()), ValidationOutcome::unchanged(&gaps()));
    }

    #[test]
    fn test_prompt_truncates() {
        let long = "x".repeat(5000);
        let prompt = build_prompt(&long, "jd", &gaps(), &[]);
        assert!(prompt.contains(&"x".repeat(3000)));
        assert!(!prompt.contains(&"x".repeat(3001)));
        assert!(prompt.contains("budgeting, payroll"));
    }

    #[tokio::test]
    async fn test_noop_validator() {
        let outcome = NoopValidator.validate("r", "j", &gaps(), &[]).await.unwrap();
        assert_eq!(outcome, ValidationOutcome::unchanged(&gaps()));
    }

    #[test]
    fn test_no_gaps_skips_validator() {
        let outcome = tokio_test::block_on(validate_or_passthrough(
            &FailingValidator,
            Duration::from_secs(1),
            "r",
            "j",
            &[],
            &[],
        ));
        assert!(outcome.gaps.is_empty());
        assert!(outcome.recovered.is_empty());
    }

    #[tokio::test]
    async fn test_failing_validator_fails_open() {
        let outcome =
            validate_or_passthrough(&FailingValidator, Duration::from_secs(1), "r", "j", &gaps(), &[]).await;
        assert_eq!(outcome, ValidationOutcome::unchanged(&gaps()));
    }

    #[tokio::test]
    async fn test_slow_validator_times_out() {
        let outcome =
            validate_or_passthrough(&SlowValidator, Duration::from_millis(50), "r", "j", &gaps(), &[]).await;
        assert_eq!(outcome, ValidationOutcome::unchanged(&gaps()));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_fails_open() {
        let mut config = crate::config::Config::default_config().validator;
        config.endpoint = "http://127.0.0.1:9/v1/chat/completions".to_string();
        config.timeout_secs = 2;
        let validator = LlmGapValidator::new(&config, "test-key".to_string()).unwrap();

        let outcome =
            validate_or_passthrough(&validator, Duration::from_secs(3), "r", "j", &gaps(), &[]).await;
        assert_eq!(outcome, ValidationOutcome::unchanged(&gaps()));
    }
}
