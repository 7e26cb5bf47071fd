use moka::future::Cache;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::models::jobs;
use crate::models::profiles;

/// Errors from the AI matching service. The service is an opaque
/// collaborator; its failures surface as one of these and nothing else.
#[derive(Debug, Error)]
pub enum MatchingError {
    #[error("matching service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("matching service returned HTTP {0}")]
    Status(u16),
    #[error("matching service error: {0}")]
    Upstream(String),
    #[error("matching service returned no usable result")]
    EmptyResult,
}

/// One ranked candidate as returned by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineerMatch {
    pub profile_id: Uuid,
    pub score: f32,
    pub reasoning: String,
}

/// Candidate snapshot sent upstream — only what the model needs to rank.
#[derive(Debug, Serialize)]
struct Candidate {
    profile_id: Uuid,
    headline: Option<String>,
    skills: Vec<String>,
    day_rate: Option<Decimal>,
}

#[derive(Debug, Serialize)]
struct MatchRequest<'a> {
    job_title: &'a str,
    job_description: &'a str,
    job_skills: Vec<String>,
    day_rate: Decimal,
    candidates: Vec<Candidate>,
}

/// Upstream responses carry either a payload or an error string, never both.
#[derive(Debug, Deserialize)]
struct MatchResponse {
    matches: Option<Vec<EngineerMatch>>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct CoachingRequest<'a> {
    headline: Option<&'a str>,
    bio: Option<&'a str>,
    skills: Vec<String>,
    day_rate: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct CoachingResponse {
    insights: Option<String>,
    error: Option<String>,
}

/// Client for the external generative matching service.
///
/// Match results are cached per job for a short TTL — the upstream call is
/// slow and idempotent for an unchanged job snapshot.
#[derive(Clone)]
pub struct MatchingClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    match_cache: Arc<Cache<Uuid, Vec<EngineerMatch>>>,
}

impl MatchingClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let match_cache = Arc::new(
            Cache::builder()
                .time_to_live(std::time::Duration::from_secs(600))
                .max_capacity(1_000)
                .build(),
        );

        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            match_cache,
        }
    }

    pub fn from_env() -> Self {
        let base_url = std::env::var("MATCHING_API_URL").expect("MATCHING_API_URL must be set");
        let api_key = std::env::var("MATCHING_API_KEY").expect("MATCHING_API_KEY must be set");
        Self::new(&base_url, &api_key)
    }

    /// Rank candidate profiles against a job. Cached per job id.
    pub async fn rank_candidates(
        &self,
        job: &jobs::Model,
        candidates: &[profiles::Model],
    ) -> Result<Vec<EngineerMatch>, MatchingError> {
        if let Some(cached) = self.match_cache.get(&job.id).await {
            return Ok(cached);
        }

        debug!("Requesting match ranking for job {}", job.id);

        let body = MatchRequest {
            job_title: &job.title,
            job_description: &job.description,
            job_skills: job.skill_list(),
            day_rate: job.day_rate,
            candidates: candidates
                .iter()
                .map(|p| Candidate {
                    profile_id: p.id,
                    headline: p.headline.clone(),
                    skills: p.skill_list(),
                    day_rate: p.day_rate,
                })
                .collect(),
        };

        let response = self
            .client
            .post(format!("{}/v1/match", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MatchingError::Status(status.as_u16()));
        }

        let parsed: MatchResponse = response.json().await?;
        if let Some(error) = parsed.error {
            return Err(MatchingError::Upstream(error));
        }
        let matches = parsed.matches.ok_or(MatchingError::EmptyResult)?;

        self.match_cache.insert(job.id, matches.clone()).await;
        Ok(matches)
    }

    /// Free-text profile coaching for an engineer. Not cached — the text is
    /// personal and cheap to regenerate relative to its staleness cost.
    pub async fn profile_coaching(
        &self,
        profile: &profiles::Model,
    ) -> Result<String, MatchingError> {
        debug!("Requesting profile coaching for profile {}", profile.id);

        let body = CoachingRequest {
            headline: profile.headline.as_deref(),
            bio: profile.bio.as_deref(),
            skills: profile.skill_list(),
            day_rate: profile.day_rate,
        };

        let response = self
            .client
            .post(format!("{}/v1/coaching", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MatchingError::Status(status.as_u16()));
        }

        let parsed: CoachingResponse = response.json().await?;
        if let Some(error) = parsed.error {
            return Err(MatchingError::Upstream(error));
        }
        parsed.insights.ok_or(MatchingError::EmptyResult)
    }
}
