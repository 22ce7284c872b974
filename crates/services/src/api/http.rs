use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use lingo_core::model::{SessionId, Skill, UserId};

use super::{LearningApi, SubmitOutcome};
use crate::config::SolverConfig;
use crate::error::ApiError;
use crate::sessions::SessionRequest;

/// `LearningApi` backed by the service's HTTP+JSON endpoints.
#[derive(Clone)]
pub struct HttpLearningApi {
    client: Client,
    base_url: Url,
    token: String,
}

impl HttpLearningApi {
    /// Build a client that sends the configured user agent and bearer token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the underlying client cannot be constructed.
    pub fn new(config: &SolverConfig) -> Result<Self, ApiError> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.status().is_success() {
        return Err(ApiError::HttpStatus(response.status()));
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl LearningApi for HttpLearningApi {
    async fn find_user_id(&self, username: &str) -> Result<Option<UserId>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("users")?)
            .bearer_auth(&self.token)
            .query(&[("username", username), ("fields", "users{id}")])
            .send()
            .await?;

        let body: UsersResponse = read_json(response).await?;
        Ok(body.users.into_iter().next().map(|user| user.id))
    }

    async fn course_skills(&self, user_id: UserId) -> Result<Vec<Vec<Skill>>, ApiError> {
        let response = self
            .client
            .get(self.endpoint(&format!("users/{user_id}"))?)
            .bearer_auth(&self.token)
            .query(&[("fields", "currentCourse{skills}")])
            .send()
            .await?;

        let body: CourseResponse = read_json(response).await?;
        Ok(body.current_course.skills)
    }

    async fn create_session(&self, request: &SessionRequest) -> Result<Value, ApiError> {
        let response = self
            .client
            .post(self.endpoint("sessions")?)
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await?;

        read_json(response).await
    }

    async fn update_session(
        &self,
        id: &SessionId,
        body: &Value,
    ) -> Result<SubmitOutcome, ApiError> {
        let response = self
            .client
            .put(self.endpoint(&format!("sessions/{id}"))?)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(SubmitOutcome::Accepted);
        }
        // The body is only used for the log line; a failed read leaves it empty.
        let body = response.text().await.unwrap_or_default();
        Ok(SubmitOutcome::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[derive(Debug, Deserialize)]
struct UsersResponse {
    users: Vec<UserRow>,
}

#[derive(Debug, Deserialize)]
struct UserRow {
    id: UserId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CourseResponse {
    current_course: CurrentCourse,
}

#[derive(Debug, Deserialize)]
struct CurrentCourse {
    skills: Vec<Vec<Skill>>,
}
