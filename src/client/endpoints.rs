// ABOUTME: Typed calls of the fitness API built on RequestClient::execute
// ABOUTME: Exercise catalogue, workout history, and profile endpoints

use tracing::instrument;

use super::{ApiRequest, AvatarUpload, RequestClient};
use crate::errors::AppResult;
use crate::models::{AvatarResponse, Exercise, HistoryByDay, LogHistoryRequest, NewAccount, ProfileChange};
use gymlog_core::constants::{endpoints, storage::AVATAR_FIELD};

impl RequestClient {
    /// Muscle groups of the catalogue
    ///
    /// # Errors
    ///
    /// Returns the classified failure of `GET /groups`
    #[instrument(skip(self))]
    pub async fn groups(&self) -> AppResult<Vec<String>> {
        self.execute_json(ApiRequest::get(endpoints::GROUPS)).await
    }

    /// Exercises of one muscle group
    ///
    /// # Errors
    ///
    /// Returns the classified failure of `GET /exercises/bygroup/:group`
    #[instrument(skip(self))]
    pub async fn exercises_by_group(&self, group: &str) -> AppResult<Vec<Exercise>> {
        let path = format!(
            "{}/{}",
            endpoints::EXERCISES_BY_GROUP,
            urlencoding::encode(group)
        );
        self.execute_json(ApiRequest::get(path)).await
    }

    /// A single exercise
    ///
    /// # Errors
    ///
    /// Returns the classified failure of `GET /exercises/:id`
    #[instrument(skip(self))]
    pub async fn exercise(&self, id: &str) -> AppResult<Exercise> {
        let path = format!("{}/{}", endpoints::EXERCISES, urlencoding::encode(id));
        self.execute_json(ApiRequest::get(path)).await
    }

    /// Workout history grouped by day
    ///
    /// # Errors
    ///
    /// Returns the classified failure of `GET /history`
    #[instrument(skip(self))]
    pub async fn history(&self) -> AppResult<Vec<HistoryByDay>> {
        self.execute_json(ApiRequest::get(endpoints::HISTORY)).await
    }

    /// Record a completed exercise
    ///
    /// # Errors
    ///
    /// Returns the classified failure of `POST /history`
    #[instrument(skip(self))]
    pub async fn log_history(&self, exercise_id: &str) -> AppResult<()> {
        let request =
            ApiRequest::post(endpoints::HISTORY).json(&LogHistoryRequest { exercise_id })?;
        self.execute(request).await.map(|_| ())
    }

    /// Submit a profile edit
    ///
    /// # Errors
    ///
    /// Returns the classified failure of `PUT /users`, e.g. a domain error
    /// when the current password is wrong
    #[instrument(skip(self, change))]
    pub async fn update_user(&self, change: &ProfileChange) -> AppResult<()> {
        let request = ApiRequest::put(endpoints::USERS).json(change)?;
        self.execute(request).await.map(|_| ())
    }

    /// Upload a new avatar image
    ///
    /// # Errors
    ///
    /// Returns the classified failure of `PATCH /users/avatar`
    #[instrument(skip(self, upload), fields(file_name = %upload.file_name))]
    pub async fn upload_avatar(&self, upload: AvatarUpload) -> AppResult<AvatarResponse> {
        let request = ApiRequest::patch(endpoints::USERS_AVATAR).multipart(AVATAR_FIELD, upload);
        self.execute_json(request).await
    }

    /// Register a new account; sent without a bearer token
    ///
    /// # Errors
    ///
    /// Returns a domain error when the service rejects the registration
    #[instrument(skip(self, account), fields(email = %account.email))]
    pub async fn register(&self, account: &NewAccount) -> AppResult<()> {
        self.session().auth().register(account).await
    }
}
