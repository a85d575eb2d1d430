use axum::http::StatusCode;
use serde::Deserialize;
use wordbank_core::CoreError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterIn {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginIn {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CategoryIn {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabIn {
    pub word: String,
    pub meaning: String,
    pub topic: String,
    pub category_id: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnedPatch {
    pub is_learned: bool,
}

#[derive(Deserialize)]
pub struct QuestionIn {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    pub category: String,
}

pub fn status_of(err: CoreError) -> StatusCode {
    match err {
        CoreError::NotFound(_) => StatusCode::NOT_FOUND,
        CoreError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CoreError::Conflict(_) => StatusCode::CONFLICT,
        CoreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
