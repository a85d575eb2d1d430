use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use wordbank_core::{
    Category, Question, QuizDraft, QuizResult, User, VocabEntry,
};

use crate::api::dto::{
    status_of, CategoryIn, CategoryPatch, LearnedPatch, LoginIn, QuestionIn, RegisterIn, VocabIn,
};
use crate::cli::commands::ensure_category;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn wordbank_core::Repository>,
}

#[derive(Deserialize)]
pub struct CategoryQuery {
    topic: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabQuery {
    category_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct QuestionQuery {
    category: Option<String>,
}

// ===== users =====

pub async fn list_users(State(st): State<Arc<AppState>>) -> Result<Json<Vec<User>>, StatusCode> {
    Ok(Json(st.repo.list_users().await.map_err(status_of)?))
}

pub async fn register_user(
    State(st): State<Arc<AppState>>,
    Json(body): Json<RegisterIn>,
) -> Result<(StatusCode, Json<User>), StatusCode> {
    let user = st
        .repo
        .register_user(&body.first_name, &body.last_name, &body.email, &body.password)
        .await
        .map_err(status_of)?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(st): State<Arc<AppState>>,
    Json(body): Json<LoginIn>,
) -> Result<Json<User>, StatusCode> {
    // any matching record counts as a login
    let user = st
        .repo
        .login(&body.email, &body.password)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    Ok(Json(user))
}

// ===== categories =====

pub async fn list_categories(
    State(st): State<Arc<AppState>>,
    Query(q): Query<CategoryQuery>,
) -> Result<Json<Vec<Category>>, StatusCode> {
    Ok(Json(
        st.repo
            .list_categories(q.topic.as_deref())
            .await
            .map_err(status_of)?,
    ))
}

pub async fn create_category(
    State(st): State<Arc<AppState>>,
    Json(body): Json<CategoryIn>,
) -> Result<(StatusCode, Json<Category>), StatusCode> {
    let c = st
        .repo
        .create_category(&body.name, body.description.as_deref())
        .await
        .map_err(status_of)?;
    Ok((StatusCode::CREATED, Json(c)))
}

pub async fn patch_category(
    State(st): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<CategoryPatch>,
) -> Result<Json<Category>, StatusCode> {
    let mut c = st.repo.get_category(id).await.map_err(status_of)?;
    if let Some(name) = body.name {
        c.name = name;
    }
    if let Some(description) = body.description {
        c.description = Some(description);
    }
    let c = st.repo.update_category(&c).await.map_err(status_of)?;
    Ok(Json(c))
}

pub async fn delete_category(
    State(st): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    st.repo.delete_category(id).await.map_err(status_of)?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== vocabs =====

pub async fn list_vocabs(
    State(st): State<Arc<AppState>>,
    Query(q): Query<VocabQuery>,
) -> Result<Json<Vec<VocabEntry>>, StatusCode> {
    Ok(Json(
        st.repo
            .list_vocabs(q.category_id)
            .await
            .map_err(status_of)?,
    ))
}

pub async fn create_vocab(
    State(st): State<Arc<AppState>>,
    Json(body): Json<VocabIn>,
) -> Result<(StatusCode, Json<VocabEntry>), StatusCode> {
    let category = match body.category_id {
        Some(id) => st.repo.get_category(id).await.map_err(status_of)?,
        // unknown topic: create the category on the fly
        None => ensure_category(&*st.repo, &body.topic)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?,
    };
    let v = st
        .repo
        .add_vocab(&body.word, &body.meaning, category.id, &category.topic)
        .await
        .map_err(status_of)?;
    Ok((StatusCode::CREATED, Json(v)))
}

pub async fn put_vocab(
    State(st): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(mut body): Json<VocabEntry>,
) -> Result<Json<VocabEntry>, StatusCode> {
    body.id = id;
    let v = st.repo.update_vocab(&body).await.map_err(status_of)?;
    Ok(Json(v))
}

pub async fn patch_vocab(
    State(st): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<LearnedPatch>,
) -> Result<Json<VocabEntry>, StatusCode> {
    if !body.is_learned {
        // the learned flag never goes back to false
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let v = st.repo.set_learned(id).await.map_err(status_of)?;
    Ok(Json(v))
}

pub async fn delete_vocab(
    State(st): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    st.repo.delete_vocab(id).await.map_err(status_of)?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== questions =====

pub async fn list_questions(
    State(st): State<Arc<AppState>>,
    Query(q): Query<QuestionQuery>,
) -> Result<Json<Vec<Question>>, StatusCode> {
    Ok(Json(
        st.repo
            .list_questions(q.category.as_deref())
            .await
            .map_err(status_of)?,
    ))
}

pub async fn create_question(
    State(st): State<Arc<AppState>>,
    Json(body): Json<QuestionIn>,
) -> Result<(StatusCode, Json<Question>), StatusCode> {
    let q = st
        .repo
        .add_question(&body.question, &body.options, &body.answer, &body.category)
        .await
        .map_err(status_of)?;
    Ok((StatusCode::CREATED, Json(q)))
}

pub async fn put_question(
    State(st): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(mut body): Json<Question>,
) -> Result<Json<Question>, StatusCode> {
    body.id = id;
    let q = st.repo.update_question(&body).await.map_err(status_of)?;
    Ok(Json(q))
}

pub async fn delete_question(
    State(st): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    st.repo.delete_question(id).await.map_err(status_of)?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== results =====

pub async fn list_results(
    State(st): State<Arc<AppState>>,
) -> Result<Json<Vec<QuizResult>>, StatusCode> {
    Ok(Json(st.repo.list_results().await.map_err(status_of)?))
}

pub async fn create_result(
    State(st): State<Arc<AppState>>,
    Json(body): Json<QuizDraft>,
) -> Result<(StatusCode, Json<QuizResult>), StatusCode> {
    let r = st.repo.save_result(&body).await.map_err(status_of)?;
    Ok((StatusCode::CREATED, Json(r)))
}
