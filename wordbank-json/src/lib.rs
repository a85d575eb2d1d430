use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::task;
use wordbank_core::{
    generate_topic, repo::Repository, Category, CategoryId, CoreError, Question, QuestionId,
    QuizDraft, QuizResult, ResultId, User, UserId, VocabEntry, VocabId, DEFAULT_ROLE,
};

pub mod paths;

const FILE_VERSION: u32 = 1;

#[derive(Clone, Serialize, Deserialize)]
struct FileImage {
    version: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    users: Vec<User>,
    categories: Vec<Category>,
    vocabs: Vec<VocabEntry>,
    questions: Vec<Question>,
    results: Vec<QuizResult>,
}

#[derive(Default, Clone)]
struct State {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    users: HashMap<UserId, User>,
    categories: HashMap<CategoryId, Category>,
    vocabs: HashMap<VocabId, VocabEntry>,
    questions: HashMap<QuestionId, Question>,
    results: HashMap<ResultId, QuizResult>,
    next_id: i64,
}

impl State {
    fn new_empty() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            next_id: 1,
            ..Self::default()
        }
    }

    fn alloc_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn to_image(&self) -> FileImage {
        FileImage {
            version: FILE_VERSION,
            created_at: self.created_at,
            updated_at: self.updated_at,
            users: sorted_by_id(self.users.values().cloned(), |u| u.id),
            categories: sorted_by_id(self.categories.values().cloned(), |c| c.id),
            vocabs: sorted_by_id(self.vocabs.values().cloned(), |v| v.id),
            questions: sorted_by_id(self.questions.values().cloned(), |q| q.id),
            results: sorted_by_id(self.results.values().cloned(), |r| r.id),
        }
    }

    fn from_image(img: FileImage) -> Self {
        let mut st = Self {
            created_at: img.created_at,
            updated_at: img.updated_at,
            next_id: 1,
            ..Self::default()
        };
        let mut max_id = 0i64;
        for u in img.users {
            max_id = max_id.max(u.id);
            st.users.insert(u.id, u);
        }
        for c in img.categories {
            max_id = max_id.max(c.id);
            st.categories.insert(c.id, c);
        }
        for v in img.vocabs {
            max_id = max_id.max(v.id);
            st.vocabs.insert(v.id, v);
        }
        for q in img.questions {
            max_id = max_id.max(q.id);
            st.questions.insert(q.id, q);
        }
        for r in img.results {
            max_id = max_id.max(r.id);
            st.results.insert(r.id, r);
        }
        st.next_id = max_id + 1;
        st
    }
}

fn sorted_by_id<T, F: Fn(&T) -> i64>(iter: impl Iterator<Item = T>, key: F) -> Vec<T> {
    let mut v: Vec<T> = iter.collect();
    v.sort_by_key(key);
    v
}

/// File-backed collection store: the WordBank counterpart of a json-server
/// style REST backend. All collections live in one versioned file, written
/// atomically with timestamped backups.
pub struct JsonStore {
    path: PathBuf,
    backups_dir: PathBuf,
    max_backups: usize,
    state: RwLock<State>,
}

impl JsonStore {
    pub async fn open_default() -> Result<Self, CoreError> {
        let (file, backups) = paths::default_store_file();
        Self::open_with(file, backups, 10).await
    }

    pub async fn open_with(
        path: PathBuf,
        backups_dir: PathBuf,
        max_backups: usize,
    ) -> Result<Self, CoreError> {
        ensure_parent_dirs(&path)?;
        ensure_dir(&backups_dir)?;
        let state = load_or_init(&path).await?;
        Ok(Self {
            path,
            backups_dir,
            max_backups: max_backups.max(1),
            state: RwLock::new(state),
        })
    }

    async fn save(&self) -> Result<(), CoreError> {
        let snapshot = {
            let mut s = self.state.write();
            s.updated_at = Utc::now();
            s.to_image()
        };
        let path = self.path.clone();
        let backups = self.backups_dir.clone();
        let keep = self.max_backups;

        task::spawn_blocking(move || write_with_backup(&path, &backups, keep, &snapshot))
            .await
            .map_err(|_| CoreError::Storage("io"))?
            .map_err(|_| CoreError::Storage("io"))?;
        Ok(())
    }
}

fn ensure_parent_dirs(path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    Ok(())
}

fn ensure_dir(path: &Path) -> Result<(), CoreError> {
    fs::create_dir_all(path).map_err(|_| CoreError::Storage("io"))
}

async fn load_or_init(path: &Path) -> Result<State, CoreError> {
    if path.exists() {
        let p = path.to_path_buf();
        let img: FileImage = task::spawn_blocking(move || {
            let mut f = fs::File::open(&p)?;
            let mut buf = String::new();
            f.read_to_string(&mut buf)?;
            let v = serde_json::from_str::<FileImage>(&buf)?;
            Ok::<FileImage, std::io::Error>(v)
        })
        .await
        .map_err(|_| CoreError::Storage("io"))
        .and_then(|r| r.map_err(|_| CoreError::Storage("io")))?;
        let mut st = State::from_image(img);
        st.updated_at = Utc::now();
        Ok(st)
    } else {
        let st = State::new_empty();
        let img = st.to_image();
        write_with_backup(path, &path.with_extension("backups"), 1, &img)
            .map_err(|_| CoreError::Storage("io"))?;
        Ok(st)
    }
}

fn write_with_backup(
    path: &Path,
    backups_dir: &Path,
    max_backups: usize,
    img: &FileImage,
) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::create_dir_all(backups_dir)?;

    let json = serde_json::to_vec_pretty(img).expect("serialize");
    let mut tmp = NamedTempFile::new_in(path.parent().unwrap_or_else(|| Path::new(".")))?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    let _ = fs::remove_file(path);
    tmp.persist(path)?;

    // Backup rotation
    let ts = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let backup_name = format!("wordbank-{ts}.json");
    let backup_path = backups_dir.join(backup_name);
    let mut btmp = NamedTempFile::new_in(backups_dir)?;
    btmp.write_all(&json)?;
    btmp.flush()?;
    let _ = fs::remove_file(&backup_path);
    btmp.persist(&backup_path)?;

    rotate_backups(backups_dir, max_backups)?;

    Ok(())
}

fn rotate_backups(dir: &Path, keep: usize) -> Result<(), std::io::Error> {
    let mut entries: Vec<_> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    entries.sort_by_key(|e| e.metadata().and_then(|m| m.modified()).ok());
    if entries.len() > keep {
        for e in &entries[0..entries.len() - keep] {
            let _ = fs::remove_file(e.path());
        }
    }
    Ok(())
}

fn validate_question(question: &str, options: &[String], answer: &str) -> Result<(), CoreError> {
    if question.trim().is_empty() {
        return Err(CoreError::Invalid("question text is empty"));
    }
    if options.len() < 2 {
        return Err(CoreError::Invalid("a question needs at least two options"));
    }
    if !options.iter().any(|o| o == answer) {
        return Err(CoreError::Invalid("answer must be one of the options"));
    }
    Ok(())
}

use async_trait::async_trait;

#[async_trait]
impl Repository for JsonStore {
    async fn register_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, CoreError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(CoreError::Invalid("email and password are required"));
        }
        let user = {
            let mut s = self.state.write();
            if s.users.values().any(|u| u.email.eq_ignore_ascii_case(email)) {
                return Err(CoreError::Conflict("email already exists"));
            }
            let user = User {
                id: s.alloc_id(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                role: DEFAULT_ROLE.to_string(),
            };
            s.users.insert(user.id, user.clone());
            user
        };
        self.save().await?;
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, CoreError> {
        let s = self.state.read();
        Ok(sorted_by_id(s.users.values().cloned(), |u| u.id))
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, CoreError> {
        let s = self.state.read();
        s.users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email) && u.password == password)
            .cloned()
            .ok_or(CoreError::NotFound("user"))
    }

    async fn create_category(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::Invalid("category name is empty"));
        }
        let category = {
            let mut s = self.state.write();
            if s.categories
                .values()
                .any(|c| c.name.trim().eq_ignore_ascii_case(name))
            {
                return Err(CoreError::Conflict("category name already exists"));
            }
            let category = Category {
                id: s.alloc_id(),
                name: name.to_string(),
                topic: generate_topic(name),
                description: description.map(|d| d.to_string()),
            };
            s.categories.insert(category.id, category.clone());
            category
        };
        self.save().await?;
        Ok(category)
    }

    async fn get_category(&self, id: CategoryId) -> Result<Category, CoreError> {
        let s = self.state.read();
        s.categories
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound("category"))
    }

    async fn list_categories(&self, topic: Option<&str>) -> Result<Vec<Category>, CoreError> {
        let s = self.state.read();
        let mut v = sorted_by_id(s.categories.values().cloned(), |c| c.id);
        if let Some(t) = topic {
            v.retain(|c| c.topic == t);
        }
        Ok(v)
    }

    async fn update_category(&self, category: &Category) -> Result<Category, CoreError> {
        let name = category.name.trim();
        if name.is_empty() {
            return Err(CoreError::Invalid("category name is empty"));
        }
        let updated = {
            let mut s = self.state.write();
            if !s.categories.contains_key(&category.id) {
                return Err(CoreError::NotFound("category"));
            }
            if s.categories
                .values()
                .any(|c| c.id != category.id && c.name.trim().eq_ignore_ascii_case(name))
            {
                return Err(CoreError::Conflict("category name already exists"));
            }
            let updated = Category {
                id: category.id,
                name: name.to_string(),
                topic: generate_topic(name),
                description: category.description.clone(),
            };
            s.categories.insert(updated.id, updated.clone());
            updated
        };
        self.save().await?;
        Ok(updated)
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), CoreError> {
        {
            let mut s = self.state.write();
            if s.categories.remove(&id).is_none() {
                return Err(CoreError::NotFound("category"));
            }
        }
        self.save().await
    }

    async fn add_vocab(
        &self,
        word: &str,
        meaning: &str,
        category_id: CategoryId,
        topic: &str,
    ) -> Result<VocabEntry, CoreError> {
        if word.trim().is_empty() || meaning.trim().is_empty() {
            return Err(CoreError::Invalid("word and meaning are required"));
        }
        let entry = {
            let mut s = self.state.write();
            if !s.categories.contains_key(&category_id) {
                return Err(CoreError::NotFound("category"));
            }
            if s.vocabs
                .values()
                .any(|v| v.topic == topic && v.word.trim().eq_ignore_ascii_case(word.trim()))
            {
                return Err(CoreError::Conflict("word already exists in this topic"));
            }
            let entry = VocabEntry {
                id: s.alloc_id(),
                word: word.trim().to_string(),
                meaning: meaning.trim().to_string(),
                category_id,
                topic: topic.to_string(),
                is_learned: false,
            };
            s.vocabs.insert(entry.id, entry.clone());
            entry
        };
        self.save().await?;
        Ok(entry)
    }

    async fn get_vocab(&self, id: VocabId) -> Result<VocabEntry, CoreError> {
        let s = self.state.read();
        s.vocabs
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound("vocab entry"))
    }

    async fn list_vocabs(
        &self,
        category_id: Option<CategoryId>,
    ) -> Result<Vec<VocabEntry>, CoreError> {
        let s = self.state.read();
        let mut v = sorted_by_id(s.vocabs.values().cloned(), |e| e.id);
        if let Some(cid) = category_id {
            v.retain(|e| e.category_id == cid);
        }
        Ok(v)
    }

    async fn update_vocab(&self, entry: &VocabEntry) -> Result<VocabEntry, CoreError> {
        let updated = {
            let mut s = self.state.write();
            let Some(stored) = s.vocabs.get(&entry.id) else {
                return Err(CoreError::NotFound("vocab entry"));
            };
            let mut updated = entry.clone();
            // the learned flag never resets through an edit
            updated.is_learned = stored.is_learned || entry.is_learned;
            s.vocabs.insert(updated.id, updated.clone());
            updated
        };
        self.save().await?;
        Ok(updated)
    }

    async fn delete_vocab(&self, id: VocabId) -> Result<(), CoreError> {
        {
            let mut s = self.state.write();
            if s.vocabs.remove(&id).is_none() {
                return Err(CoreError::NotFound("vocab entry"));
            }
        }
        self.save().await
    }

    async fn set_learned(&self, id: VocabId) -> Result<VocabEntry, CoreError> {
        let entry = {
            let mut s = self.state.write();
            let Some(entry) = s.vocabs.get_mut(&id) else {
                return Err(CoreError::NotFound("vocab entry"));
            };
            entry.is_learned = true;
            entry.clone()
        };
        self.save().await?;
        Ok(entry)
    }

    async fn add_question(
        &self,
        question: &str,
        options: &[String],
        answer: &str,
        category: &str,
    ) -> Result<Question, CoreError> {
        validate_question(question, options, answer)?;
        let q = {
            let mut s = self.state.write();
            if s.questions.values().any(|q| {
                q.category == category && q.question.trim().eq_ignore_ascii_case(question.trim())
            }) {
                return Err(CoreError::Conflict("question already exists in this category"));
            }
            let q = Question {
                id: s.alloc_id(),
                question: question.trim().to_string(),
                options: options.to_vec(),
                answer: answer.to_string(),
                category: category.to_string(),
            };
            s.questions.insert(q.id, q.clone());
            q
        };
        self.save().await?;
        Ok(q)
    }

    async fn list_questions(&self, category: Option<&str>) -> Result<Vec<Question>, CoreError> {
        let s = self.state.read();
        let mut v = sorted_by_id(s.questions.values().cloned(), |q| q.id);
        if let Some(c) = category {
            v.retain(|q| q.category == c);
        }
        Ok(v)
    }

    async fn update_question(&self, question: &Question) -> Result<Question, CoreError> {
        validate_question(&question.question, &question.options, &question.answer)?;
        {
            let mut s = self.state.write();
            if !s.questions.contains_key(&question.id) {
                return Err(CoreError::NotFound("question"));
            }
            if s.questions.values().any(|q| {
                q.id != question.id
                    && q.category == question.category
                    && q.question.trim().eq_ignore_ascii_case(question.question.trim())
            }) {
                return Err(CoreError::Conflict("question already exists in this category"));
            }
            s.questions.insert(question.id, question.clone());
        }
        self.save().await?;
        Ok(question.clone())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), CoreError> {
        {
            let mut s = self.state.write();
            if s.questions.remove(&id).is_none() {
                return Err(CoreError::NotFound("question"));
            }
        }
        self.save().await
    }

    async fn save_result(&self, draft: &QuizDraft) -> Result<QuizResult, CoreError> {
        let result = {
            let mut s = self.state.write();
            let result = QuizResult {
                id: s.alloc_id(),
                date: draft.date,
                category: draft.category.clone(),
                score: draft.score,
                total: draft.total,
                answers: draft.answers.clone(),
            };
            s.results.insert(result.id, result.clone());
            result
        };
        self.save().await?;
        Ok(result)
    }

    async fn list_results(&self) -> Result<Vec<QuizResult>, CoreError> {
        let s = self.state.read();
        Ok(sorted_by_id(s.results.values().cloned(), |r| r.id))
    }
}
