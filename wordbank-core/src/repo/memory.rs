use crate::{
    generate_topic, Category, CategoryId, CoreError, Question, QuestionId, QuizDraft, QuizResult,
    ResultId, User, UserId, VocabEntry, VocabId, DEFAULT_ROLE,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// In-memory repository. Ids are assigned here, monotonically, never by
/// the caller.
#[derive(Default)]
pub struct MemoryRepo {
    users: RwLock<HashMap<UserId, User>>,
    categories: RwLock<HashMap<CategoryId, Category>>,
    vocabs: RwLock<HashMap<VocabId, VocabEntry>>,
    questions: RwLock<HashMap<QuestionId, Question>>,
    results: RwLock<HashMap<ResultId, QuizResult>>,
    next_id: AtomicI64,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self { next_id: AtomicI64::new(1), ..Self::default() }
    }

    fn alloc_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
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

#[async_trait]
impl crate::repo::Repository for MemoryRepo {
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
        let mut m = self.users.write();
        if m.values().any(|u| u.email.eq_ignore_ascii_case(email)) {
            return Err(CoreError::Conflict("email already exists"));
        }
        let user = User {
            id: self.alloc_id(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: DEFAULT_ROLE.to_string(),
        };
        m.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, CoreError> {
        let mut v: Vec<User> = self.users.read().values().cloned().collect();
        v.sort_by_key(|u| u.id);
        Ok(v)
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, CoreError> {
        self.users
            .read()
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
        let mut m = self.categories.write();
        if m.values().any(|c| c.name.trim().eq_ignore_ascii_case(name)) {
            return Err(CoreError::Conflict("category name already exists"));
        }
        let category = Category {
            id: self.alloc_id(),
            name: name.to_string(),
            topic: generate_topic(name),
            description: description.map(|s| s.to_string()),
        };
        m.insert(category.id, category.clone());
        Ok(category)
    }

    async fn get_category(&self, id: CategoryId) -> Result<Category, CoreError> {
        self.categories
            .read()
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound("category"))
    }

    async fn list_categories(&self, topic: Option<&str>) -> Result<Vec<Category>, CoreError> {
        let mut v: Vec<Category> = self.categories.read().values().cloned().collect();
        if let Some(t) = topic {
            v.retain(|c| c.topic == t);
        }
        v.sort_by_key(|c| c.id);
        Ok(v)
    }

    async fn update_category(&self, category: &Category) -> Result<Category, CoreError> {
        let name = category.name.trim();
        if name.is_empty() {
            return Err(CoreError::Invalid("category name is empty"));
        }
        let mut m = self.categories.write();
        if !m.contains_key(&category.id) {
            return Err(CoreError::NotFound("category"));
        }
        if m.values()
            .any(|c| c.id != category.id && c.name.trim().eq_ignore_ascii_case(name))
        {
            return Err(CoreError::Conflict("category name already exists"));
        }
        // the topic slug always follows the name
        let updated = Category {
            id: category.id,
            name: name.to_string(),
            topic: generate_topic(name),
            description: category.description.clone(),
        };
        m.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), CoreError> {
        self.categories
            .write()
            .remove(&id)
            .ok_or(CoreError::NotFound("category"))?;
        Ok(())
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
        if !self.categories.read().contains_key(&category_id) {
            return Err(CoreError::NotFound("category"));
        }
        let mut m = self.vocabs.write();
        if m.values()
            .any(|v| v.topic == topic && v.word.trim().eq_ignore_ascii_case(word.trim()))
        {
            return Err(CoreError::Conflict("word already exists in this topic"));
        }
        let entry = VocabEntry {
            id: self.alloc_id(),
            word: word.trim().to_string(),
            meaning: meaning.trim().to_string(),
            category_id,
            topic: topic.to_string(),
            is_learned: false,
        };
        m.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn get_vocab(&self, id: VocabId) -> Result<VocabEntry, CoreError> {
        self.vocabs
            .read()
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound("vocab entry"))
    }

    async fn list_vocabs(
        &self,
        category_id: Option<CategoryId>,
    ) -> Result<Vec<VocabEntry>, CoreError> {
        let mut v: Vec<VocabEntry> = self.vocabs.read().values().cloned().collect();
        if let Some(cid) = category_id {
            v.retain(|e| e.category_id == cid);
        }
        v.sort_by_key(|e| e.id);
        Ok(v)
    }

    async fn update_vocab(&self, entry: &VocabEntry) -> Result<VocabEntry, CoreError> {
        let mut m = self.vocabs.write();
        let Some(stored) = m.get(&entry.id) else {
            return Err(CoreError::NotFound("vocab entry"));
        };
        // the learned flag never resets through an edit
        let mut updated = entry.clone();
        updated.is_learned = stored.is_learned || entry.is_learned;
        m.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn delete_vocab(&self, id: VocabId) -> Result<(), CoreError> {
        self.vocabs
            .write()
            .remove(&id)
            .ok_or(CoreError::NotFound("vocab entry"))?;
        Ok(())
    }

    async fn set_learned(&self, id: VocabId) -> Result<VocabEntry, CoreError> {
        let mut m = self.vocabs.write();
        let Some(entry) = m.get_mut(&id) else {
            return Err(CoreError::NotFound("vocab entry"));
        };
        entry.is_learned = true;
        Ok(entry.clone())
    }

    async fn add_question(
        &self,
        question: &str,
        options: &[String],
        answer: &str,
        category: &str,
    ) -> Result<Question, CoreError> {
        validate_question(question, options, answer)?;
        let mut m = self.questions.write();
        if m.values().any(|q| {
            q.category == category && q.question.trim().eq_ignore_ascii_case(question.trim())
        }) {
            return Err(CoreError::Conflict("question already exists in this category"));
        }
        let q = Question {
            id: self.alloc_id(),
            question: question.trim().to_string(),
            options: options.to_vec(),
            answer: answer.to_string(),
            category: category.to_string(),
        };
        m.insert(q.id, q.clone());
        Ok(q)
    }

    async fn list_questions(&self, category: Option<&str>) -> Result<Vec<Question>, CoreError> {
        let mut v: Vec<Question> = self.questions.read().values().cloned().collect();
        if let Some(c) = category {
            v.retain(|q| q.category == c);
        }
        v.sort_by_key(|q| q.id);
        Ok(v)
    }

    async fn update_question(&self, question: &Question) -> Result<Question, CoreError> {
        validate_question(&question.question, &question.options, &question.answer)?;
        let mut m = self.questions.write();
        if !m.contains_key(&question.id) {
            return Err(CoreError::NotFound("question"));
        }
        if m.values().any(|q| {
            q.id != question.id
                && q.category == question.category
                && q.question.trim().eq_ignore_ascii_case(question.question.trim())
        }) {
            return Err(CoreError::Conflict("question already exists in this category"));
        }
        m.insert(question.id, question.clone());
        Ok(question.clone())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), CoreError> {
        self.questions
            .write()
            .remove(&id)
            .ok_or(CoreError::NotFound("question"))?;
        Ok(())
    }

    async fn save_result(&self, draft: &QuizDraft) -> Result<QuizResult, CoreError> {
        let result = QuizResult {
            id: self.alloc_id(),
            date: draft.date,
            category: draft.category.clone(),
            score: draft.score,
            total: draft.total,
            answers: draft.answers.clone(),
        };
        self.results.write().insert(result.id, result.clone());
        Ok(result)
    }

    async fn list_results(&self) -> Result<Vec<QuizResult>, CoreError> {
        let mut v: Vec<QuizResult> = self.results.read().values().cloned().collect();
        v.sort_by_key(|r| r.id);
        Ok(v)
    }
}
