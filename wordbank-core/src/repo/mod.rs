use crate::{
    Category, CategoryId, CoreError, Question, QuestionId, QuizDraft, QuizResult, User, VocabEntry,
    VocabId,
};
use async_trait::async_trait;

pub mod memory;

#[async_trait]
pub trait Repository: Send + Sync {
    // Users
    async fn register_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, CoreError>;
    async fn list_users(&self) -> Result<Vec<User>, CoreError>;
    async fn login(&self, email: &str, password: &str) -> Result<User, CoreError>;

    // Categories
    async fn create_category(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, CoreError>;
    async fn get_category(&self, id: CategoryId) -> Result<Category, CoreError>;
    async fn list_categories(&self, topic: Option<&str>) -> Result<Vec<Category>, CoreError>;
    async fn update_category(&self, category: &Category) -> Result<Category, CoreError>;
    async fn delete_category(&self, id: CategoryId) -> Result<(), CoreError>;

    // Vocab entries
    async fn add_vocab(
        &self,
        word: &str,
        meaning: &str,
        category_id: CategoryId,
        topic: &str,
    ) -> Result<VocabEntry, CoreError>;
    async fn get_vocab(&self, id: VocabId) -> Result<VocabEntry, CoreError>;
    async fn list_vocabs(&self, category_id: Option<CategoryId>)
        -> Result<Vec<VocabEntry>, CoreError>;
    async fn update_vocab(&self, entry: &VocabEntry) -> Result<VocabEntry, CoreError>;
    async fn delete_vocab(&self, id: VocabId) -> Result<(), CoreError>;
    /// Flags an entry learned. Idempotent; false→true only.
    async fn set_learned(&self, id: VocabId) -> Result<VocabEntry, CoreError>;

    // Questions
    async fn add_question(
        &self,
        question: &str,
        options: &[String],
        answer: &str,
        category: &str,
    ) -> Result<Question, CoreError>;
    async fn list_questions(&self, category: Option<&str>) -> Result<Vec<Question>, CoreError>;
    async fn update_question(&self, question: &Question) -> Result<Question, CoreError>;
    async fn delete_question(&self, id: QuestionId) -> Result<(), CoreError>;

    // Results
    async fn save_result(&self, draft: &QuizDraft) -> Result<QuizResult, CoreError>;
    async fn list_results(&self) -> Result<Vec<QuizResult>, CoreError>;
}
