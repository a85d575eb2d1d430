use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(name = "wordbank", version, about = "WordBank CLI/TUI/API")]
pub struct Cli {
    /// Store file (defaults to the platform data dir)
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Category administration
    #[command(subcommand)]
    Category(CategoryCmd),
    /// Vocabulary administration
    #[command(subcommand)]
    Vocab(VocabCmd),
    /// Quiz question administration
    #[command(subcommand)]
    Question(QuestionCmd),
    /// Interactive flashcard study loop
    Study(StudyCmd),
    /// Interactive multiple-choice quiz
    Quiz(QuizCmd),
    /// Quiz history
    Results,
    /// Export data
    #[command(subcommand)]
    Export(ExportCmd),
    /// Import data
    #[command(subcommand)]
    Import(ImportCmd),
    /// Create a user record
    Register(RegisterCmd),
    /// Look up a user record by credentials
    Login(LoginCmd),
    /// Launch Terminal UI
    Tui,
    /// Launch Axum HTTP API
    Api(ApiCmd),
}

#[derive(Debug, Subcommand, Clone)]
pub enum CategoryCmd {
    Add {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    List {
        #[arg(long)]
        topic: Option<String>,
    },
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Rm {
        id: i64,
    },
}

#[derive(Debug, Subcommand, Clone)]
pub enum VocabCmd {
    Add(VocabAdd),
    List {
        /// Category id or name
        #[arg(long)]
        category: Option<String>,
    },
    Edit(VocabEdit),
    Rm {
        id: i64,
    },
}

#[derive(Debug, Args, Clone)]
pub struct VocabAdd {
    #[arg(long)]
    pub word: String,
    #[arg(long)]
    pub meaning: String,
    /// Topic text; a matching category is created if none exists
    #[arg(long)]
    pub topic: String,
}

#[derive(Debug, Args, Clone)]
pub struct VocabEdit {
    pub id: i64,
    #[arg(long)]
    pub word: Option<String>,
    #[arg(long)]
    pub meaning: Option<String>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum QuestionCmd {
    Add(QuestionAdd),
    List {
        #[arg(long)]
        category: Option<String>,
    },
    Rm {
        id: i64,
    },
}

#[derive(Debug, Args, Clone)]
pub struct QuestionAdd {
    #[arg(long)]
    pub text: String,
    #[arg(long = "option")]
    pub options: Vec<String>,
    #[arg(long)]
    pub answer: String,
    #[arg(long)]
    pub category: String,
}

#[derive(Debug, Args, Clone)]
pub struct StudyCmd {
    /// Category id or name; everything when omitted
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct QuizCmd {
    /// Question category label; everything when omitted
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum ExportCmd {
    Json { path: PathBuf },
    Csv { path: PathBuf, #[arg(long)] category: Option<String> },
}

#[derive(Debug, Subcommand, Clone)]
pub enum ImportCmd {
    Json { path: PathBuf },
    Csv { path: PathBuf },
}

#[derive(Debug, Args, Clone)]
pub struct RegisterCmd {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Debug, Args, Clone)]
pub struct LoginCmd {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Debug, Args, Clone)]
pub struct ApiCmd {
    /// Bind address (host:port)
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub addr: String,
}
