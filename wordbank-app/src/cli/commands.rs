use crate::api::server as api_server;
use crate::cli::opts::*;
use crate::tui::app::TuiApp;

use anyhow::{bail, Result};
use std::io::{stdin, stdout, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::warn;
use wordbank_core::{
    generate_topic, Category, CategoryFilter, FlashcardSession, MarkOutcome, Question, QuizSession,
    QuizStep, Repository, StudySignal, VocabEntry, ALL_CATEGORIES,
};
use wordbank_json::JsonStore;

pub async fn run_cli(args: Cli) -> Result<()> {
    match &args.cmd {
        Command::Tui => {
            // (kept for completeness but main routes TUI directly)
            let repo = open_repo(args.data_file.clone()).await?;
            let rt = Arc::new(Runtime::new()?);
            let mut app = TuiApp::new(repo, rt);
            app.run()?;
            Ok(())
        }
        Command::Api(api) => {
            let repo = open_repo(args.data_file.clone()).await?;
            let addr: std::net::SocketAddr = api.addr.parse()?;
            api_server::run(repo, addr).await
        }
        _ => {
            let repo = open_repo(args.data_file.clone()).await?;
            match args.cmd.clone() {
                Command::Category(cmd) => category_cmd(repo, cmd).await,
                Command::Vocab(cmd) => vocab_cmd(repo, cmd).await,
                Command::Question(cmd) => question_cmd(repo, cmd).await,
                Command::Study(cmd) => study_cmd(repo, cmd).await,
                Command::Quiz(cmd) => quiz_cmd(repo, cmd).await,
                Command::Results => results_cmd(repo).await,
                Command::Export(cmd) => export_cmd(repo, cmd).await,
                Command::Import(cmd) => import_cmd(repo, cmd).await,
                Command::Register(cmd) => register_cmd(repo, cmd).await,
                Command::Login(cmd) => login_cmd(repo, cmd).await,
                _ => unreachable!(),
            }
        }
    }
}

pub async fn open_repo(data_file: Option<PathBuf>) -> Result<Arc<dyn Repository>> {
    let store = match data_file {
        Some(path) => {
            let backups = path.with_extension("backups");
            JsonStore::open_with(path, backups, 10).await?
        }
        None => JsonStore::open_default().await?,
    };
    Ok(Arc::new(store))
}

async fn category_cmd(repo: Arc<dyn Repository>, cmd: CategoryCmd) -> Result<()> {
    match cmd {
        CategoryCmd::Add { name, description } => {
            let c = repo.create_category(&name, description.as_deref()).await?;
            println!("{}\t{}\t{}", c.id, c.name, c.topic);
        }
        CategoryCmd::List { topic } => {
            for c in repo.list_categories(topic.as_deref()).await? {
                let desc = c.description.unwrap_or_else(|| "-".into());
                println!("{}\t{}\t{}\t{}", c.id, c.name, c.topic, desc);
            }
        }
        CategoryCmd::Edit { id, name, description } => {
            let mut c = repo.get_category(id).await?;
            if let Some(n) = name {
                c.name = n;
            }
            if let Some(d) = description {
                c.description = Some(d);
            }
            let c = repo.update_category(&c).await?;
            println!("{}\t{}\t{}", c.id, c.name, c.topic);
        }
        CategoryCmd::Rm { id } => {
            repo.delete_category(id).await?;
            println!("ok");
        }
    }
    Ok(())
}

async fn vocab_cmd(repo: Arc<dyn Repository>, cmd: VocabCmd) -> Result<()> {
    match cmd {
        VocabCmd::Add(a) => {
            let category = ensure_category(&*repo, &a.topic).await?;
            let v = repo
                .add_vocab(&a.word, &a.meaning, category.id, &category.topic)
                .await?;
            println!("{}\t{}\t{}", v.id, v.word, v.topic);
        }
        VocabCmd::List { category } => {
            let category_id = match category {
                Some(sel) => Some(resolve_category(&*repo, &sel).await?.id),
                None => None,
            };
            for v in repo.list_vocabs(category_id).await? {
                println!(
                    "{}\t{}\t{}\ttopic={}\tlearned={}",
                    v.id, v.word, v.meaning, v.topic, v.is_learned
                );
            }
        }
        VocabCmd::Edit(e) => {
            let mut v = repo.get_vocab(e.id).await?;
            if let Some(w) = e.word {
                v.word = w;
            }
            if let Some(m) = e.meaning {
                v.meaning = m;
            }
            let v = repo.update_vocab(&v).await?;
            println!("{}\t{}\t{}", v.id, v.word, v.meaning);
        }
        VocabCmd::Rm { id } => {
            repo.delete_vocab(id).await?;
            println!("ok");
        }
    }
    Ok(())
}

async fn question_cmd(repo: Arc<dyn Repository>, cmd: QuestionCmd) -> Result<()> {
    match cmd {
        QuestionCmd::Add(a) => {
            let q = repo
                .add_question(&a.text, &a.options, &a.answer, &a.category)
                .await?;
            println!("{}\t{}", q.id, q.question);
        }
        QuestionCmd::List { category } => {
            for q in repo.list_questions(category.as_deref()).await? {
                println!(
                    "{}\t{}\t[{}]\tanswer={}\tcategory={}",
                    q.id,
                    q.question,
                    q.options.join(" | "),
                    q.answer,
                    q.category
                );
            }
        }
        QuestionCmd::Rm { id } => {
            repo.delete_question(id).await?;
            println!("ok");
        }
    }
    Ok(())
}

async fn study_cmd(repo: Arc<dyn Repository>, cmd: StudyCmd) -> Result<()> {
    let filter = match cmd.category {
        Some(sel) => CategoryFilter::Id(resolve_category(&*repo, &sel).await?.id),
        None => CategoryFilter::All,
    };
    let vocabs = repo.list_vocabs(None).await?;
    let mut session = FlashcardSession::new(vocabs, filter);

    if session.current().is_none() {
        println!("nothing left to learn here");
        return Ok(());
    }

    loop {
        let Some(entry) = session.current().cloned() else { break };
        println!("\n[{}/{}] {}", session.cursor() + 1, session.view().len(), entry.word);
        if session.face_up() {
            println!("= {}", entry.meaning);
        }
        let line = read_line("[f=flip, n=next, p=prev, l=learned, q=quit]> ")?;
        match line.trim().to_lowercase().as_str() {
            "f" | "flip" => session.flip(),
            "n" | "next" => match session.next() {
                StudySignal::EndOfDeck { remaining } => {
                    println!("end of the deck, {remaining} card(s) still unlearned");
                }
                StudySignal::AllLearned => break,
                _ => {}
            },
            "p" | "prev" => {
                if session.previous() == StudySignal::AtFirst {
                    println!("already at the first card");
                }
            }
            "l" | "learned" => {
                let id = entry.id;
                // persist first so a failed call leaves the session untouched
                match repo.set_learned(id).await {
                    Ok(_) => {
                        if let MarkOutcome::Marked { complete: true, .. } = session.mark_learned() {
                            println!("\ndeck complete, well done!");
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(id, error = %e, "failed to persist learned flag");
                        println!("could not save learned flag: {e}");
                    }
                }
            }
            "q" | "quit" => break,
            _ => println!("enter f, n, p, l or q"),
        }
    }

    println!("progress: {:.0}%", session.progress());
    Ok(())
}

async fn quiz_cmd(repo: Arc<dyn Repository>, cmd: QuizCmd) -> Result<()> {
    let label = cmd.category.clone().unwrap_or_else(|| ALL_CATEGORIES.to_string());
    let questions = repo.list_questions(cmd.category.as_deref()).await?;
    if questions.is_empty() {
        println!("no questions in this category");
        return Ok(());
    }

    let mut quiz = QuizSession::new(questions.clone(), label);
    let draft = loop {
        let Some(q) = quiz.current().cloned() else { break quiz.draft() };
        let picked = quiz.selection().map(str::to_owned);
        println!("\n[{}/{}] {}", quiz.cursor() + 1, quiz.total(), q.question);
        for (i, opt) in q.options.iter().enumerate() {
            let mark = if picked.as_deref() == Some(opt) { " *" } else { "" };
            println!("  {}) {}{}", i + 1, opt, mark);
        }
        let line = read_line("[number=choose, n=next, p=prev, q=quit]> ")?;
        match line.trim().to_lowercase().as_str() {
            "n" | "next" => match quiz.next() {
                QuizStep::NeedSelection => println!("pick an answer first"),
                QuizStep::Finished(draft) => break draft,
                _ => {}
            },
            "p" | "prev" => {
                if quiz.previous() == QuizStep::AtFirst {
                    println!("already at the first question");
                }
            }
            "q" | "quit" => return Ok(()),
            s => {
                if let Ok(i) = s.parse::<usize>() {
                    if let Some(opt) = i.checked_sub(1).and_then(|i| q.options.get(i)) {
                        quiz.select_answer(opt.clone());
                        continue;
                    }
                }
                println!("enter an option number, n, p or q");
            }
        }
    };

    println!("\nscore: {}/{} ({}%)", draft.score, draft.total, draft.percent());
    println!("review:");
    for a in &draft.answers {
        let text = questions
            .iter()
            .find(|q| q.id == a.question_id)
            .map(|q| q.question.as_str())
            .unwrap_or("?");
        let mark = if a.is_correct { "✔" } else { "✘" };
        println!("  {mark} {text}  your answer: {}  correct: {}", a.selected, a.correct);
    }

    // best effort: a failed save never un-finishes the quiz
    match repo.save_result(&draft).await {
        Ok(r) => println!("saved as result #{}", r.id),
        Err(e) => {
            warn!(error = %e, "failed to save quiz result");
            println!("result could not be saved: {e}");
        }
    }
    Ok(())
}

async fn results_cmd(repo: Arc<dyn Repository>) -> Result<()> {
    for r in repo.list_results().await? {
        let percent = if r.total == 0 {
            0
        } else {
            (100.0 * r.score as f64 / r.total as f64).round() as u32
        };
        println!(
            "{}\t{}\t{}\t{}/{} ({}%)",
            r.id,
            r.date.format("%Y-%m-%d %H:%M"),
            r.category,
            r.score,
            r.total,
            percent
        );
    }
    Ok(())
}

async fn export_cmd(repo: Arc<dyn Repository>, cmd: ExportCmd) -> Result<()> {
    match cmd {
        ExportCmd::Json { path } => {
            let bundle = ExportBundle {
                version: 1,
                categories: repo.list_categories(None).await?,
                vocabs: repo.list_vocabs(None).await?,
                questions: repo.list_questions(None).await?,
            };
            let s = serde_json::to_string_pretty(&bundle)?;
            std::fs::write(&path, s)?;
            println!("wrote {}", path.display());
        }
        ExportCmd::Csv { path, category } => {
            let category_id = match category {
                Some(sel) => Some(resolve_category(&*repo, &sel).await?.id),
                None => None,
            };
            let vocabs = repo.list_vocabs(category_id).await?;
            let mut wtr = csv::Writer::from_path(&path)?;
            wtr.write_record(["word", "meaning", "topic", "learned"])?;
            for v in vocabs {
                wtr.write_record([
                    v.word,
                    v.meaning,
                    v.topic,
                    if v.is_learned { "1".to_string() } else { "0".to_string() },
                ])?;
            }
            wtr.flush()?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

async fn import_cmd(repo: Arc<dyn Repository>, cmd: ImportCmd) -> Result<()> {
    match cmd {
        ImportCmd::Json { path } => {
            let data = std::fs::read_to_string(&path)?;
            let bundle: ExportBundle = serde_json::from_str(&data)?;
            for c in bundle.categories {
                let _ = repo.create_category(&c.name, c.description.as_deref()).await;
            }
            for v in bundle.vocabs {
                let category = ensure_category(&*repo, &v.topic).await?;
                match repo.add_vocab(&v.word, &v.meaning, category.id, &category.topic).await {
                    Ok(added) if v.is_learned => {
                        repo.set_learned(added.id).await?;
                    }
                    _ => {}
                }
            }
            for q in bundle.questions {
                let _ = repo.add_question(&q.question, &q.options, &q.answer, &q.category).await;
            }
            println!("imported");
        }
        ImportCmd::Csv { path } => {
            let mut rdr = csv::Reader::from_path(&path)?;
            for rec in rdr.records() {
                let rec = rec?;
                let word = rec.get(0).unwrap_or("").to_string();
                let meaning = rec.get(1).unwrap_or("").to_string();
                let topic = rec.get(2).unwrap_or("").trim().to_string();
                let learned = rec.get(3).unwrap_or("0").trim() == "1";

                let category = ensure_category(&*repo, &topic).await?;
                let entry = repo.add_vocab(&word, &meaning, category.id, &category.topic).await?;
                if learned {
                    repo.set_learned(entry.id).await?;
                }
            }
            println!("imported");
        }
    }
    Ok(())
}

async fn register_cmd(repo: Arc<dyn Repository>, cmd: RegisterCmd) -> Result<()> {
    let u = repo
        .register_user(&cmd.first_name, &cmd.last_name, &cmd.email, &cmd.password)
        .await?;
    println!("{}\t{}\t{}", u.id, u.email, u.role);
    Ok(())
}

async fn login_cmd(repo: Arc<dyn Repository>, cmd: LoginCmd) -> Result<()> {
    let u = repo.login(&cmd.email, &cmd.password).await?;
    println!("welcome back, {} {} ({})", u.first_name, u.last_name, u.role);
    Ok(())
}

// ===== Helpers =====

pub async fn resolve_category<R: Repository + ?Sized>(repo: &R, sel: &str) -> Result<Category> {
    let categories = repo.list_categories(None).await?;
    if let Ok(id) = sel.parse::<i64>() {
        if let Some(c) = categories.iter().find(|c| c.id == id) {
            return Ok(c.clone());
        }
    }
    if let Some(c) = categories
        .into_iter()
        .find(|c| c.name.eq_ignore_ascii_case(sel) || c.topic == generate_topic(sel))
    {
        return Ok(c);
    }
    bail!("category not found: {}", sel)
}

/// The create-if-missing policy: a vocab saved under an unknown topic first
/// creates a category named after the typed topic text.
pub async fn ensure_category<R: Repository + ?Sized>(repo: &R, topic: &str) -> Result<Category> {
    let slug = generate_topic(topic);
    let categories = repo.list_categories(None).await?;
    if let Some(c) = categories
        .into_iter()
        .find(|c| c.topic == slug || c.name.eq_ignore_ascii_case(topic.trim()))
    {
        return Ok(c);
    }
    let c = repo.create_category(topic, None).await?;
    Ok(c)
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    stdout().flush().ok();
    let mut s = String::new();
    stdin().read_line(&mut s)?;
    Ok(s)
}

#[derive(serde::Serialize, serde::Deserialize)]
struct ExportBundle {
    version: u32,
    categories: Vec<Category>,
    vocabs: Vec<VocabEntry>,
    questions: Vec<Question>,
}
