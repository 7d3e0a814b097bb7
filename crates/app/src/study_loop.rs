use std::fmt::Write as _;

use services::StudyApp;
use study_core::model::SubscriptionTier;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

/// One line of input at the study prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudyInput {
    /// 1-based option number.
    Select(usize),
    Submit,
    Next,
    Previous,
    /// 1-based question number.
    GoTo(usize),
    Folder(String),
    Folders,
    Stats,
    Generate,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl StudyInput {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word {
            "" => Self::Empty,
            "s" | "submit" => Self::Submit,
            "n" | "next" => Self::Next,
            "p" | "prev" | "previous" => Self::Previous,
            "g" | "goto" => rest
                .parse()
                .map_or_else(|_| Self::Unknown(line.to_string()), Self::GoTo),
            "f" | "folder" if !rest.is_empty() => Self::Folder(rest.to_string()),
            "folders" => Self::Folders,
            "stats" => Self::Stats,
            "gen" | "generate" => Self::Generate,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ if rest.is_empty() => word
                .parse()
                .map_or_else(|_| Self::Unknown(line.to_string()), Self::Select),
            _ => Self::Unknown(line.to_string()),
        }
    }
}

const HELP: &str = "\
Commands:
  <n>          select option n
  s            submit the selected option
  n / p        next / previous question
  g <n>        go to question n
  f <folder>   switch folder
  folders      list folders
  stats        show the dashboard
  gen          generate questions from notes
  q            quit
";

/// Text block for the current question, or the empty-folder hint.
pub fn render_question(app: &StudyApp) -> String {
    let session = app.session();
    let mut out = String::new();
    let Some(question) = session.current_question() else {
        let _ = writeln!(
            out,
            "No questions in folder '{}'. Try `f math` or `folders`.",
            session.active_folder()
        );
        return out;
    };

    let progress = session.progress();
    let _ = writeln!(
        out,
        "[{}] Question {} of {} ({}%) | Score: {}/{} | {}",
        session.active_folder(),
        progress.position,
        progress.total,
        progress.percent(),
        progress.correct,
        progress.total,
        question.difficulty(),
    );
    let _ = writeln!(out, "{}", question.prompt());

    let pending = session.pending_selection();
    for (index, option) in question.options().iter().enumerate() {
        let marker = if session.is_revealed() && question.is_correct(index) {
            "✓"
        } else if session.is_revealed() && pending == Some(index) {
            "✗"
        } else if pending == Some(index) {
            ">"
        } else {
            " "
        };
        let _ = writeln!(out, " {marker} {}) {option}", index + 1);
    }

    if session.is_revealed() {
        let _ = writeln!(out, "Explanation: {}", question.explanation());
    }
    out
}

pub fn render_stats(app: &StudyApp) -> String {
    let snapshot = app.snapshot();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Notes: {} | Flashcards: {} | Answered: {} | Accuracy: {}% ({:+}%)",
        snapshot.note_count,
        snapshot.flashcard_count,
        snapshot.questions_answered,
        snapshot.accuracy_percent,
        snapshot.accuracy_trend,
    );
    let _ = writeln!(
        out,
        "Weekly progress: {}% | Study streak: {} day(s)",
        snapshot.weekly_progress_percent, snapshot.study_streak_days
    );
    for goal in snapshot.goals {
        let _ = writeln!(out, "  {}: {}/{}", goal.label, goal.done, goal.goal);
    }
    out
}

fn render_folders(app: &StudyApp) -> String {
    let mut out = String::new();
    for folder in app.folders().folders() {
        let active = if folder.id() == app.active_folder() { "*" } else { " " };
        let _ = writeln!(out, " {active} {} ({})", folder.id(), folder.name());
    }
    out
}

/// Apply one input line. Returns the text to print and whether to keep going.
pub fn handle(app: &mut StudyApp, input: StudyInput) -> (String, bool) {
    debug!(?input, "study input");
    let text = match input {
        StudyInput::Select(number) => {
            if number > 0 && app.session_mut().select_option(number - 1) {
                render_question(app)
            } else {
                "That option is not available.\n".to_string()
            }
        }
        StudyInput::Submit => match app.submit_answer() {
            Some(feedback) => {
                let verdict = if feedback.is_correct {
                    "Correct!".to_string()
                } else {
                    format!("Incorrect. The answer is option {}.", feedback.correct_index + 1)
                };
                format!("{verdict}\n{}", render_question(app))
            }
            None => "Select an unanswered option first.\n".to_string(),
        },
        StudyInput::Next => {
            if app.session_mut().next() {
                render_question(app)
            } else {
                "Already at the last question.\n".to_string()
            }
        }
        StudyInput::Previous => {
            if app.session_mut().previous() {
                render_question(app)
            } else {
                "Already at the first question.\n".to_string()
            }
        }
        StudyInput::GoTo(number) => {
            if number > 0 && app.session_mut().go_to(number - 1) {
                render_question(app)
            } else {
                "No such question here.\n".to_string()
            }
        }
        StudyInput::Folder(folder) => {
            app.select_folder(folder);
            render_question(app)
        }
        StudyInput::Folders => render_folders(app),
        StudyInput::Stats => render_stats(app),
        StudyInput::Generate => match app.generate_questions() {
            Ok(added) => format!("Added {added} question(s).\n"),
            Err(err) => format!("{err}\n"),
        },
        StudyInput::Help => HELP.to_string(),
        StudyInput::Quit => return (String::new(), false),
        StudyInput::Empty => String::new(),
        StudyInput::Unknown(line) => format!("Unknown command: {line} (type `help`)\n"),
    };
    (text, true)
}

/// Interactive prompt over stdin until `q` or end of input.
pub async fn run(mut app: StudyApp, tier: SubscriptionTier) -> std::io::Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let intro = format!("Plan: {tier}. Type `help` for commands.\n{}", render_question(&app));
    stdout.write_all(intro.as_bytes()).await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let (text, keep_going) = handle(&mut app, StudyInput::parse(&line));
        stdout.write_all(text.as_bytes()).await?;
        if !keep_going {
            break;
        }
    }

    let summary = render_stats(&app);
    stdout.write_all(summary.as_bytes()).await?;
    stdout.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::time::fixed_clock;

    #[test]
    fn parses_prompt_commands() {
        assert_eq!(StudyInput::parse("2"), StudyInput::Select(2));
        assert_eq!(StudyInput::parse(" s "), StudyInput::Submit);
        assert_eq!(StudyInput::parse("g 3"), StudyInput::GoTo(3));
        assert_eq!(
            StudyInput::parse("f  science"),
            StudyInput::Folder("science".into())
        );
        assert_eq!(StudyInput::parse(""), StudyInput::Empty);
        assert!(matches!(StudyInput::parse("g x"), StudyInput::Unknown(_)));
        assert!(matches!(StudyInput::parse("f"), StudyInput::Unknown(_)));
    }

    #[test]
    fn empty_folder_renders_hint() {
        let app = StudyApp::with_starter_content(fixed_clock());
        assert!(render_question(&app).contains("No questions in folder 'general'"));
    }

    #[test]
    fn answering_through_the_prompt() {
        let mut app = StudyApp::with_starter_content(fixed_clock());
        handle(&mut app, StudyInput::Folder("math".into()));

        let (text, _) = handle(&mut app, StudyInput::Select(2));
        assert!(text.contains(" > 2) 1"));

        let (text, _) = handle(&mut app, StudyInput::Submit);
        assert!(text.starts_with("Correct!"));
        assert!(text.contains("Score: 1/2"));

        let (text, _) = handle(&mut app, StudyInput::Submit);
        assert_eq!(text, "Select an unanswered option first.\n");

        let (_, keep_going) = handle(&mut app, StudyInput::Quit);
        assert!(!keep_going);
    }

    #[test]
    fn navigation_stops_at_edges() {
        let mut app = StudyApp::with_starter_content(fixed_clock());
        handle(&mut app, StudyInput::Folder("math".into()));
        let (text, _) = handle(&mut app, StudyInput::Previous);
        assert_eq!(text, "Already at the first question.\n");
        handle(&mut app, StudyInput::Next);
        let (text, _) = handle(&mut app, StudyInput::Next);
        assert_eq!(text, "Already at the last question.\n");
    }
}
