// src/bin/quiz_client.rs

use std::env;

use quiz_api::client::{
    ANSWER_REVEAL_DELAY, ClientConfig,
    api::ApiClient,
    session::{Outcome, QuizOverview, QuizSession, SessionState},
};
use quiz_api::models::quiz::QuizSummary;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

type Error = Box<dyn std::error::Error>;

enum Command {
    Play(Option<String>),
    Stats(String),
}

fn parse_command(mut args: impl Iterator<Item = String>) -> Result<Command, Error> {
    match args.next() {
        None => Ok(Command::Play(None)),
        Some(arg) if arg == "stats" => {
            let quiz_id = args.next().ok_or("stats needs a quiz id")?;
            Ok(Command::Stats(quiz_id))
        }
        Some(quiz_id) => Ok(Command::Play(Some(quiz_id))),
    }
}

enum Input {
    Line(Option<String>),
    TimedOut,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let command = match parse_command(env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Usage: quiz-client [quiz_id] | quiz-client stats <quiz_id>");
            return Err(e);
        }
    };

    let config = ClientConfig::from_env();
    let api = ApiClient::new(&config.api_url)?;
    let mut session = QuizSession::new(api, config.question_time);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    match command {
        Command::Stats(quiz_id) => {
            let overview = session.view_stats(&quiz_id).await?;
            print_overview(overview);
        }
        Command::Play(quiz_id) => {
            let quiz_id = match quiz_id {
                Some(id) => id,
                None => {
                    let quizzes = session.catalog().await?;
                    match choose_quiz(&quizzes, &mut lines).await? {
                        Some(id) => id,
                        None => return Ok(()),
                    }
                }
            };
            play(&mut session, &quiz_id, &mut lines).await?;

            session.reset();
            match session.view_stats(&quiz_id).await {
                Ok(overview) => print_overview(overview),
                Err(e) => eprintln!("Could not load stats: {}", e),
            }
        }
    }
    Ok(())
}

async fn choose_quiz(
    quizzes: &[QuizSummary],
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<Option<String>, Error> {
    println!("{BOLD}Quiz Challenge{RESET}");
    for (i, quiz) in quizzes.iter().enumerate() {
        println!("  {}. {} ({} questions)", i + 1, quiz.title, quiz.question_count);
    }
    loop {
        println!("Pick a quiz number:");
        let Some(line) = lines.next_line().await? else {
            return Ok(None);
        };
        match line.trim().parse::<usize>() {
            Ok(n) if (1..=quizzes.len()).contains(&n) => return Ok(Some(quizzes[n - 1].id.clone())),
            _ => println!("Enter a number between 1 and {}", quizzes.len()),
        }
    }
}

async fn play(
    session: &mut QuizSession<ApiClient>,
    quiz_id: &str,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<(), Error> {
    session.start(quiz_id).await?;
    if let Some(quiz) = session.quiz() {
        println!("\n{BOLD}{}{RESET}", quiz.title);
    }

    loop {
        match session.state() {
            SessionState::InProgress { .. } => {
                let (Some((index, question)), Some(countdown)) =
                    (session.current_question(), session.countdown())
                else {
                    break;
                };
                let total = session.quiz().map_or(0, |q| q.questions.len());
                println!(
                    "\n{BOLD}Question {}/{}{RESET} ({}s): {}",
                    index + 1,
                    total,
                    countdown.seconds_left(),
                    question.question
                );
                for (i, option) in question.options.iter().enumerate() {
                    println!("  {}. {}", i + 1, option);
                }

                let input = tokio::select! {
                    line = lines.next_line() => Input::Line(line?),
                    _ = countdown.expired() => Input::TimedOut,
                };
                match input {
                    Input::TimedOut => {
                        println!("Time's up!");
                        session.time_out()?;
                    }
                    Input::Line(None) => {
                        session.time_out()?;
                    }
                    Input::Line(Some(line)) => {
                        let choice = line.trim().parse::<usize>().ok().and_then(|n| n.checked_sub(1));
                        match choice.map(|c| session.answer(c)) {
                            Some(Ok(())) => {}
                            _ => println!("Not an option, try again."),
                        }
                    }
                }
            }
            SessionState::Answered { .. } => {
                tokio::time::sleep(ANSWER_REVEAL_DELAY).await;
                session.advance().await?;
            }
            SessionState::Finished => {
                if let Some(outcome) = session.outcome() {
                    print_outcome(outcome);
                }
                break;
            }
            _ => break,
        }
    }
    Ok(())
}

fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Confirmed(result) => {
            println!(
                "\n{BOLD}Score: {}/{} ({}%){RESET} in {}s",
                result.score, result.total_questions, result.percentage, result.time_spent
            );
            for detail in &result.detailed_results {
                let mark = if detail.correct { "✓" } else { "✗" };
                let correct = detail
                    .options
                    .get(detail.correct_answer)
                    .map(String::as_str)
                    .unwrap_or("?");
                println!("  {} {} (answer: {})", mark, detail.question, correct);
            }
        }
        Outcome::Unconfirmed {
            answered,
            total_questions,
            error,
        } => {
            println!(
                "\nAnswered {}/{} questions, but the result was not recorded: {}",
                answered, total_questions, error
            );
        }
    }
}

fn print_overview(overview: &QuizOverview) {
    let stats = &overview.stats;
    println!("\n{BOLD}Statistics for {}{RESET}", stats.quiz_id);
    println!("  Attempts: {}", stats.total_attempts);
    println!(
        "  Average:  {:.2}",
        stats.average_score.unwrap_or_default()
    );
    println!("  Best:     {}", stats.highest_score);

    println!("\n{BOLD}Leaderboard{RESET}");
    if overview.leaderboard.is_empty() {
        println!("  No attempts yet");
    }
    for (rank, entry) in overview.leaderboard.iter().enumerate() {
        println!(
            "  #{:<2} {}/{} ({}%) in {}s",
            rank + 1,
            entry.score,
            entry.total_questions,
            entry.percentage,
            entry.time_spent
        );
    }
}
