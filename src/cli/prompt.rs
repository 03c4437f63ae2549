use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Answers that count as consent
const YES_ANSWERS: [&str; 4] = ["y", "yes", "j", "ja"];

/// Something that can ask the user a yes/no question
pub trait Prompt {
    /// Show `question` and read one answer
    fn ask(&mut self, question: &str) -> io::Result<String>;

    /// `true` if the answer is one of the accepted yes-words
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.ask(question)?;
        Ok(is_yes(&answer))
    }
}

pub fn is_yes(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    YES_ANSWERS.contains(&answer.as_str())
}

/// Writes the question to `output` and reads one line from `input`
pub struct StreamPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StreamPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

/// Interactive prompt; the question goes to stderr so stdout stays machine-readable
pub type StdinPrompt = StreamPrompt<io::StdinLock<'static>, io::Stderr>;

impl StdinPrompt {
    pub fn stdio() -> Self {
        StreamPrompt::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompt for StreamPrompt<R, W> {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut input = String::new();
        self.input.read_line(&mut input)?;
        Ok(input)
    }
}

/// Always answers yes; backs `--yes`
pub struct AssumeYes;

impl Prompt for AssumeYes {
    fn ask(&mut self, _question: &str) -> io::Result<String> {
        Ok("yes".to_string())
    }
}

/// Replays canned answers and records the questions asked
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    pub questions: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            questions: Vec::new(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        self.questions.push(question.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left"))
    }
}
